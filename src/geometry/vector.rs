use std::fmt::Display;

use crate::util::{float_bits::BitsDisplay, real::Real};

use super::{GeometryError, Vec3};

/// Vector operations that nalgebra only provides for `ComplexField` scalars.
pub trait Vec3Ext<T>: Sized {
    /// Scales the vector by `1 / sqrt(dot(v, v))`.
    /// Fails if the squared length is zero (or NaN).
    fn checked_normalize(&self) -> Result<Self, GeometryError>;
}

impl<T: Real> Vec3Ext<T> for Vec3<T> {
    fn checked_normalize(&self) -> Result<Self, GeometryError> {
        let length_squared = self.dot(self);
        if !(length_squared > T::zero()) {
            return Err(GeometryError::DegenerateVector);
        }
        let inv_length = T::one() / length_squared.sqrt();
        Ok(self * inv_length)
    }
}

/// Raw bit pattern access to single precision vectors.
pub trait Vec3Bits {
    fn from_bits(bits: [u32; 3]) -> Self;
    fn to_bits(&self) -> [u32; 3];

    /// One `%08x value` line per component.
    fn display_bits(&self) -> impl Display;
}

impl Vec3Bits for Vec3<f32> {
    fn from_bits(bits: [u32; 3]) -> Self {
        Vec3::new(
            f32::from_bits(bits[0]),
            f32::from_bits(bits[1]),
            f32::from_bits(bits[2]),
        )
    }

    fn to_bits(&self) -> [u32; 3] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }

    fn display_bits(&self) -> impl Display {
        BitsLines(*self)
    }
}

struct BitsLines(Vec3<f32>);

impl Display for BitsLines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in self.0.iter() {
            writeln!(f, "{}", BitsDisplay(*c))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test::{NonzeroVec3Wrapper, Vec3Wrapper};
    use assert2::assert;
    use proptest::prop_assert;
    use test_case::test_case;
    use test_strategy::proptest;

    #[proptest]
    fn cross_is_orthogonal(a: Vec3Wrapper, b: Vec3Wrapper) {
        let (a, b) = (*a, *b);
        let c = a.cross(&b);
        // Relative to the magnitude of the individual products
        let tolerance = 1e-5 * (a.norm() * b.norm() * a.norm().max(b.norm())).max(1.0);
        prop_assert!(c.dot(&a).abs() <= tolerance);
        prop_assert!(c.dot(&b).abs() <= tolerance);
    }

    #[test]
    fn cross_right_handed() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert!(x.cross(&y) == Vec3::new(0.0, 0.0, 1.0));
        assert!(y.cross(&x) == Vec3::new(0.0, 0.0, -1.0));
    }

    #[proptest]
    fn normalize_gives_unit_length(v: NonzeroVec3Wrapper) {
        let n = v.checked_normalize().unwrap();
        prop_assert!((n.dot(&n) - 1.0).abs() < 1e-5);
    }

    #[test_case(Vec3::zeros() ; "zero")]
    #[test_case(Vec3::new(1e-30, 0.0, 0.0) ; "underflow")]
    #[test_case(Vec3::new(f32::NAN, 1.0, 0.0) ; "nan")]
    fn normalize_degenerate(v: Vec3) {
        assert!(v.checked_normalize() == Err(GeometryError::DegenerateVector));
    }

    #[test]
    fn normalize_f64() {
        let v = nalgebra::Vector3::new(0.0f64, -2.0, 0.0);
        assert!(v.checked_normalize() == Ok(nalgebra::Vector3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn bits_access() {
        let v = Vec3::from_bits([0x3f80_0000, 0xc000_0000, 0x0000_0000]);
        assert!(v == Vec3::new(1.0, -2.0, 0.0));
        assert!(v.to_bits() == [0x3f80_0000, 0xc000_0000, 0x0000_0000]);
    }

    #[test]
    fn bits_printing() {
        let v = Vec3::new(1.0, -2.0, 0.5);
        assert!(
            v.display_bits().to_string()
                == "3f800000 1.000000\nc0000000 -2.000000\n3f000000 0.500000\n"
        );
    }
}
