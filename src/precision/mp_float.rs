use std::fmt::Display;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{One, Zero};
use rug::Float;

use crate::util::real::Real;

/// MPFR float with a fixed number of significand bits.
///
/// Every value is created with `PREC` bits and every operation rounds to nearest,
/// so the result of a computation doesn't depend on the precision of its inputs.
/// The MPFR storage is released when the value is dropped.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct MpFloat<const PREC: u32>(Float);

/// Same significand width as `f64`, the MPFR default.
pub type Mp53 = MpFloat<53>;
pub type Mp256 = MpFloat<256>;

impl<const PREC: u32> MpFloat<PREC> {
    pub fn as_float(&self) -> &Float {
        &self.0
    }
}

impl<const PREC: u32> From<f32> for MpFloat<PREC> {
    fn from(value: f32) -> Self {
        MpFloat(Float::with_val(PREC, value))
    }
}

macro_rules! binary_op {
    ( $trait:ident :: $method:ident, $assign_trait:ident :: $assign_method:ident ) => {
        impl<const PREC: u32> $trait for MpFloat<PREC> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                MpFloat($trait::$method(self.0, rhs.0))
            }
        }

        impl<const PREC: u32> $assign_trait for MpFloat<PREC> {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                $assign_trait::$assign_method(&mut self.0, rhs.0);
            }
        }
    };
}

binary_op!(Add::add, AddAssign::add_assign);
binary_op!(Sub::sub, SubAssign::sub_assign);
binary_op!(Mul::mul, MulAssign::mul_assign);
binary_op!(Div::div, DivAssign::div_assign);

impl<const PREC: u32> Neg for MpFloat<PREC> {
    type Output = Self;

    fn neg(self) -> Self {
        MpFloat(-self.0)
    }
}

impl<const PREC: u32> Zero for MpFloat<PREC> {
    fn zero() -> Self {
        MpFloat(Float::new(PREC))
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl<const PREC: u32> One for MpFloat<PREC> {
    fn one() -> Self {
        MpFloat(Float::with_val(PREC, 1))
    }
}

impl<const PREC: u32> Display for MpFloat<PREC> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<const PREC: u32> Real for MpFloat<PREC> {
    fn from_f32(value: f32) -> Self {
        value.into()
    }

    fn to_f32(&self) -> f32 {
        self.0.to_f32()
    }

    fn sqrt(&self) -> Self {
        MpFloat(Float::with_val(PREC, self.0.sqrt_ref()))
    }

    fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{AxisAlignedBox, BoxStrategy, Face, Ray, RayIntersectionExt, Sphere, Triangle, Vec3};
    use crate::util::float_bits::ulp_distance;
    use assert2::assert;

    fn mp(x: f32) -> Mp256 {
        Mp256::from_f32(x)
    }

    #[test]
    fn conversion_is_exact() {
        for x in [0.1f32, -3.5e-20, 7.0e30, f32::MIN_POSITIVE] {
            assert!(mp(x).to_f32() == x);
        }
    }

    #[test]
    fn precision_is_kept() {
        let tiny = 2.0f32.powi(-100);
        let sum = mp(1.0) + mp(tiny);
        assert!(sum.as_float().prec() == 256);
        assert!(sum - mp(1.0) == mp(tiny));

        // 53 bits can't hold both ends
        let sum = Mp53::from_f32(1.0) + Mp53::from_f32(tiny);
        assert!(sum - Mp53::one() == Mp53::zero());
    }

    #[test]
    fn sqrt_rounds_like_f32() {
        assert!(Real::sqrt(&mp(2.0)).to_f32() == 2.0f32.sqrt());
        assert!(Real::sqrt(&mp(16.0)) == mp(4.0));
    }

    #[test]
    fn identities_and_sign() {
        assert!(Mp256::zero().is_zero());
        assert!(-mp(1.5) < Mp256::zero());
        assert!(mp(3.0) / mp(2.0) * mp(2.0) == mp(3.0));
        assert!(Mp256::one() == mp(1.0));
        assert!(mp(0.5).to_string().starts_with("0.5"));
        assert!(!Real::is_finite(&(mp(1.0) / Mp256::zero())));
    }

    #[test]
    fn triangle_scenario() {
        let triangle = Triangle::new(
            Vec3::new(3.99, 3.99, 4.0),
            Vec3::new(32.0, 0.0, 4.0),
            Vec3::new(0.0, 16.0, 4.0),
        )
        .map_coords(mp);
        let ray = Ray::new(Vec3::<f32>::zeros(), Vec3::new(1.0, 1.0, 1.0)).map_coords(mp);

        let hit = triangle.intersect(&ray).unwrap().unwrap();
        let four_sqrt_3 = 4.0 * 3.0f32.sqrt();
        assert!(ulp_distance(hit.t.to_f32(), four_sqrt_3).unwrap() <= 1);
        assert!(hit.barycentric.beta > Mp256::zero());
        assert!(hit.barycentric.gamma > Mp256::zero());
    }

    #[test]
    fn sphere_and_box_scenarios() {
        let sphere: Sphere = Sphere::new(Vec3::new(40.0, 40.0, 20.0), 14.0).unwrap();
        let sphere = sphere.map_coords(mp);
        let ray = Ray::new(Vec3::<f32>::zeros(), Vec3::new(40.0, 40.0, 8.0)).map_coords(mp);
        let hit = sphere.intersect(&ray).unwrap().unwrap();
        assert!((hit.t.to_f32() - 51.4075).abs() < 1e-3);

        let aabb: AxisAlignedBox = AxisAlignedBox::new(Vec3::new(2.0, 2.0, 2.0), Vec3::new(-2.0, -2.0, -2.0)).unwrap();
        let aabb = aabb.map_coords(mp);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0)).map_coords(mp);
        for strategy in BoxStrategy::ALL {
            assert!(aabb.intersect_with(&ray, strategy).unwrap());
        }
        let faces = aabb.face_mask(&ray, crate::geometry::EdgeTest::Plucker).unwrap();
        assert!(faces.first() == Some(Face::A));
    }

    #[test]
    fn values_cross_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Mp256>();

        let value = mp(2.0);
        let root = std::thread::scope(|scope| scope.spawn(|| Real::sqrt(&value)).join().unwrap());
        assert!(root.to_f32() == 2.0f32.sqrt());
    }
}
