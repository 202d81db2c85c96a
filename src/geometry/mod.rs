mod aabb;
mod box_topology;
mod plucker;
mod ray_box_intersection;
mod ray_triangle_intersection;
mod sphere;
mod triangle;
mod vector;

use std::fmt::Display;

use nalgebra::Scalar;
use thiserror::Error;

use crate::util::real::Real;

pub use aabb::AxisAlignedBox;
pub use box_topology::{Edge, EdgeSigns, Face, FaceMask};
pub use ray_box_intersection::{BoxStrategy, EdgeTest};
pub use ray_triangle_intersection::TriangleHit;
pub use sphere::{Sphere, SphereHit};
pub use triangle::{BarycentricCoordinates, Triangle};
pub use vector::{Vec3Bits, Vec3Ext};

/// Three component vector used for both points and directions.
pub type Vec3<T = f32> = nalgebra::Vector3<T>;

#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Vector has zero length and can't be normalized")]
    DegenerateVector,

    #[error("Box corners coincide along the {axis} axis")]
    DegenerateBox { axis: Axis },

    #[error("Sphere radius must be positive")]
    InvalidRadius,

    #[error("Primitive coordinates must be finite")]
    NonFiniteCoordinate,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Half line from `origin` along `direction`.
///
/// `Ray::new` takes any coordinates. Non-finite origins propagate through the
/// predicates as IEEE values, a NaN or zero direction fails normalization with
/// [`GeometryError::DegenerateVector`]. Use [`Ray::try_new`] to reject them up front.
#[derive(Clone, Debug, PartialEq)]
pub struct Ray<T = f32> {
    pub origin: Vec3<T>,
    /// Direction of the ray, doesn't have to be normalized.
    /// Zero direction is accepted here and reported by the predicates.
    pub direction: Vec3<T>,
}

impl<T> Ray<T> {
    pub fn new(origin: Vec3<T>, direction: Vec3<T>) -> Ray<T> {
        Ray { origin, direction }
    }
}

impl<T: Scalar> Ray<T> {
    pub fn map_coords<T2: Scalar, F: FnMut(T) -> T2>(&self, mut f: F) -> Ray<T2> {
        Ray {
            origin: self.origin.map(&mut f),
            direction: self.direction.map(&mut f),
        }
    }
}

impl<T: Real> Ray<T> {
    /// Like `new`, but rejects infinite or NaN coordinates in either vector.
    pub fn try_new(origin: Vec3<T>, direction: Vec3<T>) -> Result<Self, GeometryError> {
        ensure_finite(&origin)?;
        ensure_finite(&direction)?;
        Ok(Ray::new(origin, direction))
    }

    pub fn unit_direction(&self) -> Result<Vec3<T>, GeometryError> {
        self.direction.checked_normalize()
    }

    /// Point at distance `t` along the normalized direction.
    pub fn point_at(&self, t: T) -> Result<Vec3<T>, GeometryError> {
        Ok(&self.origin + self.unit_direction()? * t)
    }
}

/// Intersection of a primitive with a ray.
///
/// The ray direction is normalized by every implementation, so a zero
/// direction fails with [`GeometryError::DegenerateVector`].
pub trait RayIntersectionExt<T: Real> {
    type Hit;

    fn intersect(&self, ray: &Ray<T>) -> Result<Self::Hit, GeometryError>;
}

pub(crate) fn ensure_finite<T: Real>(v: &Vec3<T>) -> Result<(), GeometryError> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(GeometryError::NonFiniteCoordinate)
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use assert2::assert;
    use proptest::prelude::*;
    use test_case::test_case;

    /// Helper macro that creates a wrapper around a type that implements Deref and Arbitrary
    macro_rules! arbitrary_wrapper {
        ( $wrapper_name:ident ( $type:ty ) -> $block:block ) => {
            #[derive(Copy, Clone, Debug)]
            pub struct $wrapper_name(pub $type);

            impl std::ops::Deref for $wrapper_name {
                type Target = $type;
                fn deref(&self) -> &$type {
                    &self.0
                }
            }

            impl Arbitrary for $wrapper_name {
                type Parameters = ();
                type Strategy = proptest::strategy::BoxedStrategy<Self>;
                fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
                    $block.prop_map(|x| $wrapper_name(x)).boxed()
                }
            }
        };
    }

    /// Floats in -100..100 with a coarse step, so that products stay well conditioned.
    pub fn simple_float() -> BoxedStrategy<f32> {
        (-100_000i32..=100_000).prop_map(|n| n as f32 * 1e-3).boxed()
    }

    pub fn vec3_strategy() -> BoxedStrategy<Vec3> {
        (simple_float(), simple_float(), simple_float())
            .prop_map(|(x, y, z)| Vec3::new(x, y, z))
            .boxed()
    }

    arbitrary_wrapper! {
        Vec3Wrapper(Vec3) -> {
            vec3_strategy()
        }
    }

    arbitrary_wrapper! {
        NonzeroVec3Wrapper(Vec3) -> {
            vec3_strategy().prop_filter("vector is too short", |v| v.norm() > 1e-2)
        }
    }

    #[test]
    fn point_at_uses_unit_direction() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, -10.0));
        assert!(ray.point_at(2.0) == Ok(Vec3::new(1.0, 2.0, 1.0)));
    }

    #[test]
    fn point_at_zero_direction() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::zeros());
        assert!(ray.point_at(1.0) == Err(GeometryError::DegenerateVector));
    }

    #[test_case(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0) ; "nan_origin")]
    #[test_case(Vec3::zeros(), Vec3::new(0.0, f32::INFINITY, 0.0) ; "infinite_direction")]
    #[test_case(Vec3::zeros(), Vec3::new(0.0, 0.0, f32::NAN) ; "nan_direction")]
    fn try_new_rejects_non_finite(origin: Vec3, direction: Vec3) {
        assert!(Ray::try_new(origin, direction) == Err(GeometryError::NonFiniteCoordinate));
    }

    #[test]
    fn try_new_accepts_zero_direction() {
        let ray = Ray::try_new(Vec3::new(1.0, 2.0, 3.0), Vec3::zeros()).unwrap();
        assert!(ray.point_at(1.0) == Err(GeometryError::DegenerateVector));
    }

    #[test]
    fn nan_direction_is_degenerate() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(f32::NAN, 1.0, 0.0));
        assert!(ray.unit_direction() == Err(GeometryError::DegenerateVector));
    }

    #[test]
    fn map_coords_to_f64() {
        let ray = Ray::new(Vec3::new(0.5, 1.0, 2.0), Vec3::new(1.0, 0.0, 0.0));
        let mapped = ray.map_coords(f64::from);
        assert!(mapped.origin == nalgebra::Vector3::new(0.5, 1.0, 2.0));
        assert!(mapped.direction == nalgebra::Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn error_messages() {
        let e = GeometryError::DegenerateBox { axis: Axis::Y };
        assert!(e.to_string() == "Box corners coincide along the y axis");
    }
}
