use nalgebra::Scalar;

use crate::util::real::Real;

use super::{GeometryError, Ray, RayIntersectionExt, Vec3, ensure_finite};

#[derive(Clone, Debug, PartialEq)]
pub struct Sphere<T = f32> {
    center: Vec3<T>,
    radius: T,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SphereHit<T> {
    /// Distance along the normalized ray direction, negative if the hit is behind the origin
    pub t: T,
    /// Unit outward normal at the hit point
    pub normal: Vec3<T>,
}

impl<T: Real> Sphere<T> {
    pub fn new(center: Vec3<T>, radius: T) -> Result<Self, GeometryError> {
        ensure_finite(&center)?;
        if !(radius > T::zero() && radius.is_finite()) {
            return Err(GeometryError::InvalidRadius);
        }
        Ok(Sphere { center, radius })
    }

    pub fn center(&self) -> &Vec3<T> {
        &self.center
    }

    pub fn radius(&self) -> &T {
        &self.radius
    }
}

impl<T: Scalar> Sphere<T> {
    pub fn map_coords<T2: Scalar, F: FnMut(T) -> T2>(&self, mut f: F) -> Sphere<T2> {
        Sphere {
            center: self.center.map(&mut f),
            radius: f(self.radius.clone()),
        }
    }
}

impl<T: Real> RayIntersectionExt<T> for Sphere<T> {
    type Hit = Option<SphereHit<T>>;

    /// Geometric solution: project the center onto the ray, then use the chord half length.
    /// Returns the near root even when it lies behind the ray origin.
    fn intersect(&self, ray: &Ray<T>) -> Result<Option<SphereHit<T>>, GeometryError> {
        let to_center = &self.center - &ray.origin;
        let to_center_sq = to_center.dot(&to_center);

        let direction = ray.unit_direction()?;

        // Distance along the ray to the center's projection
        let t = to_center.dot(&direction);
        let center_to_ray_sq = to_center_sq - t.clone() * t.clone();
        let half_chord_sq = self.radius.clone() * self.radius.clone() - center_to_ray_sq;
        // NaN from overflowing squares (inf - inf) or a NaN origin is a miss too
        if !(half_chord_sq >= T::zero()) {
            return Ok(None);
        }

        let t = t - half_chord_sq.sqrt();
        let point = &ray.origin + direction * t.clone();
        let inv_radius = T::one() / self.radius.clone();
        let normal = (point - &self.center) * inv_radius;

        Ok(Some(SphereHit { t, normal }))
    }
}
