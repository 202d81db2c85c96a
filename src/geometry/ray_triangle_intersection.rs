use crate::util::real::Real;

use super::{BarycentricCoordinates, GeometryError, Ray, RayIntersectionExt, Triangle, Vec3};

#[derive(Clone, Debug, PartialEq)]
pub struct TriangleHit<T> {
    /// Distance along the normalized ray direction
    pub t: T,
    pub barycentric: BarycentricCoordinates<T>,
}

impl<T: Real> RayIntersectionExt<T> for Triangle<Vec3<T>> {
    type Hit = Option<TriangleHit<T>>;

    /// Kensler & Shirley's scalar triple product test.
    ///
    /// All quantities are signed volumes of tetrahedra formed by the ray and the triangle,
    /// the barycentrics and distance are ratios of them. A hit requires all volumes to share
    /// a sign and the point to lie in the half open region `beta >= 0, gamma >= 0, beta + gamma < 1`.
    /// Together these only pass when the ray direction points along [`Triangle::normal`],
    /// rays coming from the other side miss.
    fn intersect(&self, ray: &Ray<T>) -> Result<Option<TriangleHit<T>>, GeometryError> {
        let edge0 = &self[1] - &self[0];
        let edge1 = &self[0] - &self[2];
        let normal = edge1.cross(&edge0);

        let direction = ray.unit_direction()?;

        let v = normal.dot(&direction);
        let edge2 = &self[0] - &ray.origin;
        let va = normal.dot(&edge2);

        let interm = direction.cross(&edge2);
        let v1 = interm.dot(&edge1);
        let v2 = interm.dot(&edge0);

        let zero = T::zero();
        let same_sign = (v1 < zero && v2 < zero && v < zero) || (v1 > zero && v2 > zero && v > zero);
        // Checked before dividing, v == 0 fails here
        if !same_sign || v1.clone() + v2.clone() > v {
            return Ok(None);
        }

        let beta = v1 / v.clone();
        let gamma = v2 / v.clone();
        if !(beta >= zero && gamma >= zero && beta.clone() + gamma.clone() < T::one()) {
            return Ok(None);
        }

        Ok(Some(TriangleHit {
            t: va / v,
            barycentric: BarycentricCoordinates { beta, gamma },
        }))
    }
}
