//! Cross-checking of the single precision predicates against a reference precision.
//!
//! Each check runs a predicate twice: once on the `f32` inputs and once on the same
//! inputs converted exactly to the reference type. The reference results are rounded
//! back to `f32` and compared value by value.

#[cfg(feature = "mpfr")]
mod mp_float;

use std::fmt::Display;

#[cfg(feature = "mpfr")]
pub use mp_float::{Mp53, Mp256, MpFloat};

use crate::geometry::{
    AxisAlignedBox, BoxStrategy, FaceMask, GeometryError, Ray, RayIntersectionExt, Sphere, SphereHit, Triangle,
    TriangleHit, Vec3,
};
use crate::util::Stats;
use crate::util::float_bits::ulp_distance;
use crate::util::real::Real;

/// Values of one hit, rounded to single precision.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HitSample {
    /// Distance along the ray, for the predicates that report one
    pub t: Option<f32>,
    /// Barycentrics, normal components or the slab exit distance
    pub attributes: Vec<f32>,
    pub faces: FaceMask,
}

impl HitSample {
    fn from_triangle<T: Real>(hit: &TriangleHit<T>) -> Self {
        HitSample {
            t: Some(hit.t.to_f32()),
            attributes: vec![hit.barycentric.beta.to_f32(), hit.barycentric.gamma.to_f32()],
            faces: FaceMask::EMPTY,
        }
    }

    fn from_sphere<T: Real>(hit: &SphereHit<T>) -> Self {
        HitSample {
            t: Some(hit.t.to_f32()),
            attributes: hit.normal.iter().map(|c| c.to_f32()).collect(),
            faces: FaceMask::EMPTY,
        }
    }

    fn from_box<T: Real>(
        aabb: &AxisAlignedBox<T>,
        ray: &Ray<T>,
        strategy: BoxStrategy,
    ) -> Result<Option<Self>, GeometryError> {
        Ok(match strategy {
            BoxStrategy::Slab => {
                let (t_min, t_max) = aabb.slab_interval(ray)?;
                (t_min <= t_max).then(|| HitSample {
                    t: Some(t_min.to_f32()),
                    attributes: vec![t_max.to_f32()],
                    faces: FaceMask::EMPTY,
                })
            }
            BoxStrategy::Edges(test) => {
                let faces = aabb.face_mask(ray, test)?;
                (!faces.is_empty()).then(|| HitSample {
                    t: None,
                    attributes: Vec::new(),
                    faces,
                })
            }
        })
    }
}

/// Aggregated comparison of many rays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CrossCheckReport {
    pub rays: usize,
    /// Rays that hit in both precisions with the same faces
    pub hits: usize,
    /// Rays where the precisions differ in the hit flag or in the face mask
    pub disagreements: usize,
    pub t_error: Stats,
    pub attribute_error: Stats,
}

impl CrossCheckReport {
    /// Adds the outcome of one ray. Returns false if the two outcomes disagree.
    /// NaN values can't be measured in ULPs and are left out of the statistics.
    pub fn record(&mut self, fast: Option<&HitSample>, reference: Option<&HitSample>) -> bool {
        self.rays += 1;
        let (fast, reference) = match (fast, reference) {
            (None, None) => return true,
            (Some(fast), Some(reference)) if fast.faces == reference.faces => (fast, reference),
            _ => {
                self.disagreements += 1;
                return false;
            }
        };

        self.hits += 1;
        if let Some(distance) = fast.t.zip(reference.t).and_then(|(a, b)| ulp_distance(a, b)) {
            self.t_error.add_sample(distance);
        }
        for distance in fast
            .attributes
            .iter()
            .zip(&reference.attributes)
            .filter_map(|(&a, &b)| ulp_distance(a, b))
        {
            self.attribute_error.add_sample(distance);
        }
        true
    }

    pub fn add_triangle<P: Real>(&mut self, triangle: &Triangle<Vec3>, ray: &Ray) -> Result<(), GeometryError> {
        let fast = triangle.intersect(ray)?.map(|hit| HitSample::from_triangle(&hit));
        let reference = triangle
            .map_coords(P::from_f32)
            .intersect(&ray.map_coords(P::from_f32))?
            .map(|hit| HitSample::from_triangle(&hit));
        self.record_logged("triangle", ray, fast, reference);
        Ok(())
    }

    pub fn add_sphere<P: Real>(&mut self, sphere: &Sphere, ray: &Ray) -> Result<(), GeometryError> {
        let fast = sphere.intersect(ray)?.map(|hit| HitSample::from_sphere(&hit));
        let reference = sphere
            .map_coords(P::from_f32)
            .intersect(&ray.map_coords(P::from_f32))?
            .map(|hit| HitSample::from_sphere(&hit));
        self.record_logged("sphere", ray, fast, reference);
        Ok(())
    }

    pub fn add_box<P: Real>(
        &mut self,
        aabb: &AxisAlignedBox,
        ray: &Ray,
        strategy: BoxStrategy,
    ) -> Result<(), GeometryError> {
        let fast = HitSample::from_box(aabb, ray, strategy)?;
        let reference = HitSample::from_box(
            &aabb.map_coords(P::from_f32),
            &ray.map_coords(P::from_f32),
            strategy,
        )?;
        self.record_logged("box", ray, fast, reference);
        Ok(())
    }

    /// Checks a triangle against every ray.
    pub fn triangle<P: Real>(
        triangle: &Triangle<Vec3>,
        rays: impl IntoIterator<Item = Ray>,
    ) -> Result<Self, GeometryError> {
        let mut report = Self::default();
        for ray in rays {
            report.add_triangle::<P>(triangle, &ray)?;
        }
        Ok(report)
    }

    pub fn sphere<P: Real>(sphere: &Sphere, rays: impl IntoIterator<Item = Ray>) -> Result<Self, GeometryError> {
        let mut report = Self::default();
        for ray in rays {
            report.add_sphere::<P>(sphere, &ray)?;
        }
        Ok(report)
    }

    pub fn aabb<P: Real>(
        aabb: &AxisAlignedBox,
        strategy: BoxStrategy,
        rays: impl IntoIterator<Item = Ray>,
    ) -> Result<Self, GeometryError> {
        let mut report = Self::default();
        for ray in rays {
            report.add_box::<P>(aabb, &ray, strategy)?;
        }
        Ok(report)
    }

    pub fn merge(&self, other: &Self) -> Self {
        CrossCheckReport {
            rays: self.rays + other.rays,
            hits: self.hits + other.hits,
            disagreements: self.disagreements + other.disagreements,
            t_error: self.t_error.merge(&other.t_error),
            attribute_error: self.attribute_error.merge(&other.attribute_error),
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.disagreements == 0
    }

    fn record_logged(&mut self, primitive: &str, ray: &Ray, fast: Option<HitSample>, reference: Option<HitSample>) {
        if !self.record(fast.as_ref(), reference.as_ref()) {
            log::debug!("{primitive}: precisions disagree for {ray:?}, single {fast:?}, reference {reference:?}");
        }
    }
}

impl Display for CrossCheckReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rays, {} hits, {} disagreements; t: {}; attributes: {}",
            self.rays, self.hits, self.disagreements, self.t_error, self.attribute_error
        )
    }
}
