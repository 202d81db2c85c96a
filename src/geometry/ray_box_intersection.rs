use std::fmt::Display;

use crate::util::real::{Real, fast_max, fast_min};

use super::{
    Axis, AxisAlignedBox, Edge, EdgeSigns, FaceMask, GeometryError, Ray, RayIntersectionExt, Vec3,
    plucker::{self, PluckerLine},
};

/// Orientation test used to decide on which side of each box edge the ray passes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EdgeTest {
    /// Sign of the volume spanned by the ray and the edge (2x2 cofactors of the scalar triple product)
    GeometricVolume,
    /// Sign of the full Plücker side product with each edge line
    Plucker,
    /// Plücker side product reduced for axis aligned edges
    PluckerOptimized,
}

/// Ray/box intersection method. All strategies answer the same question and agree
/// on everything except rays grazing an edge or a corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoxStrategy {
    /// Kay & Kajiya slabs, comparing entry and exit distances per axis
    Slab,
    /// Edge orientation signs combined into face hits
    Edges(EdgeTest),
}

impl BoxStrategy {
    pub const ALL: [BoxStrategy; 4] = [
        BoxStrategy::Slab,
        BoxStrategy::Edges(EdgeTest::GeometricVolume),
        BoxStrategy::Edges(EdgeTest::Plucker),
        BoxStrategy::Edges(EdgeTest::PluckerOptimized),
    ];
}

impl Display for BoxStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BoxStrategy::Slab => "slab",
            BoxStrategy::Edges(EdgeTest::GeometricVolume) => "volume",
            BoxStrategy::Edges(EdgeTest::Plucker) => "plucker",
            BoxStrategy::Edges(EdgeTest::PluckerOptimized) => "plucker_optimized",
        };
        f.write_str(name)
    }
}

/// All strategies test the whole line of the ray, not just the part in front of the origin.
impl<T: Real> AxisAlignedBox<T> {
    pub fn intersect_with(&self, ray: &Ray<T>, strategy: BoxStrategy) -> Result<bool, GeometryError> {
        match strategy {
            BoxStrategy::Slab => {
                let (t_min, t_max) = self.slab_interval(ray)?;
                Ok(t_min <= t_max)
            }
            BoxStrategy::Edges(test) => Ok(!self.face_mask(ray, test)?.is_empty()),
        }
    }

    /// Distances along the normalized ray direction where its line enters and leaves the box.
    /// The line intersects the box if `t_min <= t_max`.
    ///
    /// Zero direction components divide to infinities. When the origin also lies
    /// on a bounding plane of that axis the ratio is NaN, and the compare and select
    /// min / max skip it in favor of the other bound.
    pub fn slab_interval(&self, ray: &Ray<T>) -> Result<(T, T), GeometryError> {
        let direction = ray.unit_direction()?;

        let t0 = (self.v0() - &ray.origin).zip_map(&direction, |a, d| a / d);
        let t1 = (self.v7() - &ray.origin).zip_map(&direction, |a, d| a / d);

        let near = |i: usize| fast_min(t0[i].clone(), t1[i].clone());
        let far = |i: usize| fast_max(t0[i].clone(), t1[i].clone());

        let t_min = fast_max(near(0), fast_max(near(1), near(2)));
        let t_max = fast_min(far(0), fast_min(far(1), far(2)));
        Ok((t_min, t_max))
    }

    /// Faces through which the ray line enters the box, empty for a miss.
    pub fn face_mask(&self, ray: &Ray<T>, test: EdgeTest) -> Result<FaceMask, GeometryError> {
        let direction = ray.unit_direction()?;
        let corners = self.corners();

        let (signs, mask) = match test {
            EdgeTest::GeometricVolume => {
                let signs = volume_signs(&corners, &ray.origin, &direction);
                (signs, FaceMask::from_volume_signs(signs))
            }
            EdgeTest::Plucker => {
                let line = PluckerLine::from_ray(&ray.origin, &direction);
                let signs = plucker::edge_signs(&line, &corners);
                (signs, FaceMask::from_plucker_signs(signs))
            }
            EdgeTest::PluckerOptimized => {
                let line = PluckerLine::from_ray(&ray.origin, &direction);
                let signs = plucker::edge_signs_optimized(&line, &corners);
                (signs, FaceMask::from_plucker_signs(signs))
            }
        };

        log::trace!("{test:?}: edge signs {:012b}, faces {mask}", signs.bits());
        Ok(mask)
    }
}

impl<T: Real> RayIntersectionExt<T> for AxisAlignedBox<T> {
    type Hit = bool;

    /// Slab test, see [`AxisAlignedBox::intersect_with`] for the other strategies.
    fn intersect(&self, ray: &Ray<T>) -> Result<bool, GeometryError> {
        self.intersect_with(ray, BoxStrategy::Slab)
    }
}

/// Orientation of the ray relative to each edge, as the sign of one 2x2 cofactor of
/// the volume spanned by the ray origin, the ray origin moved by the direction and the edge.
/// Only the cofactor for the edge's axis is nonzero, so that is all that gets computed.
fn volume_signs<T: Real>(corners: &[Vec3<T>; 8], origin: &Vec3<T>, direction: &Vec3<T>) -> EdgeSigns {
    use Axis::*;
    let zero = T::zero();

    EdgeSigns::from_fn(|edge| {
        // (corner, cofactor axes, passes when positive)
        let (corner, (i, j), positive) = match edge {
            Edge::E01 => (0, (Z, X), true),
            Edge::E12 => (1, (Y, Z), true),
            Edge::E23 => (2, (Z, X), false),
            Edge::E30 => (3, (Y, Z), false),
            Edge::E67 => (6, (Z, X), true),
            Edge::E74 => (7, (Y, Z), false),
            Edge::E45 => (4, (Z, X), false),
            Edge::E56 => (5, (Y, Z), true),
            Edge::E36 => (3, (Y, X), true),
            Edge::E50 => (5, (Y, X), false),
            Edge::E14 => (4, (Y, X), true),
            Edge::E72 => (7, (Y, X), false),
        };
        let (i, j) = (i.index(), j.index());

        let bo = origin - &corners[corner];
        let ad = direction + &bo;
        let cofactor = ad[i].clone() * bo[j].clone() - ad[j].clone() * bo[i].clone();

        if positive { cofactor > zero } else { cofactor < zero }
    })
}
