//! Plücker coordinate orientation tests of a ray against the box edges (Mahovsky & Wyvill).

use crate::util::real::Real;

use super::{Edge, EdgeSigns, Vec3};

/// Plücker coordinates of a directed line, in the component order used by the side product.
#[derive(Clone, Debug, PartialEq)]
pub struct PluckerLine<T>([T; 6]);

impl<T: Real> PluckerLine<T> {
    /// Line of a ray with origin `o` and direction `d`.
    pub fn from_ray(o: &Vec3<T>, d: &Vec3<T>) -> Self {
        let m = |a: &T, b: &T, c: &T, e: &T| a.clone() * b.clone() - c.clone() * e.clone();
        PluckerLine([
            m(&o.x, &d.y, &d.x, &o.y),
            m(&o.x, &d.z, &d.x, &o.z),
            -d.x.clone(),
            m(&o.y, &d.z, &d.y, &o.z),
            -d.z.clone(),
            d.y.clone(),
        ])
    }

    /// Line through points `a` and `b`.
    pub fn from_points(a: &Vec3<T>, b: &Vec3<T>) -> Self {
        let m = |p: &T, q: &T, r: &T, s: &T| p.clone() * q.clone() - r.clone() * s.clone();
        PluckerLine([
            m(&a.x, &b.y, &b.x, &a.y),
            m(&a.x, &b.z, &b.x, &a.z),
            a.x.clone() - b.x.clone(),
            m(&a.y, &b.z, &b.y, &a.z),
            a.z.clone() - b.z.clone(),
            b.y.clone() - a.y.clone(),
        ])
    }

    /// Permuted inner product of the two lines.
    /// Its sign tells on which side of `edge` this line passes.
    pub fn side(&self, edge: &PluckerLine<T>) -> T {
        let [r0, r1, r2, r3, r4, r5] = &self.0;
        let [l0, l1, l2, l3, l4, l5] = &edge.0;
        r2.clone() * l3.clone()
            + r5.clone() * l1.clone()
            + r4.clone() * l0.clone()
            + r1.clone() * l5.clone()
            + r0.clone() * l4.clone()
            + r3.clone() * l2.clone()
    }
}

/// Full test: builds the Plücker line of every edge and takes the side product.
/// A sign bit is set when the side product is negative.
pub fn edge_signs<T: Real>(ray_line: &PluckerLine<T>, corners: &[Vec3<T>; 8]) -> EdgeSigns {
    EdgeSigns::from_fn(|edge| {
        let (a, b) = edge.corners();
        let edge_line = PluckerLine::from_points(&corners[a], &corners[b]);
        ray_line.side(&edge_line) < T::zero()
    })
}

/// Reduced test: every box edge is parallel to an axis, so most of the edge
/// coordinates vanish and the side product collapses to three terms.
/// Produces the same signs as [`edge_signs`] up to rounding.
pub fn edge_signs_optimized<T: Real>(ray_line: &PluckerLine<T>, corners: &[Vec3<T>; 8]) -> EdgeSigns {
    let [r0, r1, r2, r3, r4, r5] = &ray_line.0;
    let c = |i: usize| &corners[i];
    let zero = T::zero();
    let p = |a: &T, b: &T| a.clone() * b.clone();

    EdgeSigns::from_fn(|edge| {
        let value = match edge {
            Edge::E01 => p(r2, &c(0).z) - p(r4, &c(0).x) - r1.clone(),
            Edge::E12 => p(r5, &c(1).z) + p(r4, &c(1).y) + r3.clone(),
            Edge::E23 => -p(r2, &c(2).z) + p(r4, &c(2).x) + r1.clone(),
            Edge::E30 => -p(r5, &c(3).z) - p(r4, &c(3).y) - r3.clone(),
            Edge::E67 => p(r2, &c(6).z) - p(r4, &c(6).x) - r1.clone(),
            Edge::E74 => -p(r5, &c(7).z) - p(r4, &c(7).y) - r3.clone(),
            Edge::E45 => -p(r2, &c(4).z) + p(r4, &c(4).x) + r1.clone(),
            Edge::E56 => p(r5, &c(5).z) + p(r4, &c(5).y) + r3.clone(),
            Edge::E36 => -p(r2, &c(3).y) - p(r5, &c(3).x) + r0.clone(),
            Edge::E50 => p(r2, &c(5).y) + p(r5, &c(5).x) - r0.clone(),
            Edge::E14 => -p(r2, &c(1).y) - p(r5, &c(1).x) + r0.clone(),
            Edge::E72 => p(r2, &c(7).y) + p(r5, &c(7).x) - r0.clone(),
        };
        value < zero
    })
}
