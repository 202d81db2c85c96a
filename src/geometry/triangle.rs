use std::ops::Index;

use nalgebra::Scalar;

use crate::util::real::Real;

use super::{GeometryError, Vec3, ensure_finite};

/// Three ordered vertices.
/// The winding decides the direction of the normal and therefore which side is the front.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle<Point>([Point; 3]);

impl<Point> Triangle<Point> {
    pub fn new(a: Point, b: Point, c: Point) -> Triangle<Point> {
        Triangle([a, b, c])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.0.iter()
    }

    pub fn map<Point2, F: FnMut(&Point) -> Point2>(&self, mut f: F) -> Triangle<Point2> {
        Triangle([f(&self.0[0]), f(&self.0[1]), f(&self.0[2])])
    }
}

impl<Point> Index<usize> for Triangle<Point> {
    type Output = Point;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T: Scalar> Triangle<Vec3<T>> {
    pub fn map_coords<T2: Scalar, F: FnMut(T) -> T2>(&self, mut f: F) -> Triangle<Vec3<T2>> {
        self.map(|v| v.map(&mut f))
    }
}

impl<T: Real> Triangle<Vec3<T>> {
    /// Like `new`, but rejects vertices with infinite or NaN coordinates.
    pub fn try_new(a: Vec3<T>, b: Vec3<T>, c: Vec3<T>) -> Result<Self, GeometryError> {
        let triangle = Triangle::new(a, b, c);
        for v in triangle.iter() {
            ensure_finite(v)?;
        }
        Ok(triangle)
    }

    /// Returns edge vectors, coming from self[0]
    pub fn edges(&self) -> [Vec3<T>; 2] {
        [&self.0[1] - &self.0[0], &self.0[2] - &self.0[0]]
    }

    /// Returns a normal vector of the triangle, not normalized.
    /// Its length is twice the triangle area.
    pub fn normal(&self) -> Vec3<T> {
        let [e1, e2] = self.edges();
        e1.cross(&e2)
    }

    /// Point given by barycentric coordinates, as `p0 + beta * (p1 - p0) + gamma * (p2 - p0)`.
    pub fn point_at(&self, coords: &BarycentricCoordinates<T>) -> Vec3<T> {
        let [e1, e2] = self.edges();
        &self.0[0] + (e1 * coords.beta.clone() + e2 * coords.gamma.clone())
    }

    /// Barycentric coordinates of a point in the triangle's plane (dot product / Cramer's rule form).
    /// Returns `None` for a degenerate triangle.
    pub fn barycentric_of(&self, point: &Vec3<T>) -> Option<BarycentricCoordinates<T>> {
        let [e1, e2] = self.edges();
        let to_point = point - &self.0[0];

        let dot11 = e1.dot(&e1);
        let dot12 = e1.dot(&e2);
        let dot22 = e2.dot(&e2);
        let dot1p = e1.dot(&to_point);
        let dot2p = e2.dot(&to_point);

        let det = dot11.clone() * dot22.clone() - dot12.clone() * dot12.clone();
        if det == T::zero() {
            return None;
        }

        Some(BarycentricCoordinates {
            beta: (dot22 * dot1p.clone() - dot12.clone() * dot2p.clone()) / det.clone(),
            gamma: (dot11 * dot2p - dot12 * dot1p) / det,
        })
    }

    /// Signed volume of the parallelepiped spanned by the triangle normal and `point - p1`,
    /// zero when the point lies in the triangle's plane.
    pub fn plane_volume(&self, point: &Vec3<T>) -> T {
        let normal = (&self.0[2] - &self.0[0]).cross(&(&self.0[1] - &self.0[0]));
        normal.dot(&(point - &self.0[1]))
    }
}

/// Barycentric coordinates of a point relative to a triangle `p0 p1 p2`:
/// `beta` is the weight of `p1`, `gamma` the weight of `p2`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BarycentricCoordinates<T> {
    pub beta: T,
    pub gamma: T,
}

impl<T: Real> BarycentricCoordinates<T> {
    /// Weight of `p0`.
    pub fn alpha(&self) -> T {
        T::one() - self.beta.clone() - self.gamma.clone()
    }

    pub fn interpolate(&self, a: &Vec3<T>, b: &Vec3<T>, c: &Vec3<T>) -> Vec3<T> {
        a * self.alpha() + b * self.beta.clone() + c * self.gamma.clone()
    }

    pub fn interpolate_triangle(&self, triangle: &Triangle<Vec3<T>>) -> Vec3<T> {
        self.interpolate(&triangle[0], &triangle[1], &triangle[2])
    }

    /// Recovers `p0` from the other two vertices and a point with these coordinates,
    /// `p0 = (beta * p1 + gamma * p2 - point) / (beta + gamma - 1)`.
    /// Returns `None` if the weight of `p0` is zero.
    pub fn solve_first_vertex(&self, p1: &Vec3<T>, p2: &Vec3<T>, point: &Vec3<T>) -> Option<Vec3<T>> {
        let divisor = self.beta.clone() + self.gamma.clone() - T::one();
        if divisor == T::zero() {
            return None;
        }
        let inv = T::one() / divisor;
        Some((p1 * self.beta.clone() + p2 * self.gamma.clone() - point) * inv)
    }

    /// Recovers `p1`, `p1 = p0 + (point - p0 - gamma * (p2 - p0)) / beta`.
    pub fn solve_second_vertex(&self, p0: &Vec3<T>, p2: &Vec3<T>, point: &Vec3<T>) -> Option<Vec3<T>> {
        Self::solve_vertex(&self.beta, &self.gamma, p0, p2, point)
    }

    /// Recovers `p2`, `p2 = p0 + (point - p0 - beta * (p1 - p0)) / gamma`.
    pub fn solve_third_vertex(&self, p0: &Vec3<T>, p1: &Vec3<T>, point: &Vec3<T>) -> Option<Vec3<T>> {
        Self::solve_vertex(&self.gamma, &self.beta, p0, p1, point)
    }

    fn solve_vertex(
        weight: &T,
        other_weight: &T,
        p0: &Vec3<T>,
        other: &Vec3<T>,
        point: &Vec3<T>,
    ) -> Option<Vec3<T>> {
        if *weight == T::zero() {
            return None;
        }
        let inv = T::one() / weight.clone();
        let offset = (point - p0) - (other - p0) * other_weight.clone();
        Some(p0 + offset * inv)
    }
}
