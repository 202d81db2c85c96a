use nalgebra::Scalar;

use crate::util::real::{Real, fast_max, fast_min};

use super::{Axis, GeometryError, Vec3, ensure_finite};

/// Axis aligned box given by two diagonally opposite corners.
///
/// Corners are numbered as in the edge orientation tests: `v0` has the largest
/// coordinates on all axes, `v7` the smallest, and the remaining six corners
/// are derived by taking single coordinates from one or the other:
///
/// ```text
/// v1 = (v0.x, v7.y, v0.z)    v4 = (v0.x, v7.y, v7.z)
/// v2 = (v7.x, v7.y, v0.z)    v5 = (v0.x, v0.y, v7.z)
/// v3 = (v7.x, v0.y, v0.z)    v6 = (v7.x, v0.y, v7.z)
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AxisAlignedBox<T = f32> {
    v0: Vec3<T>,
    v7: Vec3<T>,
}

impl<T: Real> AxisAlignedBox<T> {
    /// Creates a box from any two opposite corners.
    /// The corners are reordered so that `v0` is the maximum corner.
    pub fn new(a: Vec3<T>, b: Vec3<T>) -> Result<Self, GeometryError> {
        ensure_finite(&a)?;
        ensure_finite(&b)?;
        if let Some(axis) = Axis::ALL.into_iter().find(|axis| a[axis.index()] == b[axis.index()]) {
            return Err(GeometryError::DegenerateBox { axis });
        }

        let v0 = a.zip_map(&b, |x, y| fast_max(x, y));
        let v7 = a.zip_map(&b, |x, y| fast_min(x, y));
        Ok(AxisAlignedBox { v0, v7 })
    }

    pub fn v0(&self) -> &Vec3<T> {
        &self.v0
    }

    pub fn v7(&self) -> &Vec3<T> {
        &self.v7
    }

    /// All eight corners, indexed `v0` to `v7`.
    pub fn corners(&self) -> [Vec3<T>; 8] {
        let (hi, lo) = (&self.v0, &self.v7);
        let corner = |x: &Vec3<T>, y: &Vec3<T>, z: &Vec3<T>| Vec3::new(x.x.clone(), y.y.clone(), z.z.clone());
        [
            hi.clone(),
            corner(hi, lo, hi),
            corner(lo, lo, hi),
            corner(lo, hi, hi),
            corner(hi, lo, lo),
            corner(hi, hi, lo),
            corner(lo, hi, lo),
            lo.clone(),
        ]
    }

    pub fn center(&self) -> Vec3<T> {
        let two = T::one() + T::one();
        (&self.v0 + &self.v7) / two
    }

    /// Whether the point is inside or on the boundary.
    pub fn contains(&self, point: &Vec3<T>) -> bool {
        (0..3).all(|i| point[i] <= self.v0[i] && point[i] >= self.v7[i])
    }
}

impl<T: Scalar> AxisAlignedBox<T> {
    /// Maps coordinates through a monotonic increasing function, keeping the corner order.
    pub fn map_coords<T2: Scalar, F: FnMut(T) -> T2>(&self, mut f: F) -> AxisAlignedBox<T2> {
        AxisAlignedBox {
            v0: self.v0.map(&mut f),
            v7: self.v7.map(&mut f),
        }
    }
}
