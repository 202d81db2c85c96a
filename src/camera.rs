use assert2::assert;
use bon::bon;

use crate::geometry::{Ray, Vec3};

/// Pinhole camera producing one ray per pixel of a `width` x `height` grid.
///
/// The ray through pixel `(x, y)` has direction `(x, y, screen_depth)`, the screen is
/// not centered on the view axis. Directions are not normalized.
#[derive(Copy, Clone, Debug)]
pub struct PinholeGrid {
    origin: Vec3,
    width: u32,
    height: u32,
    screen_depth: f32,
}

#[bon]
impl PinholeGrid {
    #[builder]
    pub fn new(#[builder(default = Vec3::zeros())] origin: Vec3, width: u32, height: u32, screen_depth: f32) -> Self {
        assert!(width > 0);
        assert!(height > 0);
        assert!(screen_depth.is_finite());
        assert!(screen_depth != 0.0);

        PinholeGrid {
            origin,
            width,
            height,
            screen_depth,
        }
    }
}

impl PinholeGrid {
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn ray(&self, x: u32, y: u32) -> Ray {
        Ray::new(self.origin, Vec3::new(x as f32, y as f32, self.screen_depth))
    }

    /// All rays, row by row.
    pub fn rays(&self) -> impl Iterator<Item = Ray> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| self.ray(x, y)))
    }
}
