mod camera;
pub mod geometry;
pub mod precision;
mod util;

pub use camera::PinholeGrid;
pub use util::Stats;
pub use util::float_bits::{BitsDisplay, ulp_distance, veltkamp_split};
pub use util::real::{Real, fast_max, fast_min};
