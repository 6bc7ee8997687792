pub mod hit_testing;

pub use hit_testing::{distance_to_geometry, distance_to_line_segment};
