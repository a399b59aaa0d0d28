mod vector_2d;
mod bounding_region;
mod body;

pub use vector_2d::*;
pub use bounding_region::*;
pub use body::*;

#[cfg(test)]
mod bounding_region_tests;
#[cfg(test)]
mod body_tests;
