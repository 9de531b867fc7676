pub mod error;
pub mod geometry;
