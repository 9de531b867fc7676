pub mod generation;
pub mod processing;
pub mod utils;
