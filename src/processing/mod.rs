pub mod bounds;
pub mod clip;
pub mod normalize;
pub mod pipeline;
pub mod rewind;
