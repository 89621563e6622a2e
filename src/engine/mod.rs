pub mod layers;
pub mod markers;
pub mod phase;
pub mod transition;
