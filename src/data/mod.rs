pub mod grid;
pub mod loader;
pub mod luminance;

pub use grid::*;
pub use loader::*;
pub use luminance::*;
