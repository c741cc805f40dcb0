pub mod median;
pub mod partition;

pub use median::*;
pub use partition::*;
