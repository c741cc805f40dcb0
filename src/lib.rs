pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod logging;
pub mod pipeline;
pub mod utils;

pub use analysis::*;
pub use data::*;
pub use error::FilterError;
pub use filter::*;
pub use pipeline::*;

pub type Result<T> = anyhow::Result<T>;
