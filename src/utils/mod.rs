pub mod errors;
mod constants;
mod constants_config;
mod logger;

pub use errors::BarnesHutError;
pub use constants::*;
pub use constants_config::*;
pub use logger::*;
