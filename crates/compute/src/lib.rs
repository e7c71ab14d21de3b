pub mod analysis;
pub mod data_point;
pub mod prediction;
pub mod sampling;

pub use analysis::*;
pub use data_point::*;
pub use prediction::*;
pub use sampling::*;
