pub mod analysis;
pub mod scoring;
pub mod signals;

pub use analysis::*;
pub use scoring::*;
pub use signals::*;
