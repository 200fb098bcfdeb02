//! Analytics core and the pipeline that drives it.

pub mod decision;
pub mod levels;
pub mod pipeline;
pub mod report;
pub mod signals;

pub use decision::normalize;
pub use levels::compute_levels;
pub use pipeline::{PipelineCoordinator, PipelineSettings};
pub use signals::{compute_indicators, moving_average, rsi, DEFAULT_MA_WINDOW, DEFAULT_RSI_PERIOD};
