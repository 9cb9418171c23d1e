//! Series bookkeeping for the cluster HUD: bounded histories, EWMA
//! smoothing, counter-to-rate conversion and the state they live in.

pub mod aggregate;
pub mod ewma;
pub mod format;
pub mod history;
pub mod rate;

pub use aggregate::{EngineState, Liveness};
pub use ewma::{append_smoothed, Ewma, DEFAULT_ALPHA};
pub use history::{append, MetricSeries};
pub use rate::{RateAnomaly, RateCalculator, RateOutcome, Rates};
