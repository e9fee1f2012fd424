//! Domain types: bars, series, bias, trade setups, closed trades.

pub mod bar;
pub mod bias;
pub mod series;
pub mod setup;
pub mod trade;

pub use bar::Bar;
pub use bias::Bias;
pub use series::{PriceSeries, SeriesError};
pub use setup::{SetupStatus, TradeSetup};
pub use trade::{ClosedTrade, ExitStatus};
