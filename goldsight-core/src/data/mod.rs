//! Data layer — bar providers and offline import.

pub mod csv_import;
pub mod provider;
pub mod twelvedata;

pub use csv_import::{read_csv, read_csv_str};
pub use provider::{BarProvider, DataError};
pub use twelvedata::TwelveDataProvider;
