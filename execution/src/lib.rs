pub mod casino;
pub mod config;
pub mod ledger;
pub mod scheduler;
pub mod state;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

mod layer;

pub use config::{Config, ConfigError, Timings, ValidatedConfig};
pub use layer::{Layer, Phase};
pub use ledger::Ledger;
pub use state::{JsonFile, Memory, Store, StoreError};
