//! Helpers for tests that drive the engine without real storage.

use crate::{
    config::Config,
    ledger::Ledger,
    state::{Memory, Store, StoreError},
    Layer,
};
use std::{io, path::PathBuf};

/// A store that fails every operation.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Io {
        path: PathBuf::from("unavailable"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "store unavailable"),
    }
}

impl Store for FailingStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Err(unavailable())
    }

    fn write(&mut self, _blob: &str) -> Result<(), StoreError> {
        Err(unavailable())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

/// Creates a layer over a fresh in-memory ledger with no presentation delays.
pub fn create_layer(seed: u64) -> Layer<Memory> {
    create_layer_with(Config::instant().with_seed(seed))
}

pub fn create_layer_with(config: Config) -> Layer<Memory> {
    let config = config.validate().expect("test config must be valid");
    Layer::new(Ledger::open(Memory::default()), config)
}

/// Creates a layer whose ledger starts with `balance`.
pub fn create_layer_with_balance(seed: u64, balance: u64) -> Layer<Memory> {
    let blob = format!(
        r#"{{"balance":{balance},"stats":{{"wagered":0,"won":0,"lost":0,"games":0,"wins":0,"biggestWin":0}}}}"#
    );
    let config = Config::instant()
        .with_seed(seed)
        .validate()
        .expect("test config must be valid");
    Layer::new(Ledger::open(Memory::with_blob(blob)), config)
}
