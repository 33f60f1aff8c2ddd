//! Contract parser adapters.

mod go;

pub use go::GoContractParser;
