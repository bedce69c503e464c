//! Turn a CSV/TSV transcript listing into a `wav.scp` / `text` / `utt2spk`
//! data directory.

pub mod columns;
pub mod convert;
pub mod delimiter;
pub mod emit;
pub mod error;
pub mod ids;
pub mod paths;
pub mod pipeline;

pub use convert::{Conversion, PrepConfig, run};
pub use error::{PrepError, Result};
