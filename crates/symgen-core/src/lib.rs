//! symgen core: turns the Material Symbols manifest into C# icon constants.
//!
//! Pipeline: metadata → resolve → fetch (bounded pool) → svg cleanup → emit.

pub mod config;
pub mod error;
pub mod logging;

pub mod emit;
pub mod fetch;
pub mod generate;
pub mod http;
pub mod metadata;
pub mod resolve;
pub mod svg;

pub use error::{EmitError, GenerateError, HttpError, MetadataError};
pub use generate::{generate, FamilyProgress, FamilyReport, RunReport};
