//! Position weight matrix validation, pseudocount smoothing and sequence scoring in Rust

pub mod batch;
pub mod config;
pub mod error;
pub mod pwm;
pub mod scoring;
pub mod sequence;
pub mod types;

pub use config::EngineConfig;
pub use error::{PwmError, Result};
pub use pwm::{validate_map, validate_map_with, Pwm};
pub use sequence::NtSeq;
pub use types::{Nucleotide, PosProb, PwmMap, NUCLEOTIDES};
