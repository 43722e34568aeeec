//! Release analysis - from tag names and raw commit records to a
//! next-version decision

pub mod release_analyzer;
pub mod version_calculator;

pub use release_analyzer::{ReleaseAnalyzer, ReleaseCalculationResult};
