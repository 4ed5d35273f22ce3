// passvet - password strength analysis and generation

pub mod analysis;
pub mod audit;
pub mod config;
pub mod error;
pub mod generator;
pub mod output;

pub use analysis::report::AnalysisReport;
pub use analysis::{analyze, default_analyzer, Analyzer, AnalyzerConfig};
pub use error::{Error, Result};
pub use generator::{generate, GeneratorOptions};
