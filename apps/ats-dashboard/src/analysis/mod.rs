// Analysis interpretation: the catalog of analysis types, score extraction from free text,
// and normalization of partially populated service responses. Pure code, no I/O.

pub mod catalog;
pub mod normalizer;
pub mod score_extraction;

pub use catalog::{AnalysisType, ANALYSIS_TYPES};
pub use normalizer::NormalizedScores;
