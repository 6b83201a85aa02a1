//! CLI command implementations

pub mod summarize;

pub use summarize::SummarizeArgs;
