//! Synthetic URL generation and dataset files
//!
//! The generation phase drives the batch requester against the shorten
//! endpoint and writes two parallel line-oriented files: one with the
//! generated URLs, one with the aliases the service returned, paired by
//! line number. Files are written only after the full batch succeeds.

pub mod error;
pub mod generate;
pub mod generator;
pub mod operation;
pub mod output;

pub use error::DatasetError;
pub use generate::{generate_dataset, GenerationSummary};
pub use generator::UrlGenerator;
pub use operation::ShortenOperation;
pub use output::{load_dataset, write_dataset, Dataset};
