//! Dataset generation: batch-shorten N random URLs and write the files

use crate::error::DatasetError;
use crate::generator::UrlGenerator;
use crate::operation::ShortenOperation;
use crate::output::write_dataset;
use shortbench_batch::{BatchConfig, BatchRunner};
use shortbench_config::DatasetConfig;
use shortbench_http::ShortenerClient;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Outcome of a successful generation run
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    pub count: usize,
    pub elapsed: Duration,
}

/// Generate a dataset of (URL, alias) pairs
///
/// Runs `config.count` shorten requests with at most `config.concurrency`
/// in flight. On any failure the whole run fails and no files are touched.
pub async fn generate_dataset(
    config: &DatasetConfig,
    client: ShortenerClient,
) -> Result<GenerationSummary, DatasetError> {
    let runner = BatchRunner::new(BatchConfig {
        concurrency: config.concurrency,
        progress_interval: (config.progress_interval > 0).then_some(config.progress_interval),
        operation_timeout: None,
    });

    let generator = UrlGenerator::new();
    let operation = Arc::new(ShortenOperation::new(client));

    let start = Instant::now();
    let results = runner.run(config.count, &generator, operation).await?;
    write_dataset(&config.urls_file, &config.aliases_file, &results)?;
    let elapsed = start.elapsed();

    info!(
        count = results.len(),
        elapsed_secs = elapsed.as_secs_f64(),
        "Dataset generation complete"
    );

    Ok(GenerationSummary {
        count: results.len(),
        elapsed,
    })
}
