//! Core traffic: redirect lookups and shortening

use super::{observe, UserBehavior};
use crate::pacing::WaitModel;
use crate::sampler::{sample_biased, sample_uniform};
use crate::stats::StatsRecorder;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shortbench_dataset::Dataset;
use shortbench_http::{ShortenRequest, ShortenerClient};
use std::sync::Arc;
use std::time::Duration;

/// The bulk of the traffic: 80% redirect lookups of popular aliases,
/// 20% shortening of previously seen URLs
pub struct CoreUser {
    client: ShortenerClient,
    dataset: Arc<Dataset>,
    stats: StatsRecorder,
    rng: StdRng,
    top_alias_bias: f64,
    wait: WaitModel,
}

impl CoreUser {
    pub fn new(
        client: ShortenerClient,
        dataset: Arc<Dataset>,
        stats: StatsRecorder,
        top_alias_bias: f64,
        iterations_per_second: f64,
    ) -> Self {
        Self {
            client,
            dataset,
            stats,
            rng: StdRng::from_rng(&mut rand::rng()),
            top_alias_bias,
            wait: WaitModel::ConstantThroughput(iterations_per_second),
        }
    }
}

#[async_trait]
impl UserBehavior for CoreUser {
    fn name(&self) -> &'static str {
        "core"
    }

    async fn run_iteration(&mut self) {
        if self.rng.random_range(0..100) < 80 {
            let alias =
                sample_biased(&mut self.rng, &self.dataset.aliases, self.top_alias_bias)
                    .to_string();
            observe(&self.stats, "/r/", 307, self.client.resolve(&alias)).await;
        } else {
            let url = sample_uniform(&mut self.rng, &self.dataset.urls).to_string();
            observe(
                &self.stats,
                "/api/shorten",
                201,
                self.client.shorten(&ShortenRequest::new(url)),
            )
            .await;
        }
    }

    fn pause(&mut self, iteration_elapsed: Duration) -> Duration {
        self.wait.pause(&mut self.rng, iteration_elapsed)
    }
}
