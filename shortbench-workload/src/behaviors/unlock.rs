//! Password-protected link flow

use super::{observe, UserBehavior};
use crate::pacing::WaitModel;
use crate::sampler::{random_string, sample_uniform};
use crate::stats::StatsRecorder;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shortbench_dataset::Dataset;
use shortbench_http::{ShortenRequest, ShortenerClient};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Creates a password-protected link, confirms the redirect bounces to
/// the unlock page, then unlocks it with the password
pub struct UnlockUser {
    client: ShortenerClient,
    dataset: Arc<Dataset>,
    stats: StatsRecorder,
    rng: StdRng,
    wait: WaitModel,
}

impl UnlockUser {
    pub fn new(
        client: ShortenerClient,
        dataset: Arc<Dataset>,
        stats: StatsRecorder,
        think_time_min: Duration,
        think_time_max: Duration,
    ) -> Self {
        Self {
            client,
            dataset,
            stats,
            rng: StdRng::from_rng(&mut rand::rng()),
            wait: WaitModel::Between(think_time_min, think_time_max),
        }
    }
}

#[async_trait]
impl UserBehavior for UnlockUser {
    fn name(&self) -> &'static str {
        "unlock"
    }

    async fn run_iteration(&mut self) {
        let url = sample_uniform(&mut self.rng, &self.dataset.urls).to_string();
        let password = random_string(&mut self.rng, 16);

        let Some(alias) = observe(
            &self.stats,
            "/api/shorten",
            201,
            self.client
                .shorten(&ShortenRequest::protected(url.clone(), password.clone())),
        )
        .await
        else {
            return;
        };

        // The protected link must bounce to its unlock page
        let start = Instant::now();
        match self.client.resolve(&alias).await {
            Ok(location) if location == format!("/unlock/{alias}") => {
                self.stats.record_success("/r/", 307, start.elapsed());
            }
            Ok(location) => {
                debug!(%alias, %location, "Protected link did not point at its unlock page");
                self.stats.record_failure("/r/");
                return;
            }
            Err(error) => {
                debug!(%alias, error = %error, "Redirect lookup failed");
                self.stats.record_failure("/r/");
                return;
            }
        }

        let start = Instant::now();
        match self.client.unlock(&alias, &password).await {
            Ok(unlocked) if unlocked == url => {
                self.stats
                    .record_success("/api/unlock/", 200, start.elapsed());
            }
            Ok(unlocked) => {
                debug!(%alias, expected = %url, got = %unlocked, "Unlock returned a different URL");
                self.stats.record_failure("/api/unlock/");
            }
            Err(error) => {
                debug!(%alias, error = %error, "Unlock failed");
                self.stats.record_failure("/api/unlock/");
            }
        }
    }

    fn pause(&mut self, iteration_elapsed: Duration) -> Duration {
        self.wait.pause(&mut self.rng, iteration_elapsed)
    }
}
