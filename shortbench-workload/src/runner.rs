//! The replay runner: spawns weighted users, runs for a fixed duration

use crate::behaviors::{AuthUser, CoreUser, UnlockUser, UserBehavior};
use crate::error::WorkloadError;
use crate::stats::{StatsRecorder, WorkloadSummary};
use shortbench_config::WorkloadConfig;
use shortbench_dataset::Dataset;
use shortbench_http::{ClientConfig, ShortenerClient};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, info};
use url::Url;

/// Drives a fixed-duration replay of weighted virtual users
pub struct WorkloadRunner {
    config: WorkloadConfig,
    client_config: ClientConfig,
    base_url: Url,
    dataset: Arc<Dataset>,
    stats: StatsRecorder,
}

impl WorkloadRunner {
    pub fn new(
        config: WorkloadConfig,
        client_config: ClientConfig,
        base_url: Url,
        dataset: Dataset,
    ) -> Self {
        Self {
            config,
            client_config,
            base_url,
            dataset: Arc::new(dataset),
            stats: StatsRecorder::new(),
        }
    }

    /// Run the replay to completion and return the summary
    pub async fn run(&self) -> Result<WorkloadSummary, WorkloadError> {
        if self.dataset.is_empty() {
            return Err(WorkloadError::EmptyDataset);
        }

        let weights = [
            self.config.weights.core,
            self.config.weights.auth,
            self.config.weights.unlock,
        ];
        let counts = apportion(self.config.users, &weights);
        info!(
            core_users = counts[0],
            auth_users = counts[1],
            unlock_users = counts[2],
            duration_secs = self.config.duration.as_secs(),
            "Starting replay"
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut users: JoinSet<()> = JoinSet::new();

        for _ in 0..counts[0] {
            let behavior = CoreUser::new(
                self.new_client()?,
                self.dataset.clone(),
                self.stats.clone(),
                self.config.top_alias_bias,
                self.config.core_throughput,
            );
            users.spawn(user_loop(behavior, shutdown_rx.clone()));
        }
        for _ in 0..counts[1] {
            let behavior = AuthUser::new(
                self.new_client()?,
                self.stats.clone(),
                self.config.think_time_min,
                self.config.think_time_max,
            );
            users.spawn(user_loop(behavior, shutdown_rx.clone()));
        }
        for _ in 0..counts[2] {
            let behavior = UnlockUser::new(
                self.new_client()?,
                self.dataset.clone(),
                self.stats.clone(),
                self.config.think_time_min,
                self.config.think_time_max,
            );
            users.spawn(user_loop(behavior, shutdown_rx.clone()));
        }

        let start = Instant::now();
        tokio::time::sleep(self.config.duration).await;

        // Users stop at their next iteration boundary
        let _ = shutdown_tx.send(true);
        while users.join_next().await.is_some() {}
        let elapsed = start.elapsed();

        let summary = self.stats.summary(elapsed);
        summary.log();
        Ok(summary)
    }

    /// One client per user: each virtual user carries its own session
    fn new_client(&self) -> Result<ShortenerClient, WorkloadError> {
        Ok(ShortenerClient::new(
            self.base_url.clone(),
            &self.client_config,
        )?)
    }
}

/// Run one user until shutdown is signaled
async fn user_loop<B: UserBehavior>(mut behavior: B, mut shutdown: watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow() {
            break;
        }

        let start = Instant::now();
        behavior.run_iteration().await;
        let pause = behavior.pause(start.elapsed());

        tokio::select! {
            _ = tokio::time::sleep(pause) => {}
            _ = shutdown.changed() => break,
        }
    }
    debug!(behavior = behavior.name(), "User stopped");
}

/// Apportion `total` users across behaviors by weight (largest remainder)
fn apportion(total: usize, weights: &[u32]) -> Vec<usize> {
    let weight_sum: u64 = weights.iter().map(|w| u64::from(*w)).sum();
    if weight_sum == 0 || total == 0 {
        return vec![0; weights.len()];
    }

    let mut counts: Vec<usize> = Vec::with_capacity(weights.len());
    let mut remainders: Vec<(usize, u64)> = Vec::with_capacity(weights.len());
    let mut assigned = 0;

    for (index, weight) in weights.iter().enumerate() {
        let exact = total as u64 * u64::from(*weight);
        let count = (exact / weight_sum) as usize;
        counts.push(count);
        remainders.push((index, exact % weight_sum));
        assigned += count;
    }

    // Hand out the leftovers to the largest remainders
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for (index, _) in remainders.into_iter().take(total - assigned) {
        counts[index] += 1;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apportion_matches_locust_weights() {
        assert_eq!(apportion(50, &[800, 180, 20]), vec![40, 9, 1]);
        assert_eq!(apportion(1000, &[800, 180, 20]), vec![800, 180, 20]);
    }

    #[test]
    fn apportion_distributes_remainders() {
        let counts = apportion(10, &[800, 180, 20]);
        assert_eq!(counts.iter().sum::<usize>(), 10);
        assert_eq!(counts, vec![8, 2, 0]);
    }

    #[test]
    fn apportion_handles_degenerate_inputs() {
        assert_eq!(apportion(0, &[1, 1]), vec![0, 0]);
        assert_eq!(apportion(5, &[0, 0]), vec![0, 0]);
        assert_eq!(apportion(1, &[800, 180, 20]), vec![1, 0, 0]);
    }
}
