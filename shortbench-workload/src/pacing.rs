//! Wait-time models between user iterations

use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;

/// How a user paces itself between iterations
#[derive(Debug, Clone)]
pub enum WaitModel {
    /// Target a fixed number of iterations per second per user; the pause
    /// shrinks by however long the iteration itself took
    ConstantThroughput(f64),

    /// Uniformly random think time between two bounds
    Between(Duration, Duration),
}

impl WaitModel {
    /// Pause to apply after an iteration that took `iteration_elapsed`
    pub fn pause(&self, rng: &mut StdRng, iteration_elapsed: Duration) -> Duration {
        match self {
            WaitModel::ConstantThroughput(per_second) => {
                let target = Duration::from_secs_f64(1.0 / per_second.max(f64::MIN_POSITIVE));
                target.saturating_sub(iteration_elapsed)
            }
            WaitModel::Between(min, max) => {
                let (low, high) = (min.as_millis() as u64, max.as_millis() as u64);
                Duration::from_millis(rng.random_range(low..=high.max(low)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn constant_throughput_subtracts_iteration_time() {
        let mut rng = StdRng::seed_from_u64(1);
        let model = WaitModel::ConstantThroughput(1.0);
        let pause = model.pause(&mut rng, Duration::from_millis(300));
        assert_eq!(pause, Duration::from_millis(700));
    }

    #[test]
    fn constant_throughput_never_goes_negative() {
        let mut rng = StdRng::seed_from_u64(2);
        let model = WaitModel::ConstantThroughput(2.0);
        let pause = model.pause(&mut rng, Duration::from_secs(5));
        assert_eq!(pause, Duration::ZERO);
    }

    #[test]
    fn between_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let model = WaitModel::Between(Duration::from_millis(50), Duration::from_millis(150));
        for _ in 0..100 {
            let pause = model.pause(&mut rng, Duration::ZERO);
            assert!(pause >= Duration::from_millis(50) && pause <= Duration::from_millis(150));
        }
    }
}
