//! Workload replay configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the traffic replay phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Total number of concurrent virtual users
    #[serde(default = "default_users")]
    pub users: usize,

    /// How long to run the replay
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_duration"
    )]
    pub duration: Duration,

    /// Relative weights of the user behaviors
    #[serde(default)]
    pub weights: BehaviorWeights,

    /// Target iterations per second for core users
    #[serde(default = "default_core_throughput")]
    pub core_throughput: f64,

    /// Lower bound of the think time between auth/unlock iterations
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_think_time_min"
    )]
    pub think_time_min: Duration,

    /// Upper bound of the think time between auth/unlock iterations
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_think_time_max"
    )]
    pub think_time_max: Duration,

    /// Probability of sampling an alias from the most popular fifth
    #[serde(default = "default_top_alias_bias")]
    pub top_alias_bias: f64,
}

/// Relative weights controlling how users are apportioned across behaviors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorWeights {
    /// Redirect/shorten traffic
    pub core: u32,
    /// Authenticated link-management flows
    pub auth: u32,
    /// Password-protected unlock flows
    pub unlock: u32,
}

impl Default for BehaviorWeights {
    fn default() -> Self {
        Self {
            core: 800,
            auth: 180,
            unlock: 20,
        }
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            users: default_users(),
            duration: default_duration(),
            weights: BehaviorWeights::default(),
            core_throughput: default_core_throughput(),
            think_time_min: default_think_time_min(),
            think_time_max: default_think_time_max(),
            top_alias_bias: default_top_alias_bias(),
        }
    }
}

fn default_users() -> usize {
    50
}

fn default_duration() -> Duration {
    Duration::from_secs(60)
}

fn default_core_throughput() -> f64 {
    1.0
}

fn default_think_time_min() -> Duration {
    Duration::from_secs(5)
}

fn default_think_time_max() -> Duration {
    Duration::from_secs(15)
}

fn default_top_alias_bias() -> f64 {
    0.8
}

impl Validatable for WorkloadConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.users as u64, "users", self.domain_name())?;

        if self.duration.is_zero() {
            return Err(self.validation_error("duration must be greater than 0"));
        }

        let weight_sum = self.weights.core + self.weights.auth + self.weights.unlock;
        if weight_sum == 0 {
            return Err(self.validation_error("behavior weights must not all be zero"));
        }

        if self.core_throughput <= 0.0 {
            return Err(self.validation_error("core_throughput must be greater than 0"));
        }

        if self.think_time_min > self.think_time_max {
            return Err(self.validation_error(format!(
                "think_time_min ({}s) exceeds think_time_max ({}s)",
                self.think_time_min.as_secs(),
                self.think_time_max.as_secs()
            )));
        }

        if !(0.0..=1.0).contains(&self.top_alias_bias) {
            return Err(self.validation_error("top_alias_bias must be between 0 and 1"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "workload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_weights_rejected() {
        let config = WorkloadConfig {
            weights: BehaviorWeights {
                core: 0,
                auth: 0,
                unlock: 0,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_think_time_rejected() {
        let config = WorkloadConfig {
            think_time_min: Duration::from_secs(20),
            think_time_max: Duration::from_secs(10),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bias_out_of_range_rejected() {
        let config = WorkloadConfig {
            top_alias_bias: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
