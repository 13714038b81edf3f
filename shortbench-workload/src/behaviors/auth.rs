//! Authenticated link-management flow

use super::{observe, UserBehavior};
use crate::pacing::WaitModel;
use crate::sampler::{random_string, random_url, random_username};
use crate::stats::StatsRecorder;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shortbench_http::{Credentials, ShortenRequest, ShortenerClient};
use std::time::{Duration, Instant};
use tracing::debug;

/// A registered user managing their own links: authenticate, shorten a
/// handful of URLs, list them, delete them all, log out
pub struct AuthUser {
    client: ShortenerClient,
    stats: StatsRecorder,
    rng: StdRng,
    credentials: Credentials,
    registered: bool,
    wait: WaitModel,
}

impl AuthUser {
    pub fn new(
        client: ShortenerClient,
        stats: StatsRecorder,
        think_time_min: Duration,
        think_time_max: Duration,
    ) -> Self {
        let mut rng = StdRng::from_rng(&mut rand::rng());
        let credentials = Credentials {
            username: random_username(&mut rng),
            password: random_string(&mut rng, 16),
        };
        Self {
            client,
            stats,
            rng,
            credentials,
            registered: false,
            wait: WaitModel::Between(think_time_min, think_time_max),
        }
    }
}

#[async_trait]
impl UserBehavior for AuthUser {
    fn name(&self) -> &'static str {
        "auth"
    }

    async fn run_iteration(&mut self) {
        // Restore the session first, in case a previous iteration was cut
        // short between login and logout
        let start = Instant::now();
        let alive = match self.client.session_alive().await {
            Ok(alive) => {
                let status = if alive { 200 } else { 401 };
                self.stats
                    .record_success("/api/auth/me", status, start.elapsed());
                alive
            }
            Err(error) => {
                debug!(error = %error, "Session restore failed");
                self.stats.record_failure("/api/auth/me");
                return;
            }
        };

        if !alive {
            if !self.registered {
                if observe(
                    &self.stats,
                    "/api/auth/register",
                    200,
                    self.client.register(&self.credentials),
                )
                .await
                .is_none()
                {
                    return;
                }
                self.registered = true;
            } else if observe(
                &self.stats,
                "/api/auth/login",
                200,
                self.client.login(&self.credentials),
            )
            .await
            .is_none()
            {
                return;
            }
        }

        for _ in 0..self.rng.random_range(1..=10) {
            let url = random_url(&mut self.rng);
            if observe(
                &self.stats,
                "/api/shorten",
                201,
                self.client.shorten(&ShortenRequest::new(url)),
            )
            .await
            .is_none()
            {
                return;
            }
        }

        let Some(links) = observe(
            &self.stats,
            "/api/user/list",
            200,
            self.client.list_links(),
        )
        .await
        else {
            return;
        };

        for link in links {
            if observe(
                &self.stats,
                "/api/user/link",
                204,
                self.client.delete_link(&link.alias),
            )
            .await
            .is_none()
            {
                return;
            }
        }

        observe(&self.stats, "/api/user/logout", 204, self.client.logout()).await;
    }

    fn pause(&mut self, iteration_elapsed: Duration) -> Duration {
        self.wait.pause(&mut self.rng, iteration_elapsed)
    }
}
