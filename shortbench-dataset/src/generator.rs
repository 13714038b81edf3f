//! Random URL synthesis

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shortbench_batch::InputProducer;
use std::sync::Mutex;
use uuid::Uuid;

const SCHEMES: [&str; 2] = ["https", "http"];

const HOSTS: [&str; 5] = [
    "example.com",
    "news.ycombinator.com",
    "en.wikipedia.org",
    "github.com",
    "stackoverflow.com",
];

const PATH_WORDS: [&str; 16] = [
    "alpha",
    "beta",
    "gamma",
    "delta",
    "docs",
    "blog",
    "post",
    "item",
    "api",
    "v1",
    "how-to",
    "guide",
    "tips",
    "notes",
    "release",
    "changelog",
];

const QUERY_REFS: [&str; 5] = ["a", "b", "c", "newsletter", "social"];

/// Probability of appending an opaque hex path segment
const P_UUID_SEGMENT: f64 = 0.25;

/// Probability of appending a `?ref=...&id=...` query
const P_INCLUDE_QUERY: f64 = 0.6;

/// Synthesizes random but plausible-looking URLs
///
/// Seedable so tests can fix the sequence; the default constructor seeds
/// from the thread-local generator.
pub struct UrlGenerator {
    rng: Mutex<StdRng>,
}

impl Default for UrlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlGenerator {
    /// Create a generator with a random seed
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_rng(&mut rand::rng())),
        }
    }

    /// Create a generator with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Generate one random URL
    pub fn generate(&self) -> String {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let scheme = SCHEMES[rng.random_range(0..SCHEMES.len())];
        let host = HOSTS[rng.random_range(0..HOSTS.len())];

        let mut segments: Vec<String> = Vec::new();
        for _ in 0..rng.random_range(1..=4) {
            segments.push(PATH_WORDS[rng.random_range(0..PATH_WORDS.len())].to_string());
        }

        // Sometimes include an opaque segment
        if rng.random_bool(P_UUID_SEGMENT) {
            let hex = Uuid::new_v4().simple().to_string();
            segments.push(hex[..12].to_string());
        }

        let mut url = format!("{}://{}/{}", scheme, host, segments.join("/"));

        // Sometimes include a query
        if rng.random_bool(P_INCLUDE_QUERY) {
            let reference = QUERY_REFS[rng.random_range(0..QUERY_REFS.len())];
            let id = rng.random_range(1..=1_000_000u32);
            url.push_str(&format!("?ref={}&id={}", reference, id));
        }

        url
    }
}

impl InputProducer for UrlGenerator {
    type Input = String;

    fn produce(&self, _index: usize) -> String {
        self.generate()
    }
}
