//! Sampling helpers for virtual users

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::Rng;

/// Random alphanumeric string of the given length
pub fn random_string(rng: &mut StdRng, length: usize) -> String {
    rng.sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Random throwaway username
pub fn random_username(rng: &mut StdRng) -> String {
    format!("{}@test.local", random_string(rng, 10))
}

/// Random URL outside the generated dataset
pub fn random_url(rng: &mut StdRng) -> String {
    let path = random_string(rng, 10);
    let query = random_string(rng, 6);
    format!("https://example.com/{path}?q={query}")
}

/// Uniform sample from a non-empty slice
pub fn sample_uniform<'a>(rng: &mut StdRng, items: &'a [String]) -> &'a str {
    &items[rng.random_range(0..items.len())]
}

/// Sample biased towards the first fifth of the slice
///
/// With probability `p_top` the sample comes from the first fifth (the
/// "popular" aliases), otherwise from the whole slice.
pub fn sample_biased<'a>(rng: &mut StdRng, items: &'a [String], p_top: f64) -> &'a str {
    let top = (items.len() / 5).max(1);
    if rng.random_bool(p_top) {
        &items[rng.random_range(0..top)]
    } else {
        &items[rng.random_range(0..items.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn items(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("alias{i}")).collect()
    }

    #[test]
    fn random_string_is_alphanumeric() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = random_string(&mut rng, 16);
        assert_eq!(s.len(), 16);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn random_username_has_domain() {
        let mut rng = StdRng::seed_from_u64(2);
        assert!(random_username(&mut rng).ends_with("@test.local"));
    }

    #[test]
    fn fully_biased_sampling_stays_in_top_fifth() {
        let mut rng = StdRng::seed_from_u64(3);
        let items = items(100);
        for _ in 0..500 {
            let sample = sample_biased(&mut rng, &items, 1.0);
            let index: usize = sample.strip_prefix("alias").unwrap().parse().unwrap();
            assert!(index < 20);
        }
    }

    #[test]
    fn unbiased_sampling_reaches_the_tail() {
        let mut rng = StdRng::seed_from_u64(4);
        let items = items(100);
        let tail_hit = (0..500).any(|_| {
            let sample = sample_biased(&mut rng, &items, 0.0);
            let index: usize = sample.strip_prefix("alias").unwrap().parse().unwrap();
            index >= 20
        });
        assert!(tail_hit);
    }

    #[test]
    fn biased_sampling_handles_tiny_lists() {
        let mut rng = StdRng::seed_from_u64(5);
        let items = items(3);
        for _ in 0..50 {
            let _ = sample_biased(&mut rng, &items, 0.8);
        }
    }
}
