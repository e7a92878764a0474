//! Random realistic User-Agent generation.
//!
//! Backs the `"random"` sentinel accepted by
//! [`HttpClient::with_user_agent`](crate::HttpClient::with_user_agent):
//! each call composes a plausible desktop browser User-Agent from a small
//! set of engine templates and version ranges.

use rand::Rng;
use rand::seq::SliceRandom;

/// Sentinel value that requests a generated User-Agent instead of a literal.
pub(crate) const RANDOM_SENTINEL: &str = "random";

/// Desktop platform tokens used in generated User-Agents.
const DESKTOP_PLATFORMS: &[&str] = &[
    "Windows NT 10.0; Win64; x64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "X11; Linux x86_64",
];

/// Returns a pseudo-random realistic browser User-Agent string.
#[must_use]
pub fn random_user_agent() -> String {
    let mut rng = rand::thread_rng();
    let platform = DESKTOP_PLATFORMS
        .choose(&mut rng)
        .copied()
        .unwrap_or(DESKTOP_PLATFORMS[0]);

    match rng.gen_range(0..3u8) {
        0 => {
            let major = rng.gen_range(120..=131);
            format!(
                "Mozilla/5.0 ({platform}) AppleWebKit/537.36 (KHTML, like Gecko) \
                 Chrome/{major}.0.0.0 Safari/537.36"
            )
        }
        1 => {
            let major = rng.gen_range(115..=133);
            format!("Mozilla/5.0 ({platform}; rv:{major}.0) Gecko/20100101 Firefox/{major}.0")
        }
        _ => {
            let minor = rng.gen_range(3..=6);
            format!(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
                 (KHTML, like Gecko) Version/17.{minor} Safari/605.1.15"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_user_agent_looks_realistic() {
        for _ in 0..50 {
            let agent = random_user_agent();
            assert!(
                agent.starts_with("Mozilla/5.0 ("),
                "UA must carry the Mozilla prefix: {agent}"
            );
            assert!(
                agent.contains("Chrome/") || agent.contains("Firefox/") || agent.contains("Safari/"),
                "UA must name a browser: {agent}"
            );
        }
    }

    #[test]
    fn test_random_user_agent_is_never_the_sentinel() {
        for _ in 0..10 {
            assert_ne!(random_user_agent(), RANDOM_SENTINEL);
        }
    }
}
