use dashmap::DashMap;
use std::time::{Duration, Instant};

// Per-identity window state
pub struct ClientWindow {
    pub count: u32,
    pub reset_at: Instant,
}

// Admission decision for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Admit,
    Reject { retry_after_secs: u64 },
}

// Fixed-window rate limiter, one counter per client identity.
//
// Windows roll over lazily on the next touch, nothing sweeps in the
// background. A burst straddling a reset boundary can therefore see up to
// 2x the cap inside a rolling window; that imprecision is part of the
// contract. Entries are never evicted, so the map grows with the number of
// distinct identities seen.
pub struct RateLimiter {
    windows: DashMap<String, ClientWindow>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests,
            window,
        }
    }

    pub fn check(&self, identity: &str) -> Decision {
        self.check_at(identity, Instant::now())
    }

    // The dashmap entry guard is held for the whole lookup-mutate sequence,
    // so two concurrent requests for the same identity cannot both observe
    // count < max. The guard drops before this returns; the upstream call
    // never runs under it.
    pub fn check_at(&self, identity: &str, now: Instant) -> Decision {
        let mut entry = self
            .windows
            .entry(identity.to_string())
            .or_insert_with(|| ClientWindow {
                count: 0,
                reset_at: now + self.window,
            });

        // window expired? reset it
        if now > entry.reset_at {
            entry.count = 0;
            entry.reset_at = now + self.window;
        }

        if entry.count >= self.max_requests {
            let remaining = entry.reset_at.saturating_duration_since(now);
            let retry_after_secs = (remaining.as_secs_f64().ceil() as u64).max(1);
            return Decision::Reject { retry_after_secs };
        }

        entry.count += 1;
        Decision::Admit
    }

    #[cfg(test)]
    fn count_for(&self, identity: &str) -> u32 {
        self.windows.get(identity).map(|w| w.count).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> RateLimiter {
        RateLimiter::new(5, Duration::from_secs(60))
    }

    #[test]
    fn admits_up_to_the_cap() {
        let rl = limiter();
        let t0 = Instant::now();
        for i in 1..=5 {
            assert_eq!(rl.check_at("a", t0), Decision::Admit, "request {i}");
        }
        assert_eq!(rl.count_for("a"), 5);
    }

    #[test]
    fn rejects_the_sixth_with_retry_hint() {
        let rl = limiter();
        let t0 = Instant::now();
        for _ in 0..5 {
            rl.check_at("a", t0);
        }
        match rl.check_at("a", t0 + Duration::from_secs(1)) {
            Decision::Reject { retry_after_secs } => {
                assert_eq!(retry_after_secs, 59);
            }
            Decision::Admit => panic!("over-cap request was admitted"),
        }
    }

    #[test]
    fn retry_hint_is_positive_and_bounded() {
        let rl = limiter();
        let t0 = Instant::now();
        for _ in 0..5 {
            rl.check_at("a", t0);
        }
        match rl.check_at("a", t0) {
            Decision::Reject { retry_after_secs } => {
                assert!(retry_after_secs > 0);
                assert!(retry_after_secs <= 60);
            }
            Decision::Admit => panic!("over-cap request was admitted"),
        }
    }

    #[test]
    fn window_resets_lazily_after_expiry() {
        let rl = limiter();
        let t0 = Instant::now();
        for _ in 0..5 {
            rl.check_at("a", t0);
        }
        // past the reset boundary the counter behaves as freshly created
        assert_eq!(
            rl.check_at("a", t0 + Duration::from_secs(61)),
            Decision::Admit
        );
        assert_eq!(rl.count_for("a"), 1);
    }

    #[test]
    fn identities_do_not_share_counters() {
        let rl = limiter();
        let t0 = Instant::now();
        for _ in 0..5 {
            rl.check_at("a", t0);
        }
        assert!(matches!(rl.check_at("a", t0), Decision::Reject { .. }));
        assert_eq!(rl.check_at("b", t0), Decision::Admit);
    }

    #[test]
    fn first_request_creates_a_window() {
        let rl = limiter();
        assert_eq!(rl.check_at("fresh", Instant::now()), Decision::Admit);
        assert_eq!(rl.count_for("fresh"), 1);
    }

    #[test]
    fn boundary_straddling_burst_is_allowed() {
        // fixed-window behavior: a full budget just before the reset plus a
        // full budget just after, 10 admissions in a 2s rolling span
        let rl = limiter();
        let t0 = Instant::now();
        assert_eq!(rl.check_at("a", t0), Decision::Admit);
        for _ in 0..4 {
            assert_eq!(
                rl.check_at("a", t0 + Duration::from_secs(59)),
                Decision::Admit
            );
        }
        for _ in 0..5 {
            assert_eq!(
                rl.check_at("a", t0 + Duration::from_secs(61)),
                Decision::Admit
            );
        }
    }
}
