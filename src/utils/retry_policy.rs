// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

/// Retry policy for page fetches
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, the first one included
    pub max_attempts: u32,
    /// Wait after the first failed attempt
    pub initial_backoff: Duration,
    /// Upper bound for any single wait
    pub max_backoff: Duration,
    /// Growth factor between consecutive waits
    pub backoff_multiplier: f64,
    /// Random spread applied to each wait (0.0-1.0)
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(60),
            backoff_multiplier: 2.0,
            jitter_factor: 0.0,
        }
    }
}

impl RetryPolicy {
    /// Exponential policy with `max_attempts` attempts starting at `initial_backoff`
    pub fn exponential(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff,
            ..Self::default()
        }
    }

    /// Wait before the next attempt
    ///
    /// # Arguments
    ///
    /// * `failed_attempt` - zero-based index of the attempt that just failed
    ///
    /// # Returns
    ///
    /// `initial_backoff * multiplier^failed_attempt`, capped at `max_backoff`
    pub fn calculate_backoff(&self, failed_attempt: u32) -> Duration {
        let backoff_secs =
            self.initial_backoff.as_secs_f64() * self.backoff_multiplier.powi(failed_attempt as i32);
        let capped_backoff = backoff_secs.min(self.max_backoff.as_secs_f64());

        let final_backoff = if self.jitter_factor > 0.0 && capped_backoff > 0.0 {
            let jitter_range = capped_backoff * self.jitter_factor;
            let jitter = rand::random_range(-jitter_range..jitter_range);
            (capped_backoff + jitter).max(0.0)
        } else {
            capped_backoff
        };

        Duration::from_secs_f64(final_backoff)
    }

    /// Whether another attempt is allowed after `failed_attempt` failed
    pub fn should_retry(&self, failed_attempt: u32) -> bool {
        failed_attempt + 1 < self.max_attempts
    }
}
