// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Fixed-delay pacing between sequential API calls.
//!
//! The collectors never inspect rate-limit headers; they pause for the same
//! interval between every pair of requests.

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

/// Conservative fixed-interval request pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct Pacer
{
    delay: Duration,
}

impl Pacer
{
    pub fn new(delay: Duration,) -> Self
    {
        Self {
            delay,
        }
    }

    /// Pacer that never sleeps, used against fixtures.
    pub fn immediate() -> Self
    {
        Self::new(Duration::ZERO,)
    }

    /// Waits for the configured interval.
    pub async fn pause(&self,)
    {
        if self.delay.is_zero() {
            return;
        }

        debug!("Pausing {}ms before the next request", self.delay.as_millis());
        sleep(self.delay,).await;
    }
}

impl Default for Pacer
{
    fn default() -> Self
    {
        Self::new(Duration::from_secs(1,),)
    }
}
