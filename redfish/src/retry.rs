// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Reliability shim for BMC-class devices.
//!
//! [`Monitor::execute`] runs an operation at most `max_retries + 1` times.
//! Each attempt is preceded by a health probe of the controller and bounded
//! by a per-attempt timeout. Retryable failures are repeated with a linear
//! back-off; anything else is returned at once.
//!
//! ```no_run
//! # use rsfish::retry::{Monitor, RetryConfig};
//! # use rsfish::manager::Manager;
//! # use rsfish::Resource as _;
//! # use tokio_util::sync::CancellationToken;
//! # async fn example<B: rsfish_core::Bmc + 'static>(manager: Manager<B>) -> Result<(), rsfish::Error<B>> {
//! let cancel = CancellationToken::new();
//! let monitor = Monitor::new(&manager, RetryConfig::default());
//! let refreshed = monitor.execute(&cancel, || manager.refresh()).await?;
//! # Ok(())
//! # }
//! ```

use crate::Error;
use rsfish_core::Bmc;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::warn;

/// Parameters of the retry loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Time limit of a single attempt.
    pub timeout: Duration,
    /// Attempts after the first one.
    pub max_retries: u32,
    /// Force a controller reset when the last health probe fails.
    pub reset_on_timeout: bool,
    /// Wait after attempt `n` is `(n + 1) * base_interval`.
    pub base_interval: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            reset_on_timeout: false,
            base_interval: Duration::from_secs(1),
        }
    }
}

impl RetryConfig {
    /// Set per-attempt timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Enable or disable the forced reset.
    #[must_use]
    pub const fn with_reset_on_timeout(mut self, reset_on_timeout: bool) -> Self {
        self.reset_on_timeout = reset_on_timeout;
        self
    }

    /// Set back-off unit.
    #[must_use]
    pub const fn with_base_interval(mut self, base_interval: Duration) -> Self {
        self.base_interval = base_interval;
        self
    }
}

/// Controller health check and recovery.
pub trait HealthProbe<B: Bmc>: Send + Sync {
    /// Cheap check that the controller answers.
    fn probe(&self) -> impl Future<Output = Result<(), Error<B>>> + Send;

    /// Reset the controller.
    fn force_reset(&self) -> impl Future<Output = Result<(), Error<B>>> + Send;
}

impl<B: Bmc, P: HealthProbe<B>> HealthProbe<B> for &P {
    fn probe(&self) -> impl Future<Output = Result<(), Error<B>>> + Send {
        (**self).probe()
    }

    fn force_reset(&self) -> impl Future<Output = Result<(), Error<B>>> + Send {
        (**self).force_reset()
    }
}

/// Runs operations under health probes and retries.
pub struct Monitor<P> {
    probe: P,
    config: RetryConfig,
}

impl<P> Monitor<P> {
    /// Create monitor using `probe` to check the controller.
    pub const fn new(probe: P, config: RetryConfig) -> Self {
        Self { probe, config }
    }

    /// Parameters of the monitor.
    pub const fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Run `op` until it succeeds, fails with a non-retryable error or
    /// attempts run out.
    ///
    /// # Errors
    ///
    /// - [`Error::Cancelled`] once `cancel` fires;
    /// - [`Error::Unresponsive`] if the last health probe fails;
    /// - [`Error::ResetPerformed`] or [`Error::ResetFailed`] if the last
    ///   health probe fails and `reset_on_timeout` is set;
    /// - the first non-retryable error of `op`;
    /// - the last error of `op` when attempts run out.
    pub async fn execute<B, T, F, Fut>(
        &self,
        cancel: &CancellationToken,
        mut op: F,
    ) -> Result<T, Error<B>>
    where
        B: Bmc + 'static,
        P: HealthProbe<B>,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Error<B>>>,
    {
        let max_retries = self.config.max_retries;
        let mut attempt = 0;
        loop {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            let last = attempt >= max_retries;

            let probe = tokio::select! {
                () = cancel.cancelled() => return Err(Error::Cancelled),
                probe = self.probe.probe() => probe,
            };
            if let Err(err) = probe {
                warn!(attempt, error = %err, "health probe failed");
                if last {
                    return Err(self.give_up(attempt, err).await);
                }
                self.wait(cancel, attempt).await?;
                attempt += 1;
                continue;
            }

            let outcome = tokio::select! {
                () = cancel.cancelled() => return Err(Error::Cancelled),
                outcome = timeout(self.config.timeout, op()) => outcome,
            };
            let err = match outcome {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(err)) => err,
                Err(_) => Error::DeadlineExceeded(self.config.timeout),
            };
            if !err.is_retryable() {
                debug!(attempt, error = %err, "non-retryable failure");
                return Err(err);
            }
            if last {
                warn!(attempts = attempt + 1, error = %err, "retries exhausted");
                return Err(err);
            }
            debug!(attempt, error = %err, "retryable failure");
            self.wait(cancel, attempt).await?;
            attempt += 1;
        }
    }

    async fn give_up<B>(&self, attempt: u32, err: Error<B>) -> Error<B>
    where
        B: Bmc + 'static,
        P: HealthProbe<B>,
    {
        if !self.config.reset_on_timeout {
            return Error::Unresponsive {
                attempts: attempt + 1,
                source: Box::new(err),
            };
        }
        warn!("forcing controller reset");
        match self.probe.force_reset().await {
            Ok(()) => Error::ResetPerformed {
                source: Box::new(err),
            },
            Err(reset) => Error::ResetFailed {
                reset: Box::new(reset),
                source: Box::new(err),
            },
        }
    }

    async fn wait<B: Bmc>(&self, cancel: &CancellationToken, attempt: u32) -> Result<(), Error<B>> {
        let delay = self.config.base_interval * (attempt + 1);
        tokio::select! {
            () = cancel.cancelled() => Err(Error::Cancelled),
            () = sleep(delay) => Ok(()),
        }
    }
}
