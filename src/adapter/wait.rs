// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Bounded polling of a stored object until a path condition holds.

use crate::adapter::options::WaitCondition;
use crate::adapter::path::render_value;
use crate::error::{AdapterError, Result};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

impl WaitCondition {
    /// Whether the condition holds for the given object
    pub fn is_met(&self, object: &Value) -> bool {
        match self.json_path.evaluate(object) {
            None | Some(Value::Null) => false,
            Some(found) => self
                .expected_value
                .as_deref()
                .map_or(true, |expected| render_value(found) == expected),
        }
    }
}

/// Polls until a condition holds, the deadline passes or the caller cancels
pub struct WaitPoller<'a> {
    identity: &'a str,
    interval: Duration,
    cancel: &'a CancellationToken,
}

impl<'a> WaitPoller<'a> {
    pub fn new(identity: &'a str, interval: Duration, cancel: &'a CancellationToken) -> Self {
        Self {
            identity,
            interval,
            cancel,
        }
    }

    /// `fetch` returns the current object, or `None` when it does not exist
    pub async fn wait<F, Fut>(&self, condition: &WaitCondition, mut fetch: F) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<Value>>>,
    {
        let deadline = Instant::now() + condition.timeout.duration();
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let object = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(self.timed_out(condition)),
                object = fetch() => object?,
            };

            if object.as_ref().is_some_and(|o| condition.is_met(o)) {
                info!(
                    "Condition {} met on {} after {} attempt(s)",
                    condition.json_path, self.identity, attempts
                );
                return Ok(());
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(self.timed_out(condition));
            }

            let pause = self.interval.min(deadline - now);
            debug!(
                "Condition {} not met on {}, retrying in {:?}",
                condition.json_path, self.identity, pause
            );
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(self.timed_out(condition)),
                _ = sleep(pause) => {}
            }
        }
    }

    fn timed_out(&self, condition: &WaitCondition) -> AdapterError {
        AdapterError::WaitTimeout {
            identity: self.identity.to_string(),
            path: condition.json_path.to_string(),
        }
    }
}
