// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::adapter::path::JsonPath;
use crate::constants::wait::MAX_TIMEOUT;
use crate::error::{AdapterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Per-call settings for server-side apply and post-apply waiting
#[derive(Debug, Clone, PartialEq)]
pub struct OperationOptions {
    pub field_manager: String,
    pub force_conflicts: bool,
    pub wait_for: Vec<WaitCondition>,
}

impl OperationOptions {
    /// Apply per-resource overrides on top of provider defaults
    pub fn with_overrides(
        mut self,
        field_manager: Option<&str>,
        force_conflicts: Option<bool>,
    ) -> Self {
        if let Some(manager) = field_manager.filter(|m| !m.is_empty()) {
            self.field_manager = manager.to_string();
        }
        if let Some(force) = force_conflicts {
            self.force_conflicts = force;
        }
        self
    }

    pub fn with_wait_for(mut self, wait_for: Vec<WaitCondition>) -> Self {
        self.wait_for = wait_for;
        self
    }
}

/// A path that must exist, optionally with a given value, on the stored object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitCondition {
    #[serde(rename = "jsonpath")]
    pub json_path: JsonPath,
    #[serde(rename = "value", default, skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<String>,
    #[serde(default)]
    pub timeout: WaitTimeout,
}

impl WaitCondition {
    pub fn new(json_path: &str) -> Result<Self> {
        Ok(Self {
            json_path: JsonPath::parse(json_path)?,
            expected_value: None,
            timeout: WaitTimeout::Once,
        })
    }

    pub fn expecting(mut self, value: &str) -> Self {
        self.expected_value = Some(value.to_string());
        self
    }

    pub fn within(mut self, timeout: WaitTimeout) -> Self {
        self.timeout = timeout;
        self
    }
}

/// How long a wait condition may be retried.
///
/// Parsed from a signed duration string: `0s` checks once, a positive
/// duration bounds the polling, a negative one waits up to a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WaitTimeout {
    #[default]
    Once,
    Within(Duration),
    Week,
}

impl WaitTimeout {
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let (negative, magnitude) = match text.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let duration = humantime::parse_duration(magnitude)
            .map_err(|e| AdapterError::Config(format!("invalid wait timeout '{}': {}", text, e)))?;

        Ok(match (negative, duration.is_zero()) {
            (_, true) => WaitTimeout::Once,
            (true, false) => WaitTimeout::Week,
            (false, false) => WaitTimeout::Within(duration),
        })
    }

    /// Total time the condition may be polled for
    pub fn duration(&self) -> Duration {
        match self {
            WaitTimeout::Once => Duration::ZERO,
            WaitTimeout::Within(d) => *d,
            WaitTimeout::Week => MAX_TIMEOUT,
        }
    }
}

impl fmt::Display for WaitTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitTimeout::Once => f.write_str("0s"),
            WaitTimeout::Within(d) => write!(f, "{}", humantime::format_duration(*d)),
            WaitTimeout::Week => f.write_str("-1s"),
        }
    }
}

impl TryFrom<String> for WaitTimeout {
    type Error = AdapterError;

    fn try_from(value: String) -> Result<Self> {
        WaitTimeout::parse(&value)
    }
}

impl From<WaitTimeout> for String {
    fn from(value: WaitTimeout) -> Self {
        value.to_string()
    }
}
