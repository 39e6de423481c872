// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Service configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! empty_fold_policy = "empty-result"   # or "reject"
//! strict_framing = false
//! log_tensors = true
//! channel_capacity = 16
//! ```

use crate::ServiceError;
use reduction::EmptyFoldPolicy;
use std::path::Path;

/// Configuration for the call adapter.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ServiceConfig {
    /// What a fold over zero messages returns.
    #[serde(default)]
    pub empty_fold_policy: EmptyFoldPolicy,
    /// Reject payloads whose length is not exactly `elements × width`.
    #[serde(default)]
    pub strict_framing: bool,
    /// Log every decoded tensor at `trace` level.
    #[serde(default = "default_true")]
    pub log_tensors: bool,
    /// Buffer size of in-process message channels.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_true() -> bool {
    true
}

fn default_channel_capacity() -> usize {
    16
}

impl ServiceConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ServiceError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ServiceError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ServiceError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ServiceError::ConfigError(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ServiceError> {
        toml::to_string_pretty(self)
            .map_err(|e| ServiceError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.channel_capacity == 0 {
            return Err(ServiceError::ConfigError(
                "channel_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            empty_fold_policy: EmptyFoldPolicy::EmptyResult,
            strict_framing: false,
            log_tensors: true,
            channel_capacity: default_channel_capacity(),
        }
    }
}
