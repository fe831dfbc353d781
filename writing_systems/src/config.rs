// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry configuration.

use std::env;
use std::path::PathBuf;

use crate::PrefixPreference;

/// Font assigned to newly created writing systems unless configured otherwise.
pub const DEFAULT_FONT: &str = "Charis SIL";

/// What to do when a requested tag extends exactly one registered tag with extra variant or
/// private-use subtags (`en-US-fonipa` when `en-US` is registered).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExtensionPolicy {
    /// Register a new writing system alongside the existing one.
    #[default]
    Sibling,
    /// Rename the existing writing system to the requested tag, keeping its handle.
    ExtendExisting,
}

/// Configuration for a [`Registry`](crate::Registry).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Directory holding one file per writing system. `None` keeps the registry in memory.
    pub store_dir: Option<PathBuf>,
    /// Font assigned to newly created writing systems.
    pub default_font: String,
    /// How requests that extend a registered tag are resolved.
    pub extension_policy: ExtensionPolicy,
    /// Which entries [`Registry::find_by_prefix`](crate::Registry::find_by_prefix) may return
    /// when no entry matches exactly.
    pub prefix_preference: PrefixPreference,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            store_dir: None,
            default_font: DEFAULT_FONT.to_owned(),
            extension_policy: ExtensionPolicy::default(),
            prefix_preference: PrefixPreference::PrivateOnly,
        }
    }
}

impl RegistryConfig {
    /// Configuration for a registry that is never persisted.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Configuration persisting to `dir`.
    pub fn with_store_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store_dir = Some(dir.into());
        self
    }

    /// Sets the default font.
    pub fn with_default_font(mut self, font: impl Into<String>) -> Self {
        self.default_font = font.into();
        self
    }

    /// Sets the extension policy.
    pub fn with_extension_policy(mut self, policy: ExtensionPolicy) -> Self {
        self.extension_policy = policy;
        self
    }

    /// Sets the prefix match preference.
    pub fn with_prefix_preference(mut self, preference: PrefixPreference) -> Self {
        self.prefix_preference = preference;
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// - `WS_STORE_DIR`: store directory (unset or blank keeps the registry in memory)
    /// - `WS_DEFAULT_FONT`: default font (unset or blank uses [`DEFAULT_FONT`])
    pub fn from_env() -> Self {
        let non_blank = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(dir) = non_blank("WS_STORE_DIR") {
            config.store_dir = Some(PathBuf::from(dir));
        }
        if let Some(font) = non_blank("WS_DEFAULT_FONT") {
            config.default_font = font.trim().to_owned();
        }
        config
    }
}
