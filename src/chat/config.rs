//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling client behavior. A YAML profile file can hold
//! the settings that rarely change; command-line arguments override it.

use std::path::Path;
use std::time::Duration;

use arrrg_derive::CommandLine;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Command-line arguments shared by the parley binaries.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Server URL to talk to.
    #[arrrg(optional, "Server URL (default: $PARLEY_SERVER_URL)", "URL")]
    pub server: Option<String>,

    /// Profile file with saved settings.
    #[arrrg(optional, "Load settings from this YAML profile", "FILE")]
    pub profile: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECS")]
    pub timeout: Option<u64>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Disable error-screening of reply text.
    #[arrrg(flag, "Never restyle replies that look like errors")]
    pub no_screening: bool,
}

/// Saved settings, loaded from a YAML profile file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Server URL to talk to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    /// Whether to use ANSI colors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_color: Option<bool>,

    /// Whether replies that look like errors get error styling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_replies: Option<bool>,

    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Profile {
    /// Load a profile from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|err| Error::io("failed to read profile", err))?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Save this profile to a YAML file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path.as_ref(), content)
            .map_err(|err| Error::io("failed to write profile", err))
    }
}

/// Resolved configuration for a chat client.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// The server URL; `None` falls back to the environment.
    pub server_url: Option<String>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Whether replies whose text contains "error" (case-insensitive) get
    /// error styling despite a success status.
    pub screen_replies: bool,

    /// Request timeout; `None` uses the client default.
    pub timeout: Option<Duration>,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Server: from the environment
    /// - Color: enabled
    /// - Reply screening: enabled
    /// - Timeout: client default
    pub fn new() -> Self {
        Self {
            server_url: None,
            use_color: true,
            screen_replies: true,
            timeout: None,
        }
    }

    /// Sets the server URL.
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = Some(server_url.into());
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Sets whether reply screening is enabled.
    pub fn with_screening(mut self, enabled: bool) -> Self {
        self.screen_replies = enabled;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overlays saved profile settings. Explicit arguments still win.
    pub fn apply_profile(mut self, profile: &Profile) -> Self {
        if let Some(server_url) = &profile.server_url {
            self.server_url = Some(server_url.clone());
        }
        if let Some(use_color) = profile.use_color {
            self.use_color = use_color;
        }
        if let Some(screen_replies) = profile.screen_replies {
            self.screen_replies = screen_replies;
        }
        if let Some(timeout_secs) = profile.timeout_secs {
            self.timeout = Some(Duration::from_secs(timeout_secs));
        }
        self
    }

    /// Resolves the full configuration: defaults, then the profile named in
    /// `args` (if any), then the arguments themselves.
    pub fn resolve(args: ChatArgs) -> Result<Self> {
        let mut config = ChatConfig::new();
        if let Some(path) = &args.profile {
            let profile = Profile::from_file(path)?;
            config = config.apply_profile(&profile);
        }
        if let Some(server) = args.server {
            config.server_url = Some(server);
        }
        if let Some(secs) = args.timeout {
            config.timeout = Some(Duration::from_secs(secs));
        }
        if args.no_color {
            config.use_color = false;
        }
        if args.no_screening {
            config.screen_replies = false;
        }
        Ok(config)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}
