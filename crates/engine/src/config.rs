//! Story configuration loaded from the environment.

use std::path::Path;

/// Environment variable toggling mismatch diagnostics.
pub const DIAGNOSTICS_ENV: &str = "STORYLINE_DIAGNOSTICS";

/// Environment variable capping serialized values in diagnostics.
pub const MAX_DIAGNOSTIC_LEN_ENV: &str = "STORYLINE_MAX_DIAGNOSTIC_LEN";

/// Maximum serialized value length before truncation (10KB).
pub const DEFAULT_MAX_DIAGNOSTIC_LEN: usize = 10 * 1024;

/// Configuration for a story double
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryConfig {
    /// Report mismatches and exhaustion to the diagnostic sink
    pub diagnostics: bool,
    /// Byte cap for serialized values embedded in error messages
    pub max_diagnostic_len: usize,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            diagnostics: true,
            max_diagnostic_len: DEFAULT_MAX_DIAGNOSTIC_LEN,
        }
    }
}

impl StoryConfig {
    /// Builds the configuration from the process environment.
    ///
    /// `.env.local` and `.env` in the working directory are loaded first when
    /// present (local overrides win).
    ///
    /// # Environment Variables
    ///
    /// * `STORYLINE_DIAGNOSTICS`: `0`, `false`, `off` or `no` disable diagnostics
    /// * `STORYLINE_MAX_DIAGNOSTIC_LEN`: byte cap for serialized values (default: 10240)
    pub fn from_env() -> Self {
        for filename in [".env.local", ".env"] {
            load_env_file(Path::new(filename));
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let diagnostics = lookup(DIAGNOSTICS_ENV)
            .map(|raw| !matches!(raw.trim().to_lowercase().as_str(), "0" | "false" | "off" | "no"))
            .unwrap_or(defaults.diagnostics);

        let max_diagnostic_len = match lookup(MAX_DIAGNOSTIC_LEN_ENV) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    "Invalid {}, using default {}",
                    MAX_DIAGNOSTIC_LEN_ENV,
                    defaults.max_diagnostic_len
                );
                defaults.max_diagnostic_len
            }),
            None => defaults.max_diagnostic_len,
        };

        Self {
            diagnostics,
            max_diagnostic_len,
        }
    }

    /// Disable diagnostics reporting.
    pub fn without_diagnostics(mut self) -> Self {
        self.diagnostics = false;
        self
    }

    /// Set the serialized value cap.
    pub fn with_max_diagnostic_len(mut self, max: usize) -> Self {
        self.max_diagnostic_len = max;
        self
    }
}

/// Loads `path` into the process environment if it exists.
///
/// Returns whether the file was loaded. Unreadable or malformed files are
/// logged and skipped.
fn load_env_file(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }
    match dotenvy::from_path(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "Failed to load env file");
            false
        }
    }
}
