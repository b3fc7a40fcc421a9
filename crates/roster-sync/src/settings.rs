//! Sync tuning knobs, deserialised from a TOML file and the environment.

use std::path::Path;

use serde::Deserialize;

/// Tuning parameters for a synchronization walk.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
  /// Maximum identifier count per detail-fetch call — the remote API's
  /// batch limit.
  pub chunk_size:   usize,
  /// Hard cap on listing calls per walk. A circuit breaker against a
  /// remote whose cursor sequence never ends; never reached in correct
  /// operation.
  pub page_ceiling: u32,
}

impl Default for SyncSettings {
  fn default() -> Self {
    Self {
      chunk_size:   100,
      page_ceiling: 32_767,
    }
  }
}

impl SyncSettings {
  /// Load settings from a TOML file (missing file is fine) layered under
  /// `ROSTER_*` environment variables.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path.as_ref()).required(false))
      .add_source(config::Environment::with_prefix("ROSTER"))
      .build()?
      .try_deserialize()
  }
}
