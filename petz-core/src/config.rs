//! Configuration for the PETZ pet system.
//!
//! Maps directly to `petz.toml`. Game rules are fixed once loaded; the
//! `[admin]` section seeds [`AdminSettings`], which operators may retune at
//! runtime.

use std::num::NonZeroU64;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{PetzError, Result};

/// Top-level PETZ configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetzConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Stat decay and interaction constants.
    #[serde(default)]
    pub rules: StatRules,
    /// Operator-tunable parameters.
    #[serde(default)]
    pub admin: AdminConfig,
}

impl PetzConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `PetzError::Config` if the TOML is invalid or fails validation.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| PetzError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check that every value the engine divides by or clamps to is usable.
    ///
    /// # Errors
    /// Returns `PetzError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;
        XpPerLevel::new(self.admin.xp_per_level)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

/// Fixed game constants governing decay and interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRules {
    /// Upper bound for hunger and happiness.
    #[serde(default = "default_max_stat")]
    pub max_stat: u32,
    /// Length of one decay interval in seconds.
    #[serde(default = "default_decay_interval")]
    pub decay_interval_secs: u64,
    /// Points of hunger and happiness lost per full interval.
    #[serde(default = "default_decay_rate")]
    pub decay_rate: u32,
    /// Hunger restored by one feeding (before clamping).
    #[serde(default = "default_feed_replenish")]
    pub feed_replenish: u32,
    /// Experience gained per training session.
    #[serde(default = "default_train_xp")]
    pub train_xp_gain: u64,
    /// Happiness spent per training session.
    #[serde(default = "default_train_cost")]
    pub train_happiness_cost: u32,
}

impl Default for StatRules {
    fn default() -> Self {
        Self {
            max_stat: 100,
            decay_interval_secs: 3600,
            decay_rate: 1,
            feed_replenish: 25,
            train_xp_gain: 10,
            train_happiness_cost: 5,
        }
    }
}

impl StatRules {
    /// # Errors
    /// Returns `PetzError::Config` for a zero stat cap or zero-length interval.
    pub fn validate(&self) -> Result<()> {
        if self.max_stat == 0 {
            return Err(PetzError::Config("rules.max_stat must be > 0".into()));
        }
        if self.decay_interval_secs == 0 {
            return Err(PetzError::Config(
                "rules.decay_interval_secs must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Operator-tunable parameters as they appear on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Experience required per level.
    #[serde(default = "default_xp_per_level")]
    pub xp_per_level: u64,
    /// Whether new pets may be created.
    #[serde(default = "default_true")]
    pub minting_allowed: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            xp_per_level: 50,
            minting_allowed: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Runtime admin state
// ---------------------------------------------------------------------------

/// Experience per level, guaranteed non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XpPerLevel(NonZeroU64);

impl XpPerLevel {
    /// # Errors
    /// Returns `PetzError::Config` if `value` is zero.
    pub fn new(value: u64) -> Result<Self> {
        NonZeroU64::new(value)
            .map(Self)
            .ok_or_else(|| PetzError::Config("xp_per_level must be > 0".into()))
    }

    /// The raw value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl Default for XpPerLevel {
    fn default() -> Self {
        Self(NonZeroU64::MIN.saturating_add(49))
    }
}

#[derive(Debug, Clone, Copy)]
struct AdminState {
    xp_per_level: XpPerLevel,
    minting_allowed: bool,
}

/// Live, shareable admin parameters.
///
/// The controller reads `xp_per_level` when it reports levels; the mint
/// layer reads `minting_allowed` and owns the setters.
#[derive(Debug)]
pub struct AdminSettings {
    state: RwLock<AdminState>,
}

impl AdminSettings {
    /// # Errors
    /// Returns `PetzError::Config` if `config.xp_per_level` is zero.
    pub fn new(config: &AdminConfig) -> Result<Self> {
        Ok(Self {
            state: RwLock::new(AdminState {
                xp_per_level: XpPerLevel::new(config.xp_per_level)?,
                minting_allowed: config.minting_allowed,
            }),
        })
    }

    /// Current experience-per-level.
    #[must_use]
    pub fn xp_per_level(&self) -> XpPerLevel {
        self.state.read().xp_per_level
    }

    /// Replace experience-per-level. Zero is rejected and the old value kept.
    ///
    /// # Errors
    /// Returns `PetzError::Config` if `value` is zero.
    pub fn set_xp_per_level(&self, value: u64) -> Result<()> {
        let xp = XpPerLevel::new(value)?;
        self.state.write().xp_per_level = xp;
        Ok(())
    }

    /// Whether creation is currently allowed.
    #[must_use]
    pub fn minting_allowed(&self) -> bool {
        self.state.read().minting_allowed
    }

    /// Switch creation on or off.
    pub fn set_minting_allowed(&self, allowed: bool) {
        self.state.write().minting_allowed = allowed;
    }

    /// Snapshot back into the on-disk shape.
    #[must_use]
    pub fn to_config(&self) -> AdminConfig {
        let state = *self.state.read();
        AdminConfig {
            xp_per_level: state.xp_per_level.get(),
            minting_allowed: state.minting_allowed,
        }
    }
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            state: RwLock::new(AdminState {
                xp_per_level: XpPerLevel::default(),
                minting_allowed: true,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "text".to_string() }
fn default_max_stat() -> u32 { 100 }
fn default_decay_interval() -> u64 { 3600 }
fn default_decay_rate() -> u32 { 1 }
fn default_feed_replenish() -> u32 { 25 }
fn default_train_xp() -> u64 { 10 }
fn default_train_cost() -> u32 { 5 }
fn default_xp_per_level() -> u64 { 50 }
