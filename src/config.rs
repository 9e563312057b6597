// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration management for the estimator.
//!
//! Configuration is loaded from multiple sources with the following priority
//! (later sources override earlier ones):
//!
//! 1. Built-in defaults (the LO Z-peak slice: 60 < M < 120 GeV, pT > 14 GeV, |y| < 2.4)
//! 2. drell-yan-mc.yaml / config.yaml file
//! 3. Environment variables (DYMC_*)
//! 4. CLI arguments

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{Error, Result};
use crate::validation;

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Partonic energy range sampled by the phase-space generator
    #[serde(default)]
    pub kinematics: KinematicsConfig,

    /// Acceptance cuts on the lepton pair
    #[serde(default)]
    pub cuts: CutsConfig,

    /// Histogram binning of the pair rapidity
    #[serde(default)]
    pub binning: BinningConfig,

    /// Sampling settings
    #[serde(default)]
    pub run: RunConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Resource limits
    #[serde(default)]
    pub limits: ResourceLimits,
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = config_path {
            config = Self::from_file(path)?;
        } else {
            for path in &["drell-yan-mc.yaml", "config.yaml"] {
                let path = Path::new(path);
                if path.exists() {
                    config = Self::from_file(path)?;
                    break;
                }
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Read a YAML configuration file without applying overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Apply environment variable overrides.
    ///
    /// A malformed numeric override is an error rather than being skipped.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(val) = env_parse::<f64>("DYMC_MMIN")? {
            self.kinematics.mmin = val;
        }
        if let Some(val) = env_parse::<f64>("DYMC_MMAX")? {
            self.kinematics.mmax = val;
        }
        if let Some(val) = env_parse::<u64>("DYMC_CALLS")? {
            self.run.calls = val;
        }
        if let Some(val) = env_parse::<u64>("DYMC_SEED")? {
            self.run.seed = val;
        }
        if let Some(val) = env_parse::<usize>("DYMC_WORKERS")? {
            self.run.workers = val;
        }
        if let Ok(val) = env::var("DYMC_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("DYMC_LOG_FORMAT") {
            self.logging.format = val;
        }
        Ok(())
    }

    /// Validate configuration.
    ///
    /// Runs every check that can fail before sampling starts.
    pub fn validate(&self) -> Result<()> {
        validation::validate_energy_range(self.kinematics.mmin, self.kinematics.mmax)?;
        validation::validate_cuts(&self.cuts)?;
        validation::validate_bin_edges(&self.binning.edges(), &self.limits)?;
        validation::validate_run(self.run.calls, self.run.workers, &self.limits)?;

        if self.cuts.m_max > self.kinematics.mmax || self.cuts.m_min < self.kinematics.mmin {
            tracing::warn!(
                m_min = self.cuts.m_min,
                m_max = self.cuts.m_max,
                mmin = self.kinematics.mmin,
                mmax = self.kinematics.mmax,
                "Mass window extends beyond the sampled energy range; the edge of the window receives no events"
            );
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(Error::Config(format!(
                "unknown log format '{}', expected 'pretty' or 'json'",
                self.logging.format
            )));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has an unparsable value '{}'", key, val))),
        Err(_) => Ok(None),
    }
}

/// Partonic invariant-mass range in GeV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicsConfig {
    /// Lower edge of the partonic centre-of-mass energy
    #[serde(default = "default_mmin")]
    pub mmin: f64,

    /// Upper edge of the partonic centre-of-mass energy (the hadronic √s)
    #[serde(default = "default_mmax")]
    pub mmax: f64,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            mmin: default_mmin(),
            mmax: default_mmax(),
        }
    }
}

fn default_mmin() -> f64 {
    10.0
}

fn default_mmax() -> f64 {
    7000.0
}

/// Acceptance cuts. An event is kept when every condition holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutsConfig {
    /// Minimum lepton transverse momentum in GeV
    #[serde(default = "default_pt_min")]
    pub pt_min: f64,

    /// Maximum absolute rapidity of the pair and of each lepton
    #[serde(default = "default_y_max")]
    pub y_max: f64,

    /// Lower edge of the invariant-mass window in GeV
    #[serde(default = "default_m_min")]
    pub m_min: f64,

    /// Upper edge of the invariant-mass window in GeV
    #[serde(default = "default_m_max")]
    pub m_max: f64,
}

impl Default for CutsConfig {
    fn default() -> Self {
        Self {
            pt_min: default_pt_min(),
            y_max: default_y_max(),
            m_min: default_m_min(),
            m_max: default_m_max(),
        }
    }
}

fn default_pt_min() -> f64 {
    14.0
}

fn default_y_max() -> f64 {
    2.4
}

fn default_m_min() -> f64 {
    60.0
}

fn default_m_max() -> f64 {
    120.0
}

/// Rapidity binning.
///
/// Either explicit `edges`, or `bins` uniform bins between `low` and `high`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinningConfig {
    /// Explicit bin edges; takes precedence over the uniform layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<f64>>,

    /// Lower edge of the uniform layout
    #[serde(default)]
    pub low: f64,

    /// Upper edge of the uniform layout
    #[serde(default = "default_y_max")]
    pub high: f64,

    /// Number of uniform bins
    #[serde(default = "default_bins")]
    pub bins: usize,
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            edges: None,
            low: 0.0,
            high: default_y_max(),
            bins: default_bins(),
        }
    }
}

impl BinningConfig {
    /// Effective bin edges.
    pub fn edges(&self) -> Vec<f64> {
        match &self.edges {
            Some(edges) => edges.clone(),
            None => crate::histogram::uniform_edges(self.low, self.high, self.bins),
        }
    }
}

fn default_bins() -> usize {
    24
}

/// Sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of phase-space points (N)
    #[serde(default = "default_calls")]
    pub calls: u64,

    /// Seed of the pseudo-random generator
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Worker threads; each fills a private histogram
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            calls: default_calls(),
            seed: default_seed(),
            workers: default_workers(),
        }
    }
}

fn default_calls() -> u64 {
    100_000
}

fn default_seed() -> u64 {
    42
}

fn default_workers() -> usize {
    1
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

/// Resource limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Maximum number of phase-space points per run
    #[serde(default = "default_max_calls")]
    pub max_calls: u64,

    /// Maximum number of histogram bins
    #[serde(default = "default_max_bins")]
    pub max_bins: u64,

    /// Maximum number of worker threads
    #[serde(default = "default_max_workers")]
    pub max_workers: u64,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_calls: default_max_calls(),
            max_bins: default_max_bins(),
            max_workers: default_max_workers(),
        }
    }
}

fn default_max_calls() -> u64 {
    10_000_000_000
}

fn default_max_bins() -> u64 {
    10_000
}

fn default_max_workers() -> u64 {
    256
}
