/*!
 * Tunables
 * Runtime-adjustable parameters of the low-memory killer
 */

use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::limits::*;
use crate::core::types::{OomScoreAdj, Pages};
use crate::memory::{PressureMode, ThresholdTable};
use crate::monitoring::diagnostics::Verbosity;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

/// Environment variable overriding the adj array
pub const ENV_ADJ: &str = "LMK_ADJ";
/// Environment variable overriding the minfree array
pub const ENV_MINFREE: &str = "LMK_MINFREE";
/// Environment variable overriding the shrinker cost
pub const ENV_COST: &str = "LMK_COST";
/// Environment variable overriding the diagnostic verbosity
pub const ENV_DEBUG_LEVEL: &str = "LMK_DEBUG_LEVEL";
/// Environment variable overriding the pressure accounting mode
pub const ENV_PRESSURE_MODE: &str = "LMK_PRESSURE_MODE";

/// Killer parameters
///
/// `adj` and `minfree` are independent arrays; only their common prefix
/// forms the threshold table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    pub adj: Vec<OomScoreAdj>,
    pub minfree: Vec<Pages>,
    /// Relative cost hint for the host's reclaim scheduler
    pub cost: u32,
    pub debug_level: u32,
    pub pressure_mode: PressureMode,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            adj: DEFAULT_ADJ.to_vec(),
            minfree: DEFAULT_MINFREE.to_vec(),
            cost: DEFAULT_COST,
            debug_level: DEFAULT_DEBUG_LEVEL,
            pressure_mode: PressureMode::default(),
        }
    }
}

impl Tunables {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let tunables: Tunables =
            serde_json::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tunables.validate()?;
        Ok(tunables)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> ConfigResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_ADJ) {
            self.adj = parse_adj(&raw)?;
        }
        if let Some(raw) = lookup(ENV_MINFREE) {
            self.minfree = parse_minfree(&raw)?;
        }
        if let Some(raw) = lookup(ENV_COST) {
            self.cost = parse_scalar("cost", &raw)?;
        }
        if let Some(raw) = lookup(ENV_DEBUG_LEVEL) {
            self.debug_level = parse_scalar("debug_level", &raw)?;
        }
        if let Some(raw) = lookup(ENV_PRESSURE_MODE) {
            self.pressure_mode = raw.parse()?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check array capacities and value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        check_len("adj", self.adj.len())?;
        check_len("minfree", self.minfree.len())?;
        for &adj in &self.adj {
            check_adj(adj as i64)?;
        }
        for &minfree in &self.minfree {
            check_minfree(minfree)?;
        }
        Ok(())
    }

    /// Threshold table from the common prefix of both arrays
    pub fn threshold_table(&self) -> ThresholdTable {
        ThresholdTable::from_arrays(&self.adj, &self.minfree)
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity(self.debug_level)
    }
}

/// Parse a comma separated adj list, e.g. `"0,8"`
pub fn parse_adj(raw: &str) -> ConfigResult<Vec<OomScoreAdj>> {
    let values: Vec<i64> = parse_array("adj", raw)?;
    values
        .into_iter()
        .map(|v| check_adj(v).map(|_| v as OomScoreAdj))
        .collect()
}

/// Parse a comma separated minfree list, e.g. `"1024,4096"`
pub fn parse_minfree(raw: &str) -> ConfigResult<Vec<Pages>> {
    let values: Vec<Pages> = parse_array("minfree", raw)?;
    for &v in &values {
        check_minfree(v)?;
    }
    Ok(values)
}

/// Render an array the way it is written
pub fn format_array<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_array<T: FromStr>(param: &str, raw: &str) -> ConfigResult<Vec<T>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    check_len(param, parts.len())?;

    parts
        .into_iter()
        .map(|part| {
            part.parse::<T>().map_err(|_| ConfigError::InvalidEntry {
                param: param.to_string(),
                value: part.to_string(),
            })
        })
        .collect()
}

fn parse_scalar<T: FromStr>(param: &str, raw: &str) -> ConfigResult<T> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidEntry {
        param: param.to_string(),
        value: raw.to_string(),
    })
}

fn check_len(param: &str, given: usize) -> ConfigResult<()> {
    if given > LOWMEM_ARRAY_MAX {
        return Err(ConfigError::TooManyEntries {
            param: param.to_string(),
            max: LOWMEM_ARRAY_MAX,
            given,
        });
    }
    Ok(())
}

fn check_adj(value: i64) -> ConfigResult<()> {
    let (min, max) = (OOM_SCORE_ADJ_MIN as i64, OOM_SCORE_ADJ_MAX as i64);
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            param: "adj".to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn check_minfree(value: Pages) -> ConfigResult<()> {
    if value < 0 {
        return Err(ConfigError::OutOfRange {
            param: "minfree".to_string(),
            value,
            min: 0,
            max: Pages::MAX,
        });
    }
    Ok(())
}
