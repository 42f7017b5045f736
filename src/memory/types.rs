/*!
 * Memory Types
 * Global page counters and pressure accounting
 */

use crate::core::errors::ConfigError;
use crate::core::types::Pages;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Point-in-time global page counters reported by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageCounters {
    pub free: Pages,
    pub active_anon: Pages,
    pub inactive_anon: Pages,
    pub active_file: Pages,
    pub inactive_file: Pages,
    /// All file-backed pages, including shared memory
    pub file: Pages,
    pub shmem: Pages,
}

impl PageCounters {
    /// Pages on the LRU lists: the reclaimable estimate handed back to the host
    #[inline]
    pub fn lru_total(&self) -> Pages {
        self.active_anon + self.inactive_anon + self.active_file + self.inactive_file
    }

    /// Cache pages counted as free under the given accounting mode
    #[inline]
    pub fn reclaimable_cache(&self, mode: PressureMode) -> Pages {
        match mode {
            PressureMode::Combined => self.active_file + self.inactive_file,
            PressureMode::Split => self.file - self.shmem,
        }
    }
}

/// How free memory and cache are weighed against a threshold floor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureMode {
    /// Breached when free + (active + inactive file) is below the floor
    #[default]
    Combined,
    /// Breached when free and (file - shmem) are each below the floor
    Split,
}

impl PressureMode {
    /// Whether a floor is breached given free pages and reclaimable cache
    #[inline]
    pub fn is_breached(self, free: Pages, cache: Pages, floor: Pages) -> bool {
        match self {
            PressureMode::Combined => free + cache < floor,
            PressureMode::Split => free < floor && cache < floor,
        }
    }
}

impl FromStr for PressureMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "combined" => Ok(PressureMode::Combined),
            "split" => Ok(PressureMode::Split),
            other => Err(ConfigError::UnknownPressureMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for PressureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PressureMode::Combined => write!(f, "combined"),
            PressureMode::Split => write!(f, "split"),
        }
    }
}
