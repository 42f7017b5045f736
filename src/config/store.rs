/*!
 * Parameter Store
 * RCU-published tunables with a prebuilt threshold table
 */

use super::tunables::{format_array, parse_adj, parse_minfree, Tunables};
use crate::core::errors::ConfigResult;
use crate::memory::{PressureMode, ThresholdTable};
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

/// Consistent view of the parameters for one evaluation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSnapshot {
    pub tunables: Tunables,
    pub table: ThresholdTable,
}

impl ParamSnapshot {
    fn new(tunables: Tunables) -> Self {
        let table = tunables.threshold_table();
        Self { tunables, table }
    }
}

/// Writable parameter store
///
/// Readers load an `Arc` snapshot without locking; each write validates,
/// rebuilds the threshold table, and swaps the snapshot in. Clones share
/// the same store.
#[derive(Clone)]
pub struct ParameterStore {
    inner: Arc<ArcSwap<ParamSnapshot>>,
}

impl ParameterStore {
    pub fn new(tunables: Tunables) -> ConfigResult<Self> {
        tunables.validate()?;
        Ok(Self {
            inner: Arc::new(ArcSwap::from_pointee(ParamSnapshot::new(tunables))),
        })
    }

    /// Current snapshot
    #[inline]
    pub fn load(&self) -> Arc<ParamSnapshot> {
        self.inner.load_full()
    }

    pub fn tunables(&self) -> Tunables {
        self.load().tunables.clone()
    }

    /// Replace every parameter at once
    pub fn replace(&self, tunables: Tunables) -> ConfigResult<()> {
        tunables.validate()?;
        self.inner.store(Arc::new(ParamSnapshot::new(tunables)));
        Ok(())
    }

    /// Write the adj array from its comma separated form
    pub fn set_adj(&self, raw: &str) -> ConfigResult<()> {
        let adj = parse_adj(raw)?;
        info!(adj = %raw, "adj updated");
        self.update(|t| t.adj = adj.clone());
        Ok(())
    }

    /// Write the minfree array from its comma separated form
    pub fn set_minfree(&self, raw: &str) -> ConfigResult<()> {
        let minfree = parse_minfree(raw)?;
        info!(minfree = %raw, "minfree updated");
        self.update(|t| t.minfree = minfree.clone());
        Ok(())
    }

    pub fn set_cost(&self, cost: u32) {
        self.update(|t| t.cost = cost);
    }

    pub fn set_debug_level(&self, level: u32) {
        self.update(|t| t.debug_level = level);
    }

    pub fn set_pressure_mode(&self, mode: PressureMode) {
        self.update(|t| t.pressure_mode = mode);
    }

    /// Read the adj array in its comma separated form
    pub fn adj(&self) -> String {
        format_array(&self.load().tunables.adj)
    }

    /// Read the minfree array in its comma separated form
    pub fn minfree(&self) -> String {
        format_array(&self.load().tunables.minfree)
    }

    pub fn cost(&self) -> u32 {
        self.load().tunables.cost
    }

    pub fn table(&self) -> ThresholdTable {
        self.load().table.clone()
    }

    fn update<F>(&self, f: F)
    where
        F: Fn(&mut Tunables),
    {
        self.inner.rcu(|current| {
            let mut tunables = current.tunables.clone();
            f(&mut tunables);
            ParamSnapshot::new(tunables)
        });
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(ParamSnapshot::new(
                Tunables::default(),
            ))),
        }
    }
}
