/*!
 * Diagnostics
 * Numbered verbosity gate layered over tracing
 *
 * Levels: 1 kill, 2 selection, 3 pass start, 4 pass result, 5 advisory result.
 */

use serde::{Deserialize, Serialize};

/// Message levels
pub const LEVEL_KILL: u32 = 1;
pub const LEVEL_SELECT: u32 = 2;
pub const LEVEL_PASS: u32 = 3;
pub const LEVEL_RESULT: u32 = 4;
pub const LEVEL_QUERY: u32 = 5;

/// Configured diagnostic verbosity, read once per pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verbosity(pub u32);

impl Verbosity {
    /// Nothing is printed
    pub const SILENT: Verbosity = Verbosity(0);

    /// Whether a message of `level` should be emitted
    #[inline(always)]
    pub fn allows(self, level: u32) -> bool {
        self.0 >= level
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity(crate::core::limits::DEFAULT_DEBUG_LEVEL)
    }
}

/// Emit a tracing event only when the verbosity admits its level
///
/// ```ignore
/// lowmem_print!(verbosity, LEVEL_KILL, warn, pid = 42, "send sigkill");
/// ```
#[macro_export]
macro_rules! lowmem_print {
    ($verbosity:expr, $level:expr, $lvl:ident, $($arg:tt)+) => {
        if $verbosity.allows($level) {
            tracing::$lvl!($($arg)+);
        }
    };
}
