//! Z allocation policy.
//!
//! Renumbering, new-layer placement and template merges all hand out z values.
//! They share one [`ZPolicy`]; configuration rejects a merge offset that
//! doesn't clear the spread renumbering can produce (see
//! [`ZPolicy::merge_clears`]).
//!
//! Renderers sort by `z` descending with a deterministic tie-break (see
//! [`crate::stack`]); nothing here requires z to be unique.

#[cfg(test)]
#[path = "zorder_test.rs"]
mod zorder_test;

use crate::consts::{MERGE_Z_OFFSET, Z_BASE, Z_STEP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZPolicy {
    /// z of the bottom-most layer after renumbering.
    pub base: i64,
    /// Gap between adjacent layers after renumbering. Always positive.
    pub step: i64,
    /// Minimum lift applied to template layers during a merge.
    pub merge_offset: i64,
}

impl Default for ZPolicy {
    fn default() -> Self {
        Self { base: Z_BASE, step: Z_STEP, merge_offset: MERGE_Z_OFFSET }
    }
}

impl ZPolicy {
    /// z for the layer at `index`, counted from the bottom.
    #[must_use]
    pub fn slot(&self, index: usize) -> i64 {
        let index = i64::try_from(index).unwrap_or(i64::MAX / self.step.max(1));
        self.base.saturating_add(index.saturating_mul(self.step))
    }

    /// z for a new layer placed above everything currently at `max_z`.
    #[must_use]
    pub fn above(&self, max_z: Option<i64>) -> i64 {
        match max_z {
            Some(z) => z.saturating_add(self.step),
            None => self.base,
        }
    }

    /// Highest z renumbering hands out for a stack of `layers` items.
    #[must_use]
    pub fn renumber_spread(&self, layers: usize) -> i64 {
        self.slot(layers.saturating_sub(1))
    }

    /// Whether template layers lifted by [`ZPolicy::merge_offset`] clear
    /// every z a renumbered stack of `layers` items can hold.
    #[must_use]
    pub fn merge_clears(&self, layers: usize) -> bool {
        self.merge_offset > self.renumber_spread(layers)
    }
}
