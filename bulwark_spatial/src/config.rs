// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime knobs for [`RTree`](crate::RTree).

/// How node rectangles react to entries shrinking or leaving.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BoundsPolicy {
    /// Recompute rectangles along the leaf-to-root path after a delete or an
    /// in-place update, stopping at the first ancestor that does not change.
    /// Every node's rectangle is then the exact union of its contents.
    #[default]
    Tight,
    /// Only ever grow rectangles. Deletes and in-place updates touch a single
    /// leaf slot; pruning gets looser as entities move away.
    Loose,
}

/// How a middle node picks the child that receives a new entry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ChooseStrategy {
    /// Compare children one at a time.
    Scalar,
    /// Gather child rectangles into [`RectColumns`](crate::RectColumns) and scan
    /// them lane-wise.
    Columnar,
    /// Columnar once fan-out reaches
    /// [`RTreeConfig::columnar_threshold`], scalar below.
    #[default]
    Auto,
}

/// Construction options for an [`RTree`](crate::RTree).
///
/// Fan-out bounds and the id ceiling are const parameters of the tree type;
/// everything that can vary per instance lives here.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RTreeConfig {
    /// Rectangle maintenance on removal.
    pub bounds: BoundsPolicy,
    /// Subtree selection strategy.
    pub choose: ChooseStrategy,
    /// Fan-out at which [`ChooseStrategy::Auto`] switches to columnar scans.
    pub columnar_threshold: usize,
}

impl Default for RTreeConfig {
    fn default() -> Self {
        Self {
            bounds: BoundsPolicy::Tight,
            choose: ChooseStrategy::Auto,
            columnar_threshold: crate::columns::LANES,
        }
    }
}

impl RTreeConfig {
    /// Set the bounds policy.
    pub const fn with_bounds(mut self, bounds: BoundsPolicy) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the choose strategy.
    pub const fn with_choose(mut self, choose: ChooseStrategy) -> Self {
        self.choose = choose;
        self
    }

    /// Set the fan-out at which `Auto` goes columnar.
    pub const fn with_columnar_threshold(mut self, threshold: usize) -> Self {
        self.columnar_threshold = threshold;
        self
    }

    pub(crate) fn use_columnar(&self, fan_out: usize) -> bool {
        match self.choose {
            ChooseStrategy::Scalar => false,
            ChooseStrategy::Columnar => true,
            ChooseStrategy::Auto => fan_out >= self.columnar_threshold,
        }
    }
}
