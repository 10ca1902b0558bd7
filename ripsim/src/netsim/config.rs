// RipSim: Distance-Vector Routing and Failure-Aware Forwarding
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Builder Configuration
//!
//! Parameters of the two table builders. All of them have sensible defaults, so a builder can be
//! created with `Default::default()` and then be adjusted with the chaining setters.
//!
//! ```rust
//! use ripsim::netsim::config::{DistanceVectorConfig, NeighborCost, RankedTableConfig, RankingMode};
//!
//! let dv = DistanceVectorConfig::default().max_iterations(10).trace(true);
//! assert_eq!(dv.max_iterations, 10);
//! assert_eq!(dv.neighbor_cost, NeighborCost::Table);
//!
//! let ranked = RankedTableConfig::default().k(2).mode(RankingMode::ShortestPath);
//! assert_eq!(ranked.k, 2);
//! ```

use crate::netsim::cost::CostWeights;
use crate::netsim::ConfigError;

/// Default number of relaxation rounds before giving up on convergence.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;
/// Default number of secondary routes per entry.
pub const DEFAULT_SECONDARY_ROUTES: usize = 3;

/// How the cost of the first leg towards a neighbor is computed during relaxation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborCost {
    /// Use the current table cost towards the neighbor, `table[u][w]`. This cost may already be
    /// the cost of a multi-hop path, in which case the recorded next hop does not lie on a path
    /// with the recorded cost. The costs of the fixed point are the shortest path costs anyway.
    Table,
    /// Use the weight of the direct link towards the neighbor. The recorded next hop is always
    /// the first hop of a path that has the recorded cost.
    Link,
}

impl Default for NeighborCost {
    fn default() -> Self {
        Self::Table
    }
}

/// How the candidates of the ranked table are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingMode {
    /// Rank the directly connected links of a router by their compound cost. Every destination
    /// of the same router gets the same set of candidates.
    DirectLinks,
    /// Rank the neighbors by the compound cost of the link plus the shortest path (in compound
    /// cost) from the neighbor towards the destination. Unreachable candidates are skipped.
    ShortestPath,
}

impl Default for RankingMode {
    fn default() -> Self {
        Self::DirectLinks
    }
}

/// Configuration of the distance-vector (standard RIP) table builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceVectorConfig {
    /// Maximum number of relaxation rounds
    pub max_iterations: usize,
    /// Log every round at `info` level instead of `trace`
    pub trace: bool,
    /// Cost of the first leg towards a neighbor
    pub neighbor_cost: NeighborCost,
}

impl Default for DistanceVectorConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            trace: false,
            neighbor_cost: NeighborCost::default(),
        }
    }
}

impl DistanceVectorConfig {
    /// Set the maximum number of rounds
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Enable or disable tracing of every round
    pub fn trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Set the cost of the first leg
    pub fn neighbor_cost(mut self, neighbor_cost: NeighborCost) -> Self {
        self.neighbor_cost = neighbor_cost;
        self
    }
}

/// Configuration of the ranked (enhanced RIP) table builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedTableConfig {
    /// Maximum number of secondary routes per entry
    pub k: usize,
    /// Weights of the compound cost
    pub weights: CostWeights,
    /// How the candidates are chosen
    pub mode: RankingMode,
    /// Rounds of the shortest path computation in `RankingMode::ShortestPath`
    pub max_iterations: usize,
}

impl Default for RankedTableConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_SECONDARY_ROUTES,
            weights: CostWeights::default(),
            mode: RankingMode::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl RankedTableConfig {
    /// Set the maximum number of secondary routes
    pub fn k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the weights of the compound cost
    pub fn weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the ranking mode
    pub fn mode(mut self, mode: RankingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the maximum number of rounds for the shortest path computation
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Check that the configuration can be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()
    }
}
