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

//! # Distance-Vector Tables (standard RIP)
//!
//! This module computes, for every pair of routers, the cost and the next hop by iterative
//! relaxation. Every round visits all ordered pairs `(u, v)` with `u != v` and every neighbor
//! `w` of `u`, and replaces the entry of `(u, v)` if going through `w` is strictly cheaper. The
//! computation stops at the first round without any change (the fixed point), or when the
//! iteration budget is used up.
//!
//! Routers, destinations and neighbors are always visited in ascending order of their id, and
//! entries are updated in place. Hence, the result is deterministic for a given topology.

use crate::netsim::config::{DistanceVectorConfig, NeighborCost};
use crate::netsim::table::{Route, RouteCandidates, RoutingTable};
use crate::netsim::topology::{Link, Topology};
use crate::netsim::{Cost, NetworkError, RouterId};
use itertools::iproduct;
use log::*;
use std::iter::repeat;

/// # Distance-Vector Table
///
/// Table storing `(cost, next_hop)` for every pair of routers. The entries are stored in a
/// flattened 2-dimensional vector, indexed by the router ids. This works since routers are never
/// removed from the topology, and therefore the ids are `0..num_devices`.
///
/// For every router `n`, the entry `(n, n)` is always `(0, Some(n))`. Unreachable destinations
/// have the entry `(Cost::INFINITY, None)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceVectorTable {
    /// Number of routers, needed for computing the index
    num_devices: usize,
    /// Flattened table, indexed by `source * num_devices + destination`
    state: Vec<(Cost, Option<RouterId>)>,
    /// Number of changed entries in each round performed on this table
    history: Vec<usize>,
}

impl DistanceVectorTable {
    /// Initialize the table with the direct links of the topology.
    fn init<F>(topology: &Topology, link_cost: F) -> Result<Self, NetworkError>
    where
        F: Fn(&Link) -> Cost,
    {
        let num_devices = topology.num_devices();
        let mut state: Vec<(Cost, Option<RouterId>)> =
            repeat((Cost::INFINITY, None)).take(num_devices * num_devices).collect();

        for router in topology.get_routers() {
            state[get_idx(router.index(), router.index(), num_devices)] = (0.0, Some(router));
            for (neighbor, cost) in neighbor_costs(topology, router, &link_cost)? {
                if cost.is_finite() {
                    state[get_idx(router.index(), neighbor.index(), num_devices)] =
                        (cost, Some(neighbor));
                }
            }
        }

        Ok(Self { num_devices, state, history: Vec::new() })
    }

    /// Returns the number of routers in the table
    pub fn num_devices(&self) -> usize {
        self.num_devices
    }

    /// Returns the entry `(cost, next_hop)` from `source` towards `destination`.
    pub fn entry(
        &self,
        source: RouterId,
        destination: RouterId,
    ) -> Result<(Cost, Option<RouterId>), NetworkError> {
        let idx = self.idx(source, destination)?;
        Ok(self.state[idx])
    }

    /// Returns the cost from `source` towards `destination`.
    pub fn cost(&self, source: RouterId, destination: RouterId) -> Result<Cost, NetworkError> {
        Ok(self.entry(source, destination)?.0)
    }

    /// Returns the next hop from `source` towards `destination`, or `None` if the destination is
    /// unreachable.
    pub fn next_hop(
        &self,
        source: RouterId,
        destination: RouterId,
    ) -> Result<Option<RouterId>, NetworkError> {
        Ok(self.entry(source, destination)?.1)
    }

    /// Returns all entries of `source`, as `(destination, cost, next_hop)`, sorted by the
    /// destination.
    pub fn routes(
        &self,
        source: RouterId,
    ) -> Result<Vec<(RouterId, Cost, Option<RouterId>)>, NetworkError> {
        (0..self.num_devices)
            .map(|d| {
                let destination = RouterId::new(d);
                let (cost, next_hop) = self.entry(source, destination)?;
                Ok((destination, cost, next_hop))
            })
            .collect()
    }

    /// Returns the number of changes of every round performed on this table.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Returns true if the last relaxation round changed nothing, i.e., the table is a fixed
    /// point.
    pub fn converged(&self) -> bool {
        self.history.last() == Some(&0)
    }

    /// Perform one round of relaxation using the link weights of the topology, and return the
    /// number of changed entries. On a converged table, this returns 0 and changes nothing.
    pub fn relax(
        &mut self,
        topology: &Topology,
        neighbor_cost: NeighborCost,
    ) -> Result<usize, NetworkError> {
        self.relax_with(topology, neighbor_cost, |l| l.weight)
    }

    /// Perform one round of relaxation, with the cost of each link given by `link_cost`.
    pub(crate) fn relax_with<F>(
        &mut self,
        topology: &Topology,
        neighbor_cost: NeighborCost,
        link_cost: F,
    ) -> Result<usize, NetworkError>
    where
        F: Fn(&Link) -> Cost,
    {
        let routers = topology.get_routers();
        if let Some(r) = routers.iter().find(|r| r.index() >= self.num_devices) {
            return Err(NetworkError::DeviceNotFound(*r));
        }
        let adjacency = routers
            .iter()
            .map(|r| neighbor_costs(topology, *r, &link_cost))
            .collect::<Result<Vec<_>, NetworkError>>()?;

        let n = self.num_devices;
        let mut changes: usize = 0;
        for (u, v) in iproduct!(routers.iter(), routers.iter()) {
            if u == v {
                continue;
            }
            for (w, w_link_cost) in adjacency[u.index()].iter() {
                let first_leg = match neighbor_cost {
                    NeighborCost::Table => self.state[get_idx(u.index(), w.index(), n)].0,
                    NeighborCost::Link => *w_link_cost,
                };
                let total = first_leg + self.state[get_idx(w.index(), v.index(), n)].0;
                let current = &mut self.state[get_idx(u.index(), v.index(), n)];
                if total < current.0 {
                    *current = (total, Some(*w));
                    changes += 1;
                }
            }
        }

        self.history.push(changes);
        Ok(changes)
    }

    fn idx(&self, source: RouterId, destination: RouterId) -> Result<usize, NetworkError> {
        if source.index() >= self.num_devices {
            return Err(NetworkError::DeviceNotFound(source));
        }
        if destination.index() >= self.num_devices {
            return Err(NetworkError::DeviceNotFound(destination));
        }
        Ok(get_idx(source.index(), destination.index(), self.num_devices))
    }
}

impl RoutingTable for DistanceVectorTable {
    fn lookup(&self, router: RouterId, destination: RouterId) -> Option<RouteCandidates<'_>> {
        let (cost, next_hop) = self.entry(router, destination).ok()?;
        Some(RouteCandidates {
            primary: next_hop.filter(|_| cost.is_finite()).map(|next_hop| Route { cost, next_hop }),
            secondary: &[],
        })
    }
}

/// # Distance-Vector Table Builder
///
/// Computes the [`DistanceVectorTable`] of a topology from scratch.
///
/// ```rust
/// use ripsim::netsim::{DistanceVectorBuilder, Topology};
/// use ripsim::netsim::config::DistanceVectorConfig;
///
/// # fn main() -> Result<(), ripsim::netsim::NetworkError> {
/// let t = Topology::from_weighted_links(&[("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 5.0)])?;
/// let (a, c) = (t.get_router_id("A")?, t.get_router_id("C")?);
///
/// let (table, rounds) = DistanceVectorBuilder::new(DistanceVectorConfig::default()).build(&t)?;
/// assert!(rounds < 50);
/// assert_eq!(table.cost(a, c)?, 3.0);
/// assert_eq!(table.next_hop(a, c)?, Some(t.get_router_id("B")?));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DistanceVectorBuilder {
    config: DistanceVectorConfig,
}

impl DistanceVectorBuilder {
    /// Create a new builder with the given configuration
    pub fn new(config: DistanceVectorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration of the builder
    pub fn config(&self) -> &DistanceVectorConfig {
        &self.config
    }

    /// Compute the tables, using the link weights of the topology. Returns the table and the
    /// number of rounds used. If the number of rounds equals `max_iterations`, the table may not
    /// have reached the fixed point. It is still usable, but the caller should treat it as a best
    /// effort result.
    pub fn build(&self, topology: &Topology) -> Result<(DistanceVectorTable, usize), NetworkError> {
        self.build_with(topology, |l| l.weight)
    }

    /// Compute the tables, with the cost of each link given by `link_cost`.
    pub(crate) fn build_with<F>(
        &self,
        topology: &Topology,
        link_cost: F,
    ) -> Result<(DistanceVectorTable, usize), NetworkError>
    where
        F: Fn(&Link) -> Cost,
    {
        let level = if self.config.trace { Level::Info } else { Level::Trace };
        let mut table = DistanceVectorTable::init(topology, &link_cost)?;

        for round in 1..=self.config.max_iterations {
            let changes = table.relax_with(topology, self.config.neighbor_cost, &link_cost)?;
            log!(level, "Iteration {}: {} changes", round, changes);
            if changes == 0 {
                debug!("Distance-vector tables converged after {} rounds", round);
                return Ok((table, round));
            }
        }

        warn!(
            "Distance-vector tables did not converge within {} rounds",
            self.config.max_iterations
        );
        Ok((table, self.config.max_iterations))
    }
}

/// Compute the distance-vector tables with the default configuration and the given iteration
/// budget.
pub fn build_table(
    topology: &Topology,
    max_iterations: usize,
) -> Result<(DistanceVectorTable, usize), NetworkError> {
    DistanceVectorBuilder::new(DistanceVectorConfig::default().max_iterations(max_iterations))
        .build(topology)
}

/// Returns the neighbors of a router (ascending id) along with the cost of the link.
fn neighbor_costs<F>(
    topology: &Topology,
    router: RouterId,
    link_cost: F,
) -> Result<Vec<(RouterId, Cost)>, NetworkError>
where
    F: Fn(&Link) -> Cost,
{
    Ok(topology
        .neighbors(router)?
        .into_iter()
        .filter_map(|n| topology.link(router, n).map(|l| (n, link_cost(l))))
        .collect())
}

fn get_idx(source: usize, destination: usize, num_devices: usize) -> usize {
    source * num_devices + destination
}
