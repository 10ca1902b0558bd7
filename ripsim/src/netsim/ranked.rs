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

//! # Ranked Tables (enhanced RIP)
//!
//! The enhanced RIP variant evaluates the [compound cost](crate::netsim::cost) of the links in a
//! single step, without any iteration. For every router and every destination, it stores the
//! cheapest candidate as the *primary* route, and up to `k` of the next cheapest candidates, in
//! ascending order of cost, as *secondary* routes. The forwarding engine falls back to the
//! secondary routes whenever the link of the primary route is known to have failed.
//!
//! ## Candidate selection
//!
//! With [`RankingMode::DirectLinks`] (the default), the candidates of a router are its directly
//! connected links, ranked by their own compound cost. This does not depend on the destination at
//! all, so every destination of the same router receives the same entry. The candidates are not
//! filtered, which means that a link with infinite cost (zero bandwidth) may still show up.
//!
//! With [`RankingMode::ShortestPath`], the candidate via neighbor `w` towards `d` has the cost of
//! the link towards `w` plus the shortest path cost (in compound cost) from `w` to `d`. This makes
//! the entries depend on the destination. Candidates with infinite cost are skipped.
//!
//! ## Timestamps
//!
//! All secondary routes are stamped with the time at which the table was built. Drivers may
//! refresh the timestamp with [`RankedTable::touch`] whenever they forward a packet over a
//! secondary route. The [`TableMaintainer`](crate::netsim::TableMaintainer) removes secondary
//! routes whose timestamp is older than its timeout.

use crate::netsim::config::{DistanceVectorConfig, NeighborCost, RankedTableConfig, RankingMode};
use crate::netsim::cost::compound_cost;
use crate::netsim::distance_vector::DistanceVectorBuilder;
use crate::netsim::table::{Route, RouteCandidates, RoutingTable, SecondaryRoute};
use crate::netsim::topology::{Link, Topology};
use crate::netsim::{NetworkError, RouterId};
use itertools::Itertools;
use log::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Instant;

/// Entry of a ranked table, for one router and one destination.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedEntry {
    /// Cheapest route, or `None` if there is no candidate at all
    pub primary: Option<Route>,
    /// Alternate routes, sorted by ascending cost. Each of them is at least as expensive as the
    /// primary route.
    pub secondary: Vec<SecondaryRoute>,
}

impl RankedEntry {
    /// Build an entry out of a list of candidates. The cheapest candidate becomes the primary
    /// route, and the next `k` candidates become the secondary routes, stamped with `now`. Ties
    /// are broken by the id of the next hop. Candidates with a cost of NaN are ranked last.
    pub fn from_candidates(candidates: Vec<Route>, k: usize, now: Instant) -> Self {
        let mut ranked = candidates
            .into_iter()
            .sorted_by(|a, b| cmp_cost(a.cost, b.cost).then(a.next_hop.cmp(&b.next_hop)));
        let primary = ranked.next();
        let secondary = ranked
            .take(k)
            .map(|r| SecondaryRoute { cost: r.cost, next_hop: r.next_hop, last_used: Some(now) })
            .collect();
        Self { primary, secondary }
    }
}

/// Total order on costs, with NaN after every other value.
fn cmp_cost(a: f64, b: f64) -> Ordering {
    a.is_nan().cmp(&b.is_nan()).then_with(|| a.partial_cmp(&b).unwrap_or(Ordering::Equal))
}

/// # Ranked Table
///
/// Maps every router to its entries, one per destination. A router never has an entry towards
/// itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedTable {
    entries: HashMap<RouterId, HashMap<RouterId, RankedEntry>>,
}

impl RankedTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Insert an entry, and return the entry that was replaced.
    pub fn insert(
        &mut self,
        router: RouterId,
        destination: RouterId,
        entry: RankedEntry,
    ) -> Option<RankedEntry> {
        self.entries.entry(router).or_insert_with(HashMap::new).insert(destination, entry)
    }

    /// Returns the entry of `router` towards `destination`.
    pub fn get(&self, router: RouterId, destination: RouterId) -> Option<&RankedEntry> {
        self.entries.get(&router).and_then(|t| t.get(&destination))
    }

    /// Returns a mutable reference to the entry of `router` towards `destination`.
    pub fn get_mut(&mut self, router: RouterId, destination: RouterId) -> Option<&mut RankedEntry> {
        self.entries.get_mut(&router).and_then(|t| t.get_mut(&destination))
    }

    /// Returns all entries of a router, indexed by the destination.
    pub fn get_entries(&self, router: RouterId) -> Option<&HashMap<RouterId, RankedEntry>> {
        self.entries.get(&router)
    }

    /// Returns an iterator over all entries, as `(router, destination, entry)`.
    pub fn iter(&self) -> impl Iterator<Item = (RouterId, RouterId, &RankedEntry)> + '_ {
        self.entries.iter().flat_map(|(r, t)| t.iter().map(move |(d, e)| (*r, *d, e)))
    }

    /// Returns an iterator over all entries, allowing them to be modified.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut RankedEntry> + '_ {
        self.entries.values_mut().flat_map(|t| t.values_mut())
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.values().map(|t| t.len()).sum()
    }

    /// Returns true if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Refresh the timestamp of the secondary route of `router` towards `destination` via
    /// `next_hop`. Returns `false` if there is no such secondary route.
    pub fn touch(
        &mut self,
        router: RouterId,
        destination: RouterId,
        next_hop: RouterId,
        now: Instant,
    ) -> bool {
        match self
            .get_mut(router, destination)
            .and_then(|e| e.secondary.iter_mut().find(|r| r.next_hop == next_hop))
        {
            Some(route) => {
                route.last_used = Some(now);
                true
            }
            None => false,
        }
    }
}

impl RoutingTable for RankedTable {
    fn lookup(&self, router: RouterId, destination: RouterId) -> Option<RouteCandidates<'_>> {
        self.get(router, destination)
            .map(|e| RouteCandidates { primary: e.primary, secondary: &e.secondary })
    }
}

/// # Ranked Table Builder
///
/// Computes the [`RankedTable`] of a topology, whose links carry [link
/// metrics](crate::netsim::topology::LinkMetrics).
///
/// ```rust
/// use ripsim::netsim::{RankedTableBuilder, Topology};
/// use ripsim::netsim::config::RankedTableConfig;
/// use ripsim::netsim::topology::LinkMetrics;
///
/// # fn main() -> Result<(), ripsim::netsim::NetworkError> {
/// let mut t = Topology::new();
/// let a = t.add_router("A");
/// let b = t.add_router("B");
/// let c = t.add_router("C");
/// t.add_link_with_metrics(a, b, LinkMetrics { bandwidth: 10.0, delay: 5.0, ..Default::default() })?;
/// t.add_link_with_metrics(a, c, LinkMetrics { bandwidth: 5.0, delay: 10.0, ..Default::default() })?;
///
/// let table = RankedTableBuilder::new(RankedTableConfig::default()).build(&t)?;
/// let entry = table.get(a, c).unwrap();
/// assert_eq!(entry.primary.map(|r| r.next_hop), Some(b));
/// assert_eq!(entry.secondary[0].next_hop, c);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RankedTableBuilder {
    config: RankedTableConfig,
}

impl RankedTableBuilder {
    /// Create a new builder with the given configuration
    pub fn new(config: RankedTableConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration of the builder
    pub fn config(&self) -> &RankedTableConfig {
        &self.config
    }

    /// Build the table, stamping all secondary routes with the current time.
    pub fn build(&self, topology: &Topology) -> Result<RankedTable, NetworkError> {
        self.build_at(topology, Instant::now())
    }

    /// Build the table, stamping all secondary routes with `now`.
    pub fn build_at(&self, topology: &Topology, now: Instant) -> Result<RankedTable, NetworkError> {
        self.config.validate()?;
        let weights = self.config.weights;
        let link_cost = move |l: &Link| compound_cost(&l.metrics, &weights);

        let table = match self.config.mode {
            RankingMode::DirectLinks => self.build_direct_links(topology, link_cost, now)?,
            RankingMode::ShortestPath => self.build_shortest_path(topology, link_cost, now)?,
        };

        debug!(
            "Built ranked table with {} entries for {} routers ({:?})",
            table.len(),
            topology.num_devices(),
            self.config.mode
        );
        Ok(table)
    }

    fn build_direct_links<F>(
        &self,
        topology: &Topology,
        link_cost: F,
        now: Instant,
    ) -> Result<RankedTable, NetworkError>
    where
        F: Fn(&Link) -> f64,
    {
        let routers = topology.get_routers();
        let mut table = RankedTable::new();
        for node in routers.iter() {
            let candidates = topology
                .neighbors(*node)?
                .into_iter()
                .filter_map(|n| {
                    topology.link(*node, n).map(|l| Route { cost: link_cost(l), next_hop: n })
                })
                .collect();
            let entry = RankedEntry::from_candidates(candidates, self.config.k, now);
            for target in routers.iter().filter(|t| *t != node) {
                table.insert(*node, *target, entry.clone());
            }
        }
        Ok(table)
    }

    fn build_shortest_path<F>(
        &self,
        topology: &Topology,
        link_cost: F,
        now: Instant,
    ) -> Result<RankedTable, NetworkError>
    where
        F: Fn(&Link) -> f64,
    {
        let dv_config = DistanceVectorConfig::default()
            .max_iterations(self.config.max_iterations)
            .neighbor_cost(NeighborCost::Link);
        let (distances, rounds) =
            DistanceVectorBuilder::new(dv_config).build_with(topology, &link_cost)?;
        if !distances.converged() {
            warn!(
                "Shortest path costs did not converge within {} rounds, ranking with partial costs",
                rounds
            );
        }

        let routers = topology.get_routers();
        let mut table = RankedTable::new();
        for node in routers.iter() {
            let neighbors = topology.neighbors(*node)?;
            for target in routers.iter().filter(|t| *t != node) {
                let mut candidates = Vec::with_capacity(neighbors.len());
                for n in neighbors.iter() {
                    let link = match topology.link(*node, *n) {
                        Some(link) => link,
                        None => continue,
                    };
                    let cost = link_cost(link) + distances.cost(*n, *target)?;
                    if cost.is_finite() {
                        candidates.push(Route { cost, next_hop: *n });
                    }
                }
                table.insert(
                    *node,
                    *target,
                    RankedEntry::from_candidates(candidates, self.config.k, now),
                );
            }
        }
        Ok(table)
    }
}
