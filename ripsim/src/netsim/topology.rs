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

//! # Topology
//!
//! The topology is the read-only input of both table builders. It is an undirected graph, where
//! every node is a named router, and every edge carries both a plain link weight (used by the
//! standard hop-count RIP) and a bundle of link metrics (used by the enhanced RIP).

use crate::netsim::{LinkWeight, NetworkError, RouterId};
use petgraph::stable_graph::StableGraph;
use petgraph::Undirected;

/// Metrics of a single link, used to compute the
/// [compound cost](crate::netsim::cost::compound_cost). The default values are one hop, unit
/// bandwidth, unit delay, and neither jitter nor packet loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkMetrics {
    /// Number of hops this link accounts for
    pub hop_count: f64,
    /// Bandwidth of the link. Zero or negative bandwidth renders the link unusable. All other
    /// metrics must not be negative.
    pub bandwidth: f64,
    /// Delay on the link
    pub delay: f64,
    /// Jitter on the link
    pub jitter: f64,
    /// Packet loss on the link
    pub packet_loss: f64,
}

impl LinkMetrics {
    /// Check that no metric is NaN, and that only the bandwidth is negative. Returns the name and
    /// the value of the first invalid metric.
    fn validate(&self) -> Result<(), (&'static str, f64)> {
        if self.bandwidth.is_nan() {
            return Err(("bandwidth", self.bandwidth));
        }
        for (name, value) in &[
            ("hop_count", self.hop_count),
            ("delay", self.delay),
            ("jitter", self.jitter),
            ("packet_loss", self.packet_loss),
        ] {
            if value.is_nan() || *value < 0.0 {
                return Err((*name, *value));
            }
        }
        Ok(())
    }
}

impl Default for LinkMetrics {
    fn default() -> Self {
        Self { hop_count: 1.0, bandwidth: 1.0, delay: 1.0, jitter: 0.0, packet_loss: 0.0 }
    }
}

/// Attributes of an undirected link
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Weight used by the distance-vector computation
    pub weight: LinkWeight,
    /// Metrics used by the compound cost
    pub metrics: LinkMetrics,
}

impl Default for Link {
    fn default() -> Self {
        Self { weight: 1.0, metrics: LinkMetrics::default() }
    }
}

/// Graph of the topology. Node weights are the router names.
pub type TopologyGraph = StableGraph<String, Link, Undirected, u32>;

/// # Topology
/// Undirected graph of routers and links. Routers are never removed, which means that router ids
/// are handed out with monotonically increasing indices, starting at zero. The tables use this
/// fact to store their entries in flat vectors.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    graph: TopologyGraph,
}

impl Topology {
    /// Generate an empty topology
    pub fn new() -> Self {
        Self { graph: TopologyGraph::default() }
    }

    /// Build a topology from a list of weighted links `(a, b, weight)`. Routers are created in the
    /// order in which their names first appear.
    ///
    /// ```rust
    /// use ripsim::netsim::Topology;
    ///
    /// # fn main() -> Result<(), ripsim::netsim::NetworkError> {
    /// let t = Topology::from_weighted_links(&[("A", "B", 1.0), ("B", "C", 2.0)])?;
    /// let b = t.get_router_id("B")?;
    /// assert_eq!(t.neighbors(b)?.len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_weighted_links(links: &[(&str, &str, LinkWeight)]) -> Result<Self, NetworkError> {
        let mut t = Self::new();
        for (a, b, weight) in links {
            let a = t.get_or_add_router(a);
            let b = t.get_or_add_router(b);
            t.add_link(a, b, *weight)?;
        }
        Ok(t)
    }

    /// Add a new router to the topology, and return its id.
    pub fn add_router<S: Into<String>>(&mut self, name: S) -> RouterId {
        self.graph.add_node(name.into())
    }

    /// Add a link with the given weight, and default metrics. If the link already exists, its
    /// attributes are replaced.
    pub fn add_link(
        &mut self,
        a: RouterId,
        b: RouterId,
        weight: LinkWeight,
    ) -> Result<(), NetworkError> {
        self.insert_link(a, b, Link { weight, ..Default::default() })
    }

    /// Add a link with the given metrics, and the default weight. If the link already exists,
    /// its attributes are replaced.
    pub fn add_link_with_metrics(
        &mut self,
        a: RouterId,
        b: RouterId,
        metrics: LinkMetrics,
    ) -> Result<(), NetworkError> {
        self.insert_link(a, b, Link { metrics, ..Default::default() })
    }

    /// Add a link with all its attributes. If the link already exists, its attributes are
    /// replaced.
    pub fn insert_link(&mut self, a: RouterId, b: RouterId, link: Link) -> Result<(), NetworkError> {
        self.check_router(a)?;
        self.check_router(b)?;
        if a == b {
            return Err(NetworkError::LinkToSelf(a));
        }
        if link.weight.is_nan() || link.weight < 0.0 {
            return Err(NetworkError::InvalidLinkWeight(a, b, link.weight));
        }
        link.metrics.validate().map_err(|(name, value)| {
            NetworkError::InvalidLinkMetric(a, b, name, value)
        })?;
        self.graph.update_edge(a, b, link);
        Ok(())
    }

    /// Returns the attributes of the link between `a` and `b`, if it exists.
    pub fn link(&self, a: RouterId, b: RouterId) -> Option<&Link> {
        self.graph.find_edge(a, b).and_then(|e| self.graph.edge_weight(e))
    }

    /// Returns all neighbors of a router, sorted by their id. The builders rely on this order to
    /// be deterministic.
    pub fn neighbors(&self, router: RouterId) -> Result<Vec<RouterId>, NetworkError> {
        self.check_router(router)?;
        let mut neighbors: Vec<RouterId> = self.graph.neighbors(router).collect();
        neighbors.sort();
        neighbors.dedup();
        Ok(neighbors)
    }

    /// Returns a list of all router ids, in ascending order.
    pub fn get_routers(&self) -> Vec<RouterId> {
        let mut routers: Vec<RouterId> = self.graph.node_indices().collect();
        routers.sort();
        routers
    }

    /// Returns the number of routers in the topology
    pub fn num_devices(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns true if the router exists in the topology
    pub fn contains(&self, router: RouterId) -> bool {
        self.graph.contains_node(router)
    }

    /// Get the RouterID with the given name. If multiple routers have the same name, then the
    /// first occurence of this name is returned. If the name was not found, an error is returned.
    pub fn get_router_id(&self, name: impl AsRef<str>) -> Result<RouterId, NetworkError> {
        self.graph
            .node_indices()
            .find(|r| self.graph[*r] == name.as_ref())
            .ok_or_else(|| NetworkError::DeviceNameNotFound(name.as_ref().to_string()))
    }

    /// Returns the name of the router, if the ID was found.
    pub fn get_router_name(&self, router: RouterId) -> Result<&str, NetworkError> {
        self.graph
            .node_weight(router)
            .map(|n| n.as_str())
            .ok_or(NetworkError::DeviceNotFound(router))
    }

    /// Returns an iterator over all undirected links, as `(a, b, link)`.
    pub fn links(&self) -> impl Iterator<Item = (RouterId, RouterId, &Link)> + '_ {
        self.graph.edge_indices().filter_map(move |e| {
            let (a, b) = self.graph.edge_endpoints(e)?;
            Some((a, b, self.graph.edge_weight(e)?))
        })
    }

    fn get_or_add_router(&mut self, name: &str) -> RouterId {
        match self.get_router_id(name) {
            Ok(id) => id,
            Err(_) => self.add_router(name),
        }
    }

    fn check_router(&self, router: RouterId) -> Result<(), NetworkError> {
        if self.contains(router) {
            Ok(())
        } else {
            Err(NetworkError::DeviceNotFound(router))
        }
    }
}
