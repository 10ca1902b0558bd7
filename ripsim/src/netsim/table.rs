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

//! # Routing Table Interface
//!
//! Both table kinds are consumed by the [forwarding engine](crate::netsim::ForwardingEngine)
//! through the `RoutingTable` trait. The engine only ever reads the table.

use crate::netsim::{Cost, RouterId};
use std::time::Instant;

/// A single route, the next hop and its cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    /// Cost of the route
    pub cost: Cost,
    /// Neighbor to which packets are forwarded
    pub next_hop: RouterId,
}

/// An alternate route, kept for failover. The timestamp tells when the route was created or
/// last used, and is used to prune stale routes. Routes without timestamp are never pruned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondaryRoute {
    /// Cost of the route
    pub cost: Cost,
    /// Neighbor to which packets are forwarded
    pub next_hop: RouterId,
    /// Time of creation or last use
    pub last_used: Option<Instant>,
}

impl SecondaryRoute {
    /// Returns the route without the timestamp
    pub fn route(&self) -> Route {
        Route { cost: self.cost, next_hop: self.next_hop }
    }
}

/// Borrowed view of all known routes from a router towards a destination. The secondary routes
/// are sorted by ascending cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteCandidates<'a> {
    /// The best route, if any
    pub primary: Option<Route>,
    /// Alternate routes, sorted by ascending cost
    pub secondary: &'a [SecondaryRoute],
}

/// Read access to a routing table, as needed for forwarding packets.
pub trait RoutingTable {
    /// Returns all routes of `router` towards `destination`, or `None` if the table has no entry
    /// for this pair.
    fn lookup(&self, router: RouterId, destination: RouterId) -> Option<RouteCandidates<'_>>;
}
