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

//! # Forwarding Engine
//!
//! The forwarding engine decides, at a single router, where a packet goes next. The decision
//! passes the following gates, in order:
//!
//! 1. The authentication tag of the packet must verify, otherwise the packet is dropped. This
//!    happens before anything else, regardless of the destination.
//! 2. If the router is the destination, the packet is delivered.
//! 3. If the table has no entry towards the destination, the packet is dropped.
//! 4. The primary route is used, unless its link is recorded as failed in the packet.
//! 5. Otherwise, the first secondary route (in ascending cost) whose link is not recorded as
//!    failed is used.
//! 6. Otherwise, the packet is dropped.
//!
//! The engine never modifies the table. Each call is one discrete step of the simulation: the
//! caller moves the packet to the returned next hop, and may record failed links in the packet
//! between two steps using [`mark_link_failure`].

use crate::netsim::auth::SecretKey;
use crate::netsim::packet::Packet;
use crate::netsim::table::RoutingTable;
use crate::netsim::{NetworkError, RouterId};
use log::*;
use std::collections::HashSet;

/// Reason why a packet was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// The authentication tag did not match the payload
    AuthenticationFailed,
    /// The table does not know any route towards the destination
    NoRoute,
    /// All known routes use a link that is recorded as failed in the packet
    AllLinksFailed,
}

/// Decision of the forwarding engine for a packet at a router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForwardingDecision {
    /// The packet has reached its destination
    Delivered,
    /// The packet is forwarded over the primary route
    Primary(RouterId),
    /// The packet is forwarded over a secondary route
    Secondary(RouterId),
    /// The packet is dropped
    Dropped(DropReason),
}

impl ForwardingDecision {
    /// Returns the next hop, if the packet is forwarded.
    pub fn next_hop(&self) -> Option<RouterId> {
        match self {
            Self::Primary(r) | Self::Secondary(r) => Some(*r),
            Self::Delivered | Self::Dropped(_) => None,
        }
    }
}

/// # Forwarding Engine
///
/// Holds the shared secret key, used to verify every packet.
///
/// ```rust
/// use ripsim::netsim::{ForwardingEngine, Packet, SecretKey};
/// use ripsim::netsim::ranked::{RankedEntry, RankedTable};
/// use ripsim::netsim::table::Route;
/// use std::time::Instant;
///
/// let key = SecretKey::new(b"shared_secret_key").unwrap();
/// let (a, b, c) = (0.into(), 1.into(), 2.into());
///
/// let mut table = RankedTable::new();
/// let candidates = vec![Route { cost: 1.0, next_hop: b }, Route { cost: 2.0, next_hop: c }];
/// table.insert(a, c, RankedEntry::from_candidates(candidates, 3, Instant::now()));
///
/// let engine = ForwardingEngine::new(key.clone());
/// let mut packet = Packet::new(a, c, "Hello World", &key);
/// assert_eq!(engine.forward(&packet, a, &table), Some(b));
///
/// // the link towards b is down. Use the secondary route instead
/// packet.mark_link_failure(a, b);
/// assert_eq!(engine.forward(&packet, a, &table), Some(c));
/// ```
#[derive(Debug, Clone)]
pub struct ForwardingEngine {
    key: SecretKey,
    verbose: bool,
}

impl ForwardingEngine {
    /// Create a new engine with the shared key
    pub fn new(key: SecretKey) -> Self {
        Self { key, verbose: false }
    }

    /// Log every decision at `info` level instead of `debug`. This has no effect on the
    /// decisions themselves.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns the shared key
    pub fn key(&self) -> &SecretKey {
        &self.key
    }

    /// Decide what happens with the packet at router `current`.
    pub fn decide<T>(&self, packet: &Packet, current: RouterId, table: &T) -> ForwardingDecision
    where
        T: RoutingTable + ?Sized,
    {
        decide(packet, current, table, &self.key, self.verbose)
    }

    /// Returns the next hop of the packet at router `current`, or `None` if the packet is
    /// delivered or dropped.
    pub fn forward<T>(&self, packet: &Packet, current: RouterId, table: &T) -> Option<RouterId>
    where
        T: RoutingTable + ?Sized,
    {
        self.decide(packet, current, table).next_hop()
    }

    /// Forward the packet hop by hop, starting at `source`, until it is delivered or dropped. The
    /// packet is not modified on the way. Returns the path including the source and the
    /// destination, or an error if the packet is dropped or enters a forwarding loop.
    pub fn walk<T>(
        &self,
        packet: &Packet,
        source: RouterId,
        table: &T,
    ) -> Result<Vec<RouterId>, NetworkError>
    where
        T: RoutingTable + ?Sized,
    {
        let mut visited_routers: HashSet<RouterId> = HashSet::new();
        let mut path: Vec<RouterId> = Vec::new();
        let mut current = source;
        loop {
            path.push(current);
            // the decision only depends on the router, so visiting it twice is a loop
            if !visited_routers.insert(current) {
                trace!("Forwarding loop detected: {:?}", path);
                return Err(NetworkError::ForwardingLoop(path));
            }
            current = match self.decide(packet, current, table) {
                ForwardingDecision::Delivered => return Ok(path),
                ForwardingDecision::Primary(next) | ForwardingDecision::Secondary(next) => next,
                ForwardingDecision::Dropped(DropReason::AuthenticationFailed) => {
                    return Err(NetworkError::AuthenticationFailed(current))
                }
                ForwardingDecision::Dropped(_) => {
                    trace!("Black hole detected: {:?}", path);
                    return Err(NetworkError::ForwardingBlackHole(path));
                }
            };
        }
    }
}

/// Returns the next hop of the packet at router `current`, or `None` if the packet is delivered
/// or dropped. `verbose` only changes the log level of the decision.
pub fn forward<T>(
    packet: &Packet,
    current: RouterId,
    table: &T,
    key: &SecretKey,
    verbose: bool,
) -> Option<RouterId>
where
    T: RoutingTable + ?Sized,
{
    decide(packet, current, table, key, verbose).next_hop()
}

/// Record in the packet header that the directed link `(u, v)` has failed, such that downstream
/// routers avoid it.
pub fn mark_link_failure(packet: &mut Packet, u: RouterId, v: RouterId) {
    packet.mark_link_failure(u, v)
}

fn decide<T>(
    packet: &Packet,
    current: RouterId,
    table: &T,
    key: &SecretKey,
    verbose: bool,
) -> ForwardingDecision
where
    T: RoutingTable + ?Sized,
{
    let decision = select_next_hop(packet, current, table, key);
    let level = if verbose { Level::Info } else { Level::Debug };
    let (cur, dest) = (current.index(), packet.dest.index());
    match decision {
        ForwardingDecision::Delivered => {
            log!(level, "Packet delivered at {} with data: {}", dest, packet.data)
        }
        ForwardingDecision::Primary(next) => {
            log!(level, "Forward {} -> {} (primary)", cur, next.index())
        }
        ForwardingDecision::Secondary(next) => {
            log!(level, "Forward {} -> {} (secondary)", cur, next.index())
        }
        ForwardingDecision::Dropped(DropReason::AuthenticationFailed) => {
            log!(level, "Packet dropped at {}: authentication failed", cur)
        }
        ForwardingDecision::Dropped(DropReason::NoRoute) => {
            log!(level, "Packet dropped: no route from {} to {}", cur, dest)
        }
        ForwardingDecision::Dropped(DropReason::AllLinksFailed) => {
            log!(level, "Packet dropped: no available path from {} to {}", cur, dest)
        }
    }
    decision
}

fn select_next_hop<T>(
    packet: &Packet,
    current: RouterId,
    table: &T,
    key: &SecretKey,
) -> ForwardingDecision
where
    T: RoutingTable + ?Sized,
{
    if !packet.verify(key) {
        return ForwardingDecision::Dropped(DropReason::AuthenticationFailed);
    }
    if current == packet.dest {
        return ForwardingDecision::Delivered;
    }
    let candidates = match table.lookup(current, packet.dest) {
        Some(candidates) => candidates,
        None => return ForwardingDecision::Dropped(DropReason::NoRoute),
    };
    if let Some(primary) = candidates.primary {
        if !packet.is_link_failed(current, primary.next_hop) {
            return ForwardingDecision::Primary(primary.next_hop);
        }
    }
    if let Some(secondary) =
        candidates.secondary.iter().find(|r| !packet.is_link_failed(current, r.next_hop))
    {
        return ForwardingDecision::Secondary(secondary.next_hop);
    }
    if candidates.primary.is_none() && candidates.secondary.is_empty() {
        ForwardingDecision::Dropped(DropReason::NoRoute)
    } else {
        ForwardingDecision::Dropped(DropReason::AllLinksFailed)
    }
}
