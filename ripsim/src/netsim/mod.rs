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

#![deny(missing_docs, missing_debug_implementations)]

//! # NetSim
//!
//! This is a library for simulating distance-vector routing (RIP-like) on a small topology, and
//! for forwarding authenticated packets over the resulting tables, with local failover around
//! failed links.
//!
//! Two kinds of routing tables can be computed:
//!
//! - **Standard RIP**: The [`DistanceVectorBuilder`] relaxes all routes of all routers in rounds,
//!   until no entry changes anymore (or the iteration budget is used up). Every router ends up
//!   with a single `(cost, next_hop)` per destination.
//! - **Enhanced RIP**: The [`RankedTableBuilder`] computes a primary route and up to `k`
//!   secondary routes per destination, ranked by a [compound cost](cost) of bandwidth, delay,
//!   jitter and packet loss. Unused secondary routes are removed by the [`TableMaintainer`].
//!
//! Packets carry an HMAC tag over their payload, and a list of links known to have failed. The
//! [`ForwardingEngine`] verifies the tag at every hop, and chooses the primary route, or the
//! first secondary route whose link has not failed.
//!
//! ## Example usage
//!
//! The following example builds the tables of a small network, and sends a packet from `A` to
//! `D`. The link from `A` to `B` goes down, and the packet is rerouted over `C`.
//!
//! ```rust
//! use ripsim::netsim::{ForwardingEngine, Packet, RankedTableBuilder, SecretKey, Topology};
//! use ripsim::netsim::config::{RankedTableConfig, RankingMode};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let t = Topology::from_weighted_links(&[
//!         ("A", "B", 1.0),
//!         ("A", "C", 1.0),
//!         ("B", "D", 1.0),
//!         ("C", "D", 1.0),
//!     ])?;
//!     let a = t.get_router_id("A")?;
//!     let b = t.get_router_id("B")?;
//!     let c = t.get_router_id("C")?;
//!     let d = t.get_router_id("D")?;
//!
//!     let config = RankedTableConfig::default().mode(RankingMode::ShortestPath);
//!     let table = RankedTableBuilder::new(config).build(&t)?;
//!
//!     let key = SecretKey::new(b"shared_secret_key")?;
//!     let engine = ForwardingEngine::new(key.clone());
//!
//!     let mut packet = Packet::new(a, d, "Hello World", &key);
//!     assert_eq!(engine.walk(&packet, a, &table)?, vec![a, b, d]);
//!
//!     packet.mark_link_failure(a, b);
//!     assert_eq!(engine.walk(&packet, a, &table)?, vec![a, c, d]);
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod cost;
pub mod distance_vector;
pub mod forwarding;
pub mod maintainer;
pub mod packet;
pub mod printer;
pub mod ranked;
pub mod table;
pub mod topology;
pub(crate) mod types;

pub use auth::{AuthError, AuthTag, SecretKey};
pub use distance_vector::{DistanceVectorBuilder, DistanceVectorTable};
pub use forwarding::{DropReason, ForwardingDecision, ForwardingEngine};
pub use maintainer::TableMaintainer;
pub use packet::Packet;
pub use ranked::{RankedEntry, RankedTable, RankedTableBuilder};
pub use table::RoutingTable;
pub use topology::Topology;
pub use types::{ConfigError, Cost, LinkWeight, NetworkError, RouterId};
