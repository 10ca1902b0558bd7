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

#![deny(missing_docs)]

//! # RipSim: Distance-Vector Routing and Failure-Aware Forwarding
//! This is a library for computing RIP-like routing tables on a simulated topology, and for
//! forwarding authenticated packets over them.
//!
//! ## Structure
//!
//! This library is structured in the following way:
//!
//! - **[`NetSim`](netsim)**: The simulator itself. It contains the [`Topology`](netsim::Topology),
//!   the two table builders ([`DistanceVectorBuilder`](netsim::DistanceVectorBuilder) for
//!   standard RIP and [`RankedTableBuilder`](netsim::RankedTableBuilder) for enhanced RIP with
//!   backup routes), the [`TableMaintainer`](netsim::TableMaintainer) for pruning stale backup
//!   routes, and the [`ForwardingEngine`](netsim::ForwardingEngine), which moves authenticated
//!   [`Packets`](netsim::Packet) hop by hop.
//!
//! - **[`Example Networks`](example_networks)**: Topologies used throughout the tests and the
//!   documentation.
//!
//! ## Logging
//!
//! All modules log through the [`log`](https://docs.rs/log) facade. Enable a logger (for instance
//! `pretty_env_logger`) and set `RUST_LOG=ripsim=info` to see the progress of the
//! distance-vector rounds (with `trace` enabled in the config) and the forwarding decisions
//! (with a verbose engine).

pub mod example_networks;
pub mod netsim;
mod test;
