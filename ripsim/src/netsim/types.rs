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

//! Module containing all type definitions

use crate::netsim::auth::AuthError;
use petgraph::prelude::*;
use thiserror::Error;

type IndexType = u32;
/// Router Identification (and index into the graph)
pub type RouterId = NodeIndex<IndexType>;
/// Link Weight for the standard (hop-count) topology
pub type LinkWeight = f64;
/// Scalar route cost, as stored in the routing tables. Unreachable destinations have cost
/// `Cost::INFINITY`.
pub type Cost = f64;

/// Configuration Error
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// A weight of the compound cost function is negative or not a number.
    #[error("Invalid compound cost weight for {0}: {1}")]
    InvalidCostWeight(&'static str, f64),
}

/// Network Errors
#[derive(Error, Debug, PartialEq)]
pub enum NetworkError {
    /// Configuration error
    #[error("Configuration Error: {0}")]
    ConfigError(#[from] ConfigError),
    /// Authentication setup error (key or tag could not be used)
    #[error("Authentication Error: {0}")]
    AuthError(#[from] AuthError),
    /// Device is not present in the topology
    #[error("Network device was not found in topology: {0:?}")]
    DeviceNotFound(RouterId),
    /// Device name is not present in the topology
    #[error("Network device name was not found in topology: {0}")]
    DeviceNameNotFound(String),
    /// The link weight is negative or not a number
    #[error("Invalid link weight on {0:?} -- {1:?}: {2}")]
    InvalidLinkWeight(RouterId, RouterId, LinkWeight),
    /// A link metric is not a number, or negative where it must not be
    #[error("Invalid link metric {2} on {0:?} -- {1:?}: {3}")]
    InvalidLinkMetric(RouterId, RouterId, &'static str, f64),
    /// A router cannot be connected to itself
    #[error("Cannot add a link from {0:?} to itself")]
    LinkToSelf(RouterId),
    /// Forwarding loop detected
    #[error("Forwarding Loop occurred! path: {0:?}")]
    ForwardingLoop(Vec<RouterId>),
    /// Black hole detected
    #[error("Black hole occurred! path: {0:?}")]
    ForwardingBlackHole(Vec<RouterId>),
    /// The packet was dropped because its authentication tag did not verify
    #[error("Packet failed authentication at {0:?}")]
    AuthenticationFailed(RouterId),
}
