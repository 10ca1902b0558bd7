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

//! # Helper (printer) functions for the routing tables
//! Module containing helper functions to get formatted strings and print the routing tables,
//! forwarding paths and forwarding decisions, with the names of the routers inserted.

use crate::netsim::forwarding::{DropReason, ForwardingDecision};
use crate::netsim::ranked::{RankedEntry, RankedTable};
use crate::netsim::topology::Topology;
use crate::netsim::{DistanceVectorTable, NetworkError, RouterId};
use itertools::Itertools;

/// Get a vector of strings, which represents the distance-vector table of a router. Each line
/// represents one destination, sorted by the id of the destination. The router itself is
/// skipped.
pub fn distance_vector_table(
    topology: &Topology,
    table: &DistanceVectorTable,
    router: RouterId,
) -> Result<Vec<String>, NetworkError> {
    let mut result: Vec<String> = Vec::new();
    for (destination, cost, next_hop) in table.routes(router)? {
        if destination == router {
            continue;
        }
        let name = topology.get_router_name(destination)?;
        result.push(match next_hop {
            Some(nh) if cost.is_finite() => {
                format!("{}: cost {} via {}", name, cost, topology.get_router_name(nh)?)
            }
            _ => format!("{}: unreachable", name),
        });
    }
    Ok(result)
}

/// Returns the formatted string of an entry of a ranked table. The primary route is prefixed
/// with a `*`.
pub fn ranked_entry(topology: &Topology, entry: &RankedEntry) -> Result<String, NetworkError> {
    let primary = match entry.primary {
        Some(r) => format!("* {} ({})", topology.get_router_name(r.next_hop)?, r.cost),
        None => String::from("* none"),
    };
    let secondary = entry
        .secondary
        .iter()
        .map(|r| Ok(format!("{} ({})", topology.get_router_name(r.next_hop)?, r.cost)))
        .collect::<Result<Vec<String>, NetworkError>>()?;
    if secondary.is_empty() {
        Ok(primary)
    } else {
        Ok(format!("{}, backup: [{}]", primary, secondary.join(", ")))
    }
}

/// Get a vector of strings, which represents all entries of a router in the ranked table. Each
/// line represents one destination, sorted by the id of the destination.
pub fn ranked_table(
    topology: &Topology,
    table: &RankedTable,
    router: RouterId,
) -> Result<Vec<String>, NetworkError> {
    let entries = match table.get_entries(router) {
        Some(entries) => entries,
        None => return Ok(Vec::new()),
    };
    entries
        .iter()
        .sorted_by_key(|(d, _)| **d)
        .map(|(d, e)| {
            Ok(format!("{}: {}", topology.get_router_name(*d)?, ranked_entry(topology, e)?))
        })
        .collect()
}

/// Returns the formatted string of a forwarding path, like `A => B => C`.
pub fn route(topology: &Topology, path: &[RouterId]) -> Result<String, NetworkError> {
    Ok(path
        .iter()
        .map(|r| topology.get_router_name(*r))
        .collect::<Result<Vec<&str>, NetworkError>>()?
        .join(" => "))
}

/// Returns the formatted string of a forwarding decision taken at router `current`.
pub fn decision(
    topology: &Topology,
    current: RouterId,
    decision: &ForwardingDecision,
) -> Result<String, NetworkError> {
    let name = topology.get_router_name(current)?;
    Ok(match decision {
        ForwardingDecision::Delivered => format!("{}: delivered", name),
        ForwardingDecision::Primary(next) => {
            format!("{} -> {} (primary)", name, topology.get_router_name(*next)?)
        }
        ForwardingDecision::Secondary(next) => {
            format!("{} -> {} (secondary)", name, topology.get_router_name(*next)?)
        }
        ForwardingDecision::Dropped(reason) => format!(
            "{}: dropped ({})",
            name,
            match reason {
                DropReason::AuthenticationFailed => "authentication failed",
                DropReason::NoRoute => "no route",
                DropReason::AllLinksFailed => "all links failed",
            }
        ),
    })
}

/// Print the distance-vector table of a given router.
pub fn print_distance_vector_table(
    topology: &Topology,
    table: &DistanceVectorTable,
    router: RouterId,
) -> Result<(), NetworkError> {
    println!("Routing table of {}", topology.get_router_name(router)?);
    for line in distance_vector_table(topology, table, router)? {
        println!("  {}", line);
    }
    Ok(())
}

/// Print the ranked table of a given router.
pub fn print_ranked_table(
    topology: &Topology,
    table: &RankedTable,
    router: RouterId,
) -> Result<(), NetworkError> {
    println!("Ranked table of {}", topology.get_router_name(router)?);
    for line in ranked_table(topology, table, router)? {
        println!("  {}", line);
    }
    Ok(())
}
