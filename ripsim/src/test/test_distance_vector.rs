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

//! Test the distance-vector table builder (standard RIP) on the example networks.

use crate::example_networks::{CycleNet, ExampleNetwork};
use crate::netsim::config::{DistanceVectorConfig, NeighborCost};
use crate::netsim::distance_vector::build_table;
use crate::netsim::table::{Route, RoutingTable};
use crate::netsim::{Cost, DistanceVectorBuilder, DistanceVectorTable, NetworkError, RouterId};
use crate::netsim::Topology;
use itertools::iproduct;
use lazy_static::lazy_static;
use maplit::hashmap;
use std::collections::HashMap;

lazy_static! {
    static ref A: RouterId = 0.into();
    static ref B: RouterId = 1.into();
    static ref C: RouterId = 2.into();
    static ref D: RouterId = 3.into();
    static ref E: RouterId = 4.into();
}

fn get_test_net() -> Topology {
    let net = CycleNet::net().unwrap();
    assert_eq!(net.get_router_id("A").unwrap(), *A);
    assert_eq!(net.get_router_id("B").unwrap(), *B);
    assert_eq!(net.get_router_id("C").unwrap(), *C);
    assert_eq!(net.get_router_id("D").unwrap(), *D);
    assert_eq!(net.get_router_id("E").unwrap(), *E);
    net
}

fn check_table(
    table: &DistanceVectorTable,
    expected: HashMap<RouterId, HashMap<RouterId, (Cost, RouterId)>>,
) {
    for (source, routes) in expected {
        for (destination, (cost, next_hop)) in routes {
            assert_eq!(
                table.entry(source, destination).unwrap(),
                (cost, Some(next_hop)),
                "wrong entry from {:?} to {:?}",
                source,
                destination
            );
        }
    }
}

#[test]
fn cycle_net_table_cost() {
    let _ = pretty_env_logger::try_init();
    let net = get_test_net();
    let (table, rounds) =
        DistanceVectorBuilder::new(DistanceVectorConfig::default().trace(true)).build(&net).unwrap();

    assert_eq!(rounds, 3);
    assert_eq!(table.history(), &[18, 1, 0]);

    check_table(
        &table,
        hashmap! {
            *A => hashmap! {*B => (1.0, *B), *C => (3.0, *B), *D => (4.0, *C), *E => (5.0, *B)},
            *B => hashmap! {*A => (1.0, *A), *C => (2.0, *C), *D => (3.0, *C), *E => (4.0, *D)},
            *C => hashmap! {*A => (3.0, *B), *B => (2.0, *B), *D => (1.0, *D), *E => (2.0, *D)},
            *D => hashmap! {*A => (4.0, *C), *B => (3.0, *C), *C => (1.0, *C), *E => (1.0, *E)},
            *E => hashmap! {*A => (5.0, *D), *B => (4.0, *D), *C => (2.0, *D), *D => (1.0, *D)},
        },
    );
}

#[test]
fn cycle_net_link_cost() {
    let net = get_test_net();
    let config = DistanceVectorConfig::default().neighbor_cost(NeighborCost::Link);
    let (table, rounds) = DistanceVectorBuilder::new(config).build(&net).unwrap();

    assert_eq!(rounds, 4);
    assert_eq!(table.history(), &[16, 3, 1, 0]);

    check_table(
        &table,
        hashmap! {
            *A => hashmap! {*B => (1.0, *B), *C => (3.0, *B), *D => (4.0, *B), *E => (5.0, *B)},
            *B => hashmap! {*A => (1.0, *A), *C => (2.0, *C), *D => (3.0, *C), *E => (4.0, *C)},
            *C => hashmap! {*A => (3.0, *B), *B => (2.0, *B), *D => (1.0, *D), *E => (2.0, *D)},
            *D => hashmap! {*A => (4.0, *C), *B => (3.0, *C), *C => (1.0, *C), *E => (1.0, *E)},
            *E => hashmap! {*A => (5.0, *D), *B => (4.0, *D), *C => (2.0, *D), *D => (1.0, *D)},
        },
    );
}

#[test]
fn both_modes_reach_same_costs() {
    let net = get_test_net();
    let (table, _) = DistanceVectorBuilder::default().build(&net).unwrap();
    let config = DistanceVectorConfig::default().neighbor_cost(NeighborCost::Link);
    let (link_table, _) = DistanceVectorBuilder::new(config).build(&net).unwrap();
    for (u, v) in iproduct_routers(&net) {
        assert_eq!(table.cost(u, v).unwrap(), link_table.cost(u, v).unwrap());
    }
}

#[test]
fn fixed_point() -> Result<(), NetworkError> {
    let net = get_test_net();
    for mode in [NeighborCost::Table, NeighborCost::Link].iter() {
        let config = DistanceVectorConfig::default().neighbor_cost(*mode);
        let (mut table, _) = DistanceVectorBuilder::new(config).build(&net)?;
        assert!(table.converged());
        let converged = table.clone();
        assert_eq!(table.relax(&net, *mode)?, 0);
        assert_eq!(table.routes(*A)?, converged.routes(*A)?);

        // no neighbor offers a strictly cheaper path
        for (u, v) in iproduct_routers(&net) {
            if u == v {
                continue;
            }
            for w in net.neighbors(u)? {
                let weight = net.link(u, w).unwrap().weight;
                assert!(table.cost(u, v)? <= weight + table.cost(w, v)?);
            }
        }
    }
    Ok(())
}

#[test]
fn self_routes() -> Result<(), NetworkError> {
    let net = get_test_net();
    let (table, _) = build_table(&net, 1)?;
    for r in net.get_routers() {
        assert_eq!(table.entry(r, r)?, (0.0, Some(r)));
    }
    Ok(())
}

#[test]
fn next_hops_are_neighbors() -> Result<(), NetworkError> {
    let net = get_test_net();
    let (table, _) = DistanceVectorBuilder::default().build(&net)?;
    for (u, v) in iproduct_routers(&net) {
        if u == v {
            continue;
        }
        let next_hop = table.next_hop(u, v)?.unwrap();
        assert!(net.neighbors(u)?.contains(&next_hop));
    }
    Ok(())
}

#[test]
fn iteration_budget_exhausted() -> Result<(), NetworkError> {
    let net = get_test_net();
    let (table, rounds) = build_table(&net, 1)?;
    assert_eq!(rounds, 1);
    assert_eq!(table.history(), &[18]);
    assert!(!table.converged());
    // the table is usable, even though it did not converge
    assert_eq!(table.entry(*A, *C)?, (3.0, Some(*B)));

    let (table, rounds) = build_table(&net, 0)?;
    assert_eq!(rounds, 0);
    assert!(!table.converged());
    Ok(())
}

#[test]
fn trace_does_not_change_result() -> Result<(), NetworkError> {
    let _ = pretty_env_logger::try_init();
    let net = get_test_net();
    let quiet = DistanceVectorBuilder::default().build(&net)?;
    let traced = DistanceVectorBuilder::new(DistanceVectorConfig::default().trace(true)).build(&net)?;
    assert_eq!(quiet, traced);
    Ok(())
}

#[test]
fn unreachable_router() -> Result<(), NetworkError> {
    let mut net = get_test_net();
    let f = net.add_router("F");
    let (table, _) = DistanceVectorBuilder::default().build(&net)?;
    assert_eq!(table.entry(*A, f)?, (Cost::INFINITY, None));
    assert_eq!(table.entry(f, *A)?, (Cost::INFINITY, None));
    assert_eq!(table.entry(f, f)?, (0.0, Some(f)));

    let candidates = table.lookup(*A, f).unwrap();
    assert_eq!(candidates.primary, None);
    assert!(candidates.secondary.is_empty());
    assert_eq!(table.lookup(*A, *C).unwrap().primary, Some(Route { cost: 3.0, next_hop: *B }));
    assert!(table.lookup(*A, 17.into()).is_none());

    assert_eq!(table.entry(*A, 17.into()), Err(NetworkError::DeviceNotFound(17.into())));
    Ok(())
}

#[test]
fn zero_weight_links() -> Result<(), NetworkError> {
    let net = Topology::from_weighted_links(&[("A", "B", 0.0), ("B", "C", 0.0), ("A", "C", 1.0)])?;
    let (table, _) = DistanceVectorBuilder::default().build(&net)?;
    assert_eq!(table.entry(*A, *C)?, (0.0, Some(*B)));
    Ok(())
}

#[test]
fn empty_topology() -> Result<(), NetworkError> {
    let (table, rounds) = DistanceVectorBuilder::default().build(&Topology::new())?;
    assert_eq!(rounds, 1);
    assert_eq!(table.num_devices(), 0);
    Ok(())
}

fn iproduct_routers(net: &Topology) -> Vec<(RouterId, RouterId)> {
    let routers = net.get_routers();
    iproduct!(routers.iter().copied(), routers.iter().copied()).collect()
}
