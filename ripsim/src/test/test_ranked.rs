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

//! Test the ranked table builder (enhanced RIP) on the metric triangle.

use crate::example_networks::{ExampleNetwork, MetricTriangle};
use crate::netsim::config::{RankedTableConfig, RankingMode};
use crate::netsim::cost::CostWeights;
use crate::netsim::table::Route;
use crate::netsim::topology::LinkMetrics;
use crate::netsim::{
    ConfigError, Cost, NetworkError, RankedEntry, RankedTable, RankedTableBuilder, RouterId,
    Topology,
};
use assert_approx_eq::assert_approx_eq;
use lazy_static::lazy_static;
use std::time::{Duration, Instant};

lazy_static! {
    static ref A: RouterId = 0.into();
    static ref B: RouterId = 1.into();
    static ref C: RouterId = 2.into();
}

fn build(mode: RankingMode) -> RankedTable {
    let net = MetricTriangle::net().unwrap();
    RankedTableBuilder::new(RankedTableConfig::default().mode(mode)).build(&net).unwrap()
}

/// Check the primary and secondary routes of an entry, given as `(cost, next_hop)`.
fn check_entry(entry: &RankedEntry, primary: (Cost, RouterId), secondary: &[(Cost, RouterId)]) {
    let p = entry.primary.unwrap();
    assert_approx_eq!(p.cost, primary.0);
    assert_eq!(p.next_hop, primary.1);
    assert_eq!(entry.secondary.len(), secondary.len());
    for (route, (cost, next_hop)) in entry.secondary.iter().zip(secondary.iter()) {
        assert_approx_eq!(route.cost, *cost);
        assert_eq!(route.next_hop, *next_hop);
    }
}

#[test]
fn direct_links() {
    let _ = pretty_env_logger::try_init();
    let table = build(RankingMode::DirectLinks);
    assert_eq!(table.len(), 6);
    assert!(table.get(*A, *A).is_none());

    for dest in [*B, *C].iter() {
        check_entry(table.get(*A, *dest).unwrap(), (6.1, *B), &[(11.2, *C)]);
    }
    for dest in [*A, *C].iter() {
        check_entry(table.get(*B, *dest).unwrap(), (3.05, *C), &[(6.1, *A)]);
    }
    for dest in [*A, *B].iter() {
        check_entry(table.get(*C, *dest).unwrap(), (3.05, *B), &[(11.2, *A)]);
    }
}

#[test]
fn shortest_path() {
    let table = build(RankingMode::ShortestPath);
    assert_eq!(table.len(), 6);

    check_entry(table.get(*A, *B).unwrap(), (6.1, *B), &[(14.25, *C)]);
    check_entry(table.get(*A, *C).unwrap(), (9.15, *B), &[(11.2, *C)]);
    check_entry(table.get(*B, *A).unwrap(), (6.1, *A), &[(12.2, *C)]);
    check_entry(table.get(*B, *C).unwrap(), (3.05, *C), &[(15.25, *A)]);
    check_entry(table.get(*C, *A).unwrap(), (9.15, *B), &[(11.2, *A)]);
    check_entry(table.get(*C, *B).unwrap(), (3.05, *B), &[(17.3, *A)]);
}

#[test]
fn secondary_routes_are_sorted_and_limited() -> Result<(), NetworkError> {
    // star around A with five neighbors of increasing delay
    let mut net = Topology::new();
    let a = net.add_router("A");
    let leaves: Vec<RouterId> = (1..=5).map(|i| net.add_router(format!("L{}", i))).collect();
    for (i, leaf) in leaves.iter().enumerate().rev() {
        let metrics = LinkMetrics { delay: i as f64, ..Default::default() };
        net.add_link_with_metrics(a, *leaf, metrics)?;
    }

    for mode in [RankingMode::DirectLinks, RankingMode::ShortestPath].iter() {
        for k in 0..=5 {
            let config = RankedTableConfig::default().mode(*mode).k(k);
            let table = RankedTableBuilder::new(config).build(&net)?;
            let entry = table.get(a, leaves[4]).unwrap();
            assert_eq!(entry.secondary.len(), k.min(4));
            let primary = entry.primary.unwrap();
            let mut last = primary.cost;
            for route in entry.secondary.iter() {
                assert!(route.cost >= last);
                assert_ne!(route.next_hop, primary.next_hop);
                last = route.cost;
            }
        }
    }

    let table = RankedTableBuilder::default().build(&net)?;
    let entry = table.get(a, leaves[2]).unwrap();
    assert_eq!(entry.primary, Some(Route { cost: 2.0, next_hop: leaves[0] }));
    assert_eq!(
        entry.secondary.iter().map(|r| r.next_hop).collect::<Vec<_>>(),
        vec![leaves[1], leaves[2], leaves[3]]
    );
    Ok(())
}

#[test]
fn ties_broken_by_router_id() -> Result<(), NetworkError> {
    let mut net = Topology::new();
    let a = net.add_router("A");
    let b = net.add_router("B");
    let c = net.add_router("C");
    let d = net.add_router("D");
    // insert the links in reverse order
    net.add_link_with_metrics(a, d, LinkMetrics::default())?;
    net.add_link_with_metrics(a, c, LinkMetrics::default())?;
    net.add_link_with_metrics(a, b, LinkMetrics::default())?;

    let table = RankedTableBuilder::default().build(&net)?;
    let entry = table.get(a, d).unwrap();
    assert_eq!(entry.primary.map(|r| r.next_hop), Some(b));
    assert_eq!(entry.secondary.iter().map(|r| r.next_hop).collect::<Vec<_>>(), vec![c, d]);
    Ok(())
}

#[test]
fn zero_bandwidth() -> Result<(), NetworkError> {
    let mut net = MetricTriangle::net()?;
    let d = net.add_router("D");
    net.add_link_with_metrics(*A, d, LinkMetrics { bandwidth: 0.0, ..Default::default() })?;

    // direct links are not filtered
    let table = RankedTableBuilder::default().build(&net)?;
    let entry = table.get(*A, *B).unwrap();
    assert_eq!(entry.secondary.len(), 2);
    assert_eq!(entry.secondary[1].next_hop, d);
    assert_eq!(entry.secondary[1].cost, Cost::INFINITY);

    // with shortest paths, D is unreachable and never a candidate
    let config = RankedTableConfig::default().mode(RankingMode::ShortestPath);
    let table = RankedTableBuilder::new(config).build(&net)?;
    assert_eq!(table.get(*A, *B).unwrap().secondary.len(), 1);
    let entry = table.get(*A, d).unwrap();
    assert!(entry.primary.is_none());
    assert!(entry.secondary.is_empty());
    let entry = table.get(d, *A).unwrap();
    assert!(entry.primary.is_none());
    Ok(())
}

#[test]
fn isolated_router_has_empty_entries() -> Result<(), NetworkError> {
    let mut net = MetricTriangle::net()?;
    let d = net.add_router("D");
    let table = RankedTableBuilder::default().build(&net)?;
    assert_eq!(table.len(), 12);
    assert_eq!(table.get(d, *A), Some(&RankedEntry::default()));
    Ok(())
}

#[test]
fn invalid_weights() {
    let net = MetricTriangle::net().unwrap();
    let weights = CostWeights { delay: -1.0, ..Default::default() };
    let config = RankedTableConfig::default().weights(weights);
    assert_eq!(
        RankedTableBuilder::new(config).build(&net),
        Err(NetworkError::ConfigError(ConfigError::InvalidCostWeight("delay", -1.0)))
    );
}

#[test]
fn custom_weights() -> Result<(), NetworkError> {
    let net = MetricTriangle::net()?;
    // only the bandwidth counts
    let weights = CostWeights::new(0.0, 1.0, 0.0, 0.0, 0.0);
    let table = RankedTableBuilder::new(RankedTableConfig::default().weights(weights)).build(&net)?;
    check_entry(table.get(*A, *C).unwrap(), (0.1, *B), &[(0.2, *C)]);
    // only the hop count counts: ties are broken by the router id
    let weights = CostWeights::new(1.0, 0.0, 0.0, 0.0, 0.0);
    let table = RankedTableBuilder::new(RankedTableConfig::default().weights(weights)).build(&net)?;
    check_entry(table.get(*C, *A).unwrap(), (1.0, *A), &[(1.0, *B)]);
    Ok(())
}

#[test]
fn secondary_routes_are_stamped() -> Result<(), NetworkError> {
    let net = MetricTriangle::net()?;
    let now = Instant::now();
    let table = RankedTableBuilder::default().build_at(&net, now)?;
    for (_, _, entry) in table.iter() {
        assert!(entry.secondary.iter().all(|r| r.last_used == Some(now)));
    }
    Ok(())
}

#[test]
fn touch_secondary_route() -> Result<(), NetworkError> {
    let net = MetricTriangle::net()?;
    let now = Instant::now();
    let mut table = RankedTableBuilder::default().build_at(&net, now)?;
    let later = now + Duration::from_secs(10);

    assert!(table.touch(*A, *C, *C, later));
    assert_eq!(table.get(*A, *C).unwrap().secondary[0].last_used, Some(later));
    // other entries are not affected
    assert_eq!(table.get(*A, *B).unwrap().secondary[0].last_used, Some(now));

    // the primary route has no timestamp
    assert!(!table.touch(*A, *C, *B, later));
    assert!(!table.touch(*A, *A, *C, later));
    Ok(())
}

#[test]
fn nan_cost_is_ranked_last() {
    let now = Instant::now();
    let candidates: Vec<Route> = [7.0, f64::NAN, 3.0, 5.0]
        .iter()
        .enumerate()
        .map(|(i, cost)| Route { cost: *cost, next_hop: RouterId::new(i + 1) })
        .collect();
    let entry = RankedEntry::from_candidates(candidates, 3, now);
    assert_eq!(entry.primary, Some(Route { cost: 3.0, next_hop: RouterId::new(3) }));
    let costs: Vec<Cost> = entry.secondary.iter().map(|r| r.cost).collect();
    assert_eq!(&costs[..2], &[5.0, 7.0]);
    assert!(costs[2].is_nan());
    assert_eq!(entry.secondary[2].next_hop, RouterId::new(2));
}

#[test]
fn many_candidates_with_nan_costs() {
    let now = Instant::now();
    let candidates: Vec<Route> = (0..64)
        .map(|i| Route {
            cost: if i % 3 == 0 { f64::NAN } else { (64 - i) as f64 },
            next_hop: RouterId::new(i + 1),
        })
        .collect();
    let entry = RankedEntry::from_candidates(candidates, 63, now);
    let mut costs: Vec<Cost> = entry.primary.iter().map(|r| r.cost).collect();
    costs.extend(entry.secondary.iter().map(|r| r.cost));
    assert_eq!(costs.len(), 64);

    let num_nan = costs.iter().filter(|c| c.is_nan()).count();
    assert_eq!(num_nan, 22);
    assert!(costs[64 - num_nan..].iter().all(|c| c.is_nan()));
    assert!(costs[..64 - num_nan].windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn invalid_metrics_never_reach_the_builder() -> Result<(), NetworkError> {
    let mut net = MetricTriangle::net()?;
    let nan_delay = LinkMetrics { delay: f64::NAN, ..Default::default() };
    assert!(net.add_link_with_metrics(*A, *B, nan_delay).is_err());
    let negative_delay = LinkMetrics { delay: -100.0, ..Default::default() };
    assert_eq!(
        net.add_link_with_metrics(*A, *C, negative_delay),
        Err(NetworkError::InvalidLinkMetric(*A, *C, "delay", -100.0))
    );

    for mode in [RankingMode::DirectLinks, RankingMode::ShortestPath].iter() {
        let table = RankedTableBuilder::new(RankedTableConfig::default().mode(*mode)).build(&net)?;
        for (_, _, entry) in table.iter() {
            assert!(entry.primary.map_or(true, |r| !r.cost.is_nan()));
            assert!(entry.secondary.iter().all(|r| !r.cost.is_nan()));
        }
    }
    Ok(())
}

#[test]
fn shortest_path_with_exhausted_budget() -> Result<(), NetworkError> {
    let _ = pretty_env_logger::try_init();
    let net = Topology::from_weighted_links(&[
        ("A", "B", 1.0),
        ("B", "C", 1.0),
        ("C", "D", 1.0),
        ("D", "E", 1.0),
    ])?;
    let a = net.get_router_id("A")?;
    let b = net.get_router_id("B")?;
    let config = RankedTableConfig::default().mode(RankingMode::ShortestPath).max_iterations(1);
    let table = RankedTableBuilder::new(config).build(&net)?;

    // the table is still built, with every entry sorted
    assert_eq!(table.len(), 20);
    assert_eq!(table.get(a, b).unwrap().primary.map(|r| r.next_hop), Some(b));
    for (_, _, entry) in table.iter() {
        if let Some(primary) = entry.primary {
            assert!(entry.secondary.iter().all(|r| r.cost >= primary.cost));
        }
        assert!(entry.secondary.windows(2).all(|w| w[0].cost <= w[1].cost));
    }
    Ok(())
}
