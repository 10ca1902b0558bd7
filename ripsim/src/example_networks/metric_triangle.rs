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

//! # Metric Triangle

use super::ExampleNetwork;
use crate::netsim::topology::LinkMetrics;
use crate::netsim::{NetworkError, Topology};

/// # Metric Triangle
///
/// Three routers `A`, `B` and `C`, fully connected, where every link carries its own bandwidth
/// and delay. Hop count is 1, jitter and packet loss are 0 on all links.
///
/// | Link  | Bandwidth | Delay |
/// |-------|-----------|-------|
/// | A - B | 10        | 5     |
/// | A - C | 5         | 10    |
/// | B - C | 20        | 2     |
///
/// With the default weights, the compound costs are 6.1 (`A - B`), 11.2 (`A - C`) and 3.05
/// (`B - C`).
#[derive(Debug)]
pub struct MetricTriangle {}

impl ExampleNetwork for MetricTriangle {
    fn net() -> Result<Topology, NetworkError> {
        let mut net = Topology::new();

        // add routers
        let a = net.add_router("A");
        let b = net.add_router("B");
        let c = net.add_router("C");

        // add links
        net.add_link_with_metrics(a, b, metrics(10.0, 5.0))?;
        net.add_link_with_metrics(a, c, metrics(5.0, 10.0))?;
        net.add_link_with_metrics(b, c, metrics(20.0, 2.0))?;

        Ok(net)
    }
}

fn metrics(bandwidth: f64, delay: f64) -> LinkMetrics {
    LinkMetrics { hop_count: 1.0, bandwidth, delay, jitter: 0.0, packet_loss: 0.0 }
}
