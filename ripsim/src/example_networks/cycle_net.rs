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

//! # Cycle Network

use super::ExampleNetwork;
use crate::netsim::{NetworkError, Topology};

/// # Cycle Network
///
/// Five routers with weighted links, where most destinations are reachable over several paths.
///
/// | Link  | Weight |
/// |-------|--------|
/// | A - B | 1      |
/// | A - C | 5      |
/// | B - C | 2      |
/// | B - D | 4      |
/// | C - D | 1      |
/// | C - E | 3      |
/// | D - E | 1      |
///
/// The routers are created in alphabetical order, such that `A` has id 0 and `E` has id 4.
#[derive(Debug)]
pub struct CycleNet {}

impl ExampleNetwork for CycleNet {
    fn net() -> Result<Topology, NetworkError> {
        Topology::from_weighted_links(&[
            ("A", "B", 1.0),
            ("A", "C", 5.0),
            ("B", "C", 2.0),
            ("B", "D", 4.0),
            ("C", "D", 1.0),
            ("C", "E", 3.0),
            ("D", "E", 1.0),
        ])
    }
}
