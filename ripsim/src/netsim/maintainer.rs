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

//! # Table Maintenance
//!
//! Secondary routes that have not been used for a while are removed from a ranked table, which
//! bounds both the memory and the staleness of the backup routes. Pruning never touches the
//! primary routes.

use crate::netsim::ranked::RankedTable;
use crate::netsim::table::SecondaryRoute;
use log::*;
use std::time::{Duration, Instant};

/// Default timeout after which an unused secondary route is removed.
pub const DEFAULT_PRUNE_TIMEOUT: Duration = Duration::from_secs(90);

/// # Table Maintainer
/// Periodically prunes expired secondary routes. A secondary route expires when
/// `now - last_used > timeout`. Routes used exactly `timeout` ago are kept, and so are routes
/// without a timestamp. Pruning is idempotent for a fixed `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableMaintainer {
    timeout: Duration,
}

impl Default for TableMaintainer {
    fn default() -> Self {
        Self::new(DEFAULT_PRUNE_TIMEOUT)
    }
}

impl TableMaintainer {
    /// Create a maintainer with the given timeout
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Returns the timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Remove all expired secondary routes, and return how many were removed.
    pub fn prune(&self, table: &mut RankedTable, now: Instant) -> usize {
        prune(table, self.timeout, now)
    }
}

/// Remove all secondary routes of the table that were last used more than `timeout` before
/// `now`, and return how many were removed. The order of the remaining routes is preserved.
pub fn prune(table: &mut RankedTable, timeout: Duration, now: Instant) -> usize {
    let mut removed: usize = 0;
    for entry in table.entries_mut() {
        let before = entry.secondary.len();
        entry.secondary.retain(|r| !is_expired(r, timeout, now));
        removed += before - entry.secondary.len();
    }
    debug!("Pruned {} expired secondary routes", removed);
    removed
}

fn is_expired(route: &SecondaryRoute, timeout: Duration, now: Instant) -> bool {
    match route.last_used {
        // timestamps in the future count as just used
        Some(last_used) => now.saturating_duration_since(last_used) > timeout,
        None => false,
    }
}
