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

//! # Packet
//!
//! A packet is created by its originator, which computes the authentication tag over the
//! payload. It is then handed from hop to hop. Whenever a router detects that a link is down, it
//! records the link in the header of the packet, such that downstream routers avoid it. This
//! list only ever grows along the path.

use crate::netsim::auth::{self, AuthTag, SecretKey};
use crate::netsim::RouterId;

/// Authenticated packet
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    /// Router that originated the packet
    pub src: RouterId,
    /// Destination of the packet
    pub dest: RouterId,
    /// Payload, covered by the authentication tag
    pub data: String,
    /// Authentication tag of the payload
    pub auth_tag: AuthTag,
    /// Directed links `(u, v)` known to have failed, in the order in which they were recorded
    failed_links: Vec<(RouterId, RouterId)>,
}

impl Packet {
    /// Create a new packet, and compute its authentication tag with the shared key.
    pub fn new<S: Into<String>>(src: RouterId, dest: RouterId, data: S, key: &SecretKey) -> Self {
        let data = data.into();
        let auth_tag = auth::generate(key, data.as_bytes());
        Self { src, dest, data, auth_tag, failed_links: Vec::new() }
    }

    /// Create a packet with a given tag, as it was received from the network. The tag is not
    /// checked.
    pub fn with_tag<S: Into<String>>(
        src: RouterId,
        dest: RouterId,
        data: S,
        auth_tag: AuthTag,
    ) -> Self {
        Self { src, dest, data: data.into(), auth_tag, failed_links: Vec::new() }
    }

    /// Returns true if the tag of the packet matches its payload.
    pub fn verify(&self, key: &SecretKey) -> bool {
        auth::verify(key, self.data.as_bytes(), self.auth_tag.as_bytes())
    }

    /// Record that the directed link `(u, v)` has failed. Recording the same link twice is
    /// harmless.
    pub fn mark_link_failure(&mut self, u: RouterId, v: RouterId) {
        self.failed_links.push((u, v));
    }

    /// Returns true if the directed link `(u, v)` was recorded as failed.
    pub fn is_link_failed(&self, u: RouterId, v: RouterId) -> bool {
        self.failed_links.contains(&(u, v))
    }

    /// Returns all failed links recorded in the header.
    pub fn failed_links(&self) -> &[(RouterId, RouterId)] {
        &self.failed_links
    }
}
