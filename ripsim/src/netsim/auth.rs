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

//! # Packet Authentication
//!
//! Every router shares one symmetric secret key, established out of band. The originator of a
//! packet computes an HMAC-SHA256 tag over the payload, and every router on the path verifies
//! it before making any routing decision. The comparison is done in constant time by the `hmac`
//! crate.
//!
//! Only the payload is covered by the tag. The failed links carried in the packet header are
//! *not* authenticated, so an on-path attacker may rewrite them to steer traffic onto other
//! links. They are a forwarding hint, never trusted for anything else.

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Length of an authentication tag in bytes.
pub const TAG_LEN: usize = 32;

/// Errors while setting up keys or parsing tags.
#[derive(Error, Debug, PartialEq)]
pub enum AuthError {
    /// The key could not be used to initialize the MAC
    #[error("The secret key has an invalid length")]
    InvalidKeyLength,
    /// The tag is no valid hex string
    #[error("Cannot parse the authentication tag: {0}")]
    InvalidHexTag(String),
    /// The tag has the wrong number of bytes
    #[error("Authentication tag must be 32 bytes long, but has {0}")]
    InvalidTagLength(usize),
}

/// # Shared Secret Key
/// The key is immutable once created, and can be shared freely between concurrent
/// verifications. Its `Debug` output never contains the key material.
#[derive(Clone)]
pub struct SecretKey {
    mac: HmacSha256,
}

impl SecretKey {
    /// Create a key from raw bytes.
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, AuthError> {
        let mac =
            HmacSha256::new_from_slice(key.as_ref()).map_err(|_| AuthError::InvalidKeyLength)?;
        Ok(Self { mac })
    }

    /// Create a random key of `len` bytes.
    pub fn random(len: usize) -> Result<Self, AuthError> {
        let mut key = vec![0u8; len];
        rand::thread_rng().fill_bytes(&mut key);
        Self::new(key)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// Authentication tag, computed over the payload of a packet.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthTag([u8; TAG_LEN]);

impl AuthTag {
    /// Returns the raw bytes of the tag.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Parse a tag from bytes, which must have exactly `TAG_LEN` bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AuthError> {
        if bytes.len() != TAG_LEN {
            return Err(AuthError::InvalidTagLength(bytes.len()));
        }
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(bytes);
        Ok(Self(tag))
    }
}

impl From<[u8; TAG_LEN]> for AuthTag {
    fn from(bytes: [u8; TAG_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for AuthTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for AuthTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthTag({})", self)
    }
}

impl FromStr for AuthTag {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| AuthError::InvalidHexTag(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

/// Compute the authentication tag of a message.
pub fn generate(key: &SecretKey, message: &[u8]) -> AuthTag {
    let mut mac = key.mac.clone();
    mac.update(message);
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    AuthTag(tag)
}

/// Verify the tag of a message in constant time. Any mismatch, including a tag of the wrong
/// length, results in `false`.
pub fn verify(key: &SecretKey, message: &[u8], tag: &[u8]) -> bool {
    let mut mac = key.mac.clone();
    mac.update(message);
    mac.verify_slice(tag).is_ok()
}
