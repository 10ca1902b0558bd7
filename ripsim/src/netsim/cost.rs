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

//! # Compound Cost
//!
//! The enhanced RIP variant ranks links by a single scalar, computed as a weighted linear
//! combination of the link metrics:
//!
//! $$c = a_0 \cdot \text{hops} + a_1 \cdot \frac{1}{\text{bandwidth}} + a_2 \cdot \text{delay} +
//! a_3 \cdot \text{jitter} + a_4 \cdot \text{loss}$$
//!
//! A link with zero or negative bandwidth has infinite inverse bandwidth, which makes it
//! unusable as soon as $a_1 > 0$.

use crate::netsim::topology::LinkMetrics;
use crate::netsim::{ConfigError, Cost};

/// Weights $(a_0, \ldots, a_4)$ of the compound cost function. The default, `(1, 1, 1, 0, 0)`,
/// ignores jitter and packet loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostWeights {
    /// $a_0$, weight of the hop count
    pub hop_count: f64,
    /// $a_1$, weight of the inverse bandwidth
    pub bandwidth: f64,
    /// $a_2$, weight of the delay
    pub delay: f64,
    /// $a_3$, weight of the jitter
    pub jitter: f64,
    /// $a_4$, weight of the packet loss
    pub packet_loss: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self { hop_count: 1.0, bandwidth: 1.0, delay: 1.0, jitter: 0.0, packet_loss: 0.0 }
    }
}

impl CostWeights {
    /// Create the weights from a tuple `(a0, a1, a2, a3, a4)`.
    pub fn new(hop_count: f64, bandwidth: f64, delay: f64, jitter: f64, packet_loss: f64) -> Self {
        Self { hop_count, bandwidth, delay, jitter, packet_loss }
    }

    /// Check that no weight is negative or NaN.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, w) in [
            ("hop_count", self.hop_count),
            ("bandwidth", self.bandwidth),
            ("delay", self.delay),
            ("jitter", self.jitter),
            ("packet_loss", self.packet_loss),
        ]
        .iter()
        {
            if w.is_nan() || *w < 0.0 {
                return Err(ConfigError::InvalidCostWeight(*name, *w));
            }
        }
        Ok(())
    }
}

/// Compute the compound cost of a single link. Terms with a weight of exactly zero are skipped,
/// such that an unweighted zero bandwidth does not turn the cost into NaN.
///
/// ```
/// use ripsim::netsim::cost::{compound_cost, CostWeights};
/// use ripsim::netsim::topology::LinkMetrics;
///
/// let metrics = LinkMetrics { hop_count: 1.0, bandwidth: 10.0, delay: 5.0, ..Default::default() };
/// let cost = compound_cost(&metrics, &CostWeights::default());
/// assert!((cost - 6.1).abs() < 1e-9);
/// ```
pub fn compound_cost(metrics: &LinkMetrics, weights: &CostWeights) -> Cost {
    let inv_bandwidth =
        if metrics.bandwidth > 0.0 { 1.0 / metrics.bandwidth } else { Cost::INFINITY };
    term(weights.hop_count, metrics.hop_count)
        + term(weights.bandwidth, inv_bandwidth)
        + term(weights.delay, metrics.delay)
        + term(weights.jitter, metrics.jitter)
        + term(weights.packet_loss, metrics.packet_loss)
}

fn term(weight: f64, value: f64) -> Cost {
    if weight == 0.0 {
        0.0
    } else {
        weight * value
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn metrics(hop_count: f64, bandwidth: f64, delay: f64) -> LinkMetrics {
        LinkMetrics { hop_count, bandwidth, delay, jitter: 2.0, packet_loss: 0.5 }
    }

    #[test]
    fn default_weights_ignore_jitter_and_loss() {
        let w = CostWeights::default();
        assert_approx_eq!(compound_cost(&metrics(1.0, 10.0, 5.0), &w), 6.1);
        assert_approx_eq!(compound_cost(&metrics(1.0, 5.0, 10.0), &w), 11.2);
        assert_approx_eq!(compound_cost(&metrics(1.0, 20.0, 2.0), &w), 3.05);
    }

    #[test]
    fn all_terms_weighted() {
        let w = CostWeights::new(2.0, 10.0, 0.5, 1.0, 4.0);
        // 2*3 + 10/4 + 0.5*8 + 1*2 + 4*0.5
        assert_approx_eq!(compound_cost(&metrics(3.0, 4.0, 8.0), &w), 16.5);
    }

    #[test]
    fn zero_bandwidth() {
        let w = CostWeights::default();
        assert_eq!(compound_cost(&metrics(1.0, 0.0, 1.0), &w), Cost::INFINITY);
        assert_eq!(compound_cost(&metrics(1.0, -3.0, 1.0), &w), Cost::INFINITY);

        // bandwidth is not weighted, so the link stays usable
        let w = CostWeights::new(1.0, 0.0, 1.0, 0.0, 0.0);
        assert_approx_eq!(compound_cost(&metrics(1.0, 0.0, 1.0), &w), 2.0);
    }

    #[test]
    fn validate() {
        assert_eq!(CostWeights::default().validate(), Ok(()));
        assert_eq!(
            CostWeights::new(1.0, -1.0, 1.0, 0.0, 0.0).validate(),
            Err(ConfigError::InvalidCostWeight("bandwidth", -1.0))
        );
        assert!(CostWeights::new(1.0, 1.0, 1.0, f64::NAN, 0.0).validate().is_err());
    }
}
