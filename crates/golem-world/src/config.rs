//! Tunables for the movement and placement primitives.
//!
//! Callers (the dispatcher, tests) construct these once and pass them into
//! the primitives; clamping of caller-supplied values happens against the
//! floors defined here, never at call sites.

use serde::{Deserialize, Serialize};

/// Tunables for the steering loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Arrival tolerance in blocks when the caller gives none (default: 2.0).
    pub default_tolerance: f64,

    /// Floor applied to any caller-supplied tolerance (default: 0.5).
    ///
    /// Below this the agent's own collision box makes arrival impossible.
    pub min_tolerance: f64,

    /// Give-up timeout when the caller gives none (default: 20 000 ms).
    pub default_timeout_ms: u64,

    /// Floor applied to any caller-supplied timeout (default: 1000 ms).
    pub min_timeout_ms: u64,

    /// Interval between steering updates (default: 100 ms).
    pub poll_interval_ms: u64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            default_tolerance: 2.0,
            min_tolerance: 0.5,
            default_timeout_ms: 20_000,
            min_timeout_ms: 1_000,
            poll_interval_ms: 100,
        }
    }
}

/// Tunables for the block-placement primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// How close the agent must get to a target voxel before placing
    /// (default: 4.0 blocks, the client's interaction reach).
    pub reach_distance: f64,

    /// Settle delay after orienting toward the target, letting world state
    /// catch up before the support scan (default: 100 ms).
    pub look_settle_ms: u64,

    /// Settle delay after a place call before the next world read
    /// (default: 150 ms).
    pub place_settle_ms: u64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            reach_distance: 4.0,
            look_settle_ms: 100,
            place_settle_ms: 150,
        }
    }
}
