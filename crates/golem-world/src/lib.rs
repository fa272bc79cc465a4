//! The physical layer of the Golem agent core: world interface, structural
//! planning, and movement/placement primitives.
//!
//! Nothing in this crate knows about tasks, projects, or the decision-maker.
//! It models one thing: how an embodied agent interacts with a voxel world
//! through a narrow capability interface.
//!
//! # Modules
//!
//! - [`client`] -- The [`WorldClient`] capability trait and client errors.
//! - [`config`] -- Tunables for steering and placement.
//! - [`planner`] -- Pure structure-to-block-sequence planning.
//! - [`movement`] -- The straight-line steering loop with tolerance/timeout.
//! - [`placement`] -- Support search and the equip-then-place primitive.
//! - [`inventory`] -- Loose material matching and item dropping.
//!
//! [`WorldClient`]: client::WorldClient

pub mod client;
pub mod config;
pub mod inventory;
pub mod movement;
pub mod placement;
pub mod planner;

// Re-export primary types at crate root.
pub use client::{WorldClient, WorldError};
pub use config::{MovementConfig, PlacementConfig};
pub use inventory::{DropOutcome, InventoryError, drop_items, find_matching_item};
pub use movement::{MoveOptions, MoveOutcome, ensure_in_range, move_to_position};
pub use placement::{
    PlaceError, PlaceOutcome, Support, find_place_support, is_air_like, place_block_at,
};
pub use planner::plan_structure;
