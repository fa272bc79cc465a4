//! The block-placement primitive: support search, equip-before-place, and
//! the placement failure taxonomy.
//!
//! Placing a block in a voxel world requires an adjacent solid block to
//! attach to. [`find_place_support`] probes the six neighbors of the target
//! voxel in a fixed priority order -- below first, then the four horizontal
//! neighbors, then above -- so that placing against a floor is always
//! preferred over placing against a wall or ceiling.
//!
//! [`place_block_at`] is idempotent: a target voxel that already holds a
//! non-air block is a success, not an error, and short-circuits before any
//! equip or movement happens.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, trace};

use golem_types::{BlockPos, Face};

use crate::client::{WorldClient, WorldError};
use crate::config::{MovementConfig, PlacementConfig};
use crate::inventory::find_matching_item;
use crate::movement::ensure_in_range;

/// Block names treated as empty for occupancy and support purposes.
///
/// An absent block reference (unloaded voxel) is also air-like.
const AIR_BLOCKS: [&str; 3] = ["air", "cave_air", "void_air"];

/// The six neighbor probes in support priority order: below, left (-x),
/// right (+x), front (-z), back (+z), above. Each entry pairs the neighbor
/// offset with the face normal pointing from that neighbor back at the
/// target voxel.
const SUPPORT_PROBES: [((i32, i32, i32), Face); 6] = [
    ((0, -1, 0), Face::PosY),
    ((-1, 0, 0), Face::PosX),
    ((1, 0, 0), Face::NegX),
    ((0, 0, -1), Face::PosZ),
    ((0, 0, 1), Face::NegZ),
    ((0, 1, 0), Face::NegY),
];

/// Whether a block name (or its absence) counts as empty space.
pub fn is_air_like(block_name: Option<&str>) -> bool {
    block_name.is_none_or(|name| AIR_BLOCKS.contains(&name))
}

/// An adjacent solid block a new block can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Support {
    /// The supporting voxel.
    pub pos: BlockPos,
    /// The face normal pointing from the support toward the target voxel.
    pub face: Face,
}

/// Find the first non-air neighbor of `target` in support priority order.
///
/// Returns `None` iff all six neighbors are air-like.
pub fn find_place_support<W: WorldClient>(world: &W, target: BlockPos) -> Option<Support> {
    SUPPORT_PROBES.iter().find_map(|&((dx, dy, dz), face)| {
        let pos = target.offset(dx, dy, dz);
        if is_air_like(world.block_name_at(pos).as_deref()) {
            None
        } else {
            Some(Support { pos, face })
        }
    })
}

/// Ways a single placement attempt can fail.
///
/// All three are reported upward as values; none is retried inside the
/// primitive. The caller decides which are batch-fatal (missing material)
/// and which are transient (missing support, refused placement).
#[derive(Debug, thiserror::Error)]
pub enum PlaceError {
    /// No inventory item name contains the requested material, or the
    /// client refused to equip the match.
    #[error("no item matching \"{material}\" in inventory")]
    NoMaterialInInventory {
        /// The requested material.
        material: String,
    },

    /// All six neighbors of the target voxel are air-like.
    #[error("no support block adjacent to {pos}")]
    NoSupportBlock {
        /// The unplaceable target voxel.
        pos: BlockPos,
    },

    /// The underlying place call was refused by the client.
    #[error("place against support failed: {source}")]
    PlaceFailed {
        /// The client's refusal.
        #[source]
        source: WorldError,
    },
}

/// How a successful placement attempt concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// A block was placed, consuming one inventory item.
    Placed,
    /// The target voxel already held a non-air block; nothing was done.
    AlreadyPresent,
}

/// Place one block of `material` at `target`.
///
/// The sequence: re-check occupancy (idempotent no-op if filled), equip a
/// matching inventory item, move into reach, orient toward the voxel
/// center, find a support neighbor, and issue a single place call. Settle
/// delays after the look and place steps let world state catch up before
/// the next read.
///
/// Movement and orientation side effects happen once equip succeeds, even
/// if the attempt ultimately fails on support or placement.
pub async fn place_block_at<W: WorldClient>(
    world: &mut W,
    material: &str,
    target: BlockPos,
    placement: PlacementConfig,
    movement: MovementConfig,
) -> Result<PlaceOutcome, PlaceError> {
    // Re-read immediately before acting: time has passed since any earlier
    // snapshot of this voxel.
    if !is_air_like(world.block_name_at(target).as_deref()) {
        trace!(%target, "target voxel already filled");
        return Ok(PlaceOutcome::AlreadyPresent);
    }

    let Some(item) = find_matching_item(world, material) else {
        return Err(PlaceError::NoMaterialInInventory {
            material: material.to_owned(),
        });
    };
    if let Err(err) = world.equip(&item).await {
        // An equip refusal is indistinguishable from a missing item to the
        // caller: either way the material is not in hand.
        debug!(%err, item, "equip refused");
        return Err(PlaceError::NoMaterialInInventory {
            material: material.to_owned(),
        });
    }

    let _ = ensure_in_range(world, target.center(), placement.reach_distance, movement).await;
    world.look_at(target.center()).await;
    sleep(Duration::from_millis(placement.look_settle_ms)).await;

    let support =
        find_place_support(world, target).ok_or(PlaceError::NoSupportBlock { pos: target })?;

    world
        .place_against(support.pos, support.face)
        .await
        .map_err(|source| PlaceError::PlaceFailed { source })?;
    sleep(Duration::from_millis(placement.place_settle_ms)).await;
    Ok(PlaceOutcome::Placed)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use golem_types::{Control, ItemStack, Position};

    use super::*;

    /// An in-memory voxel world that records which client calls ran.
    struct GridWorld {
        blocks: HashMap<BlockPos, String>,
        items: Vec<ItemStack>,
        held: Option<String>,
        equip_calls: u32,
        steer_calls: u32,
        place_calls: u32,
        refuse_place: bool,
    }

    impl GridWorld {
        fn empty() -> Self {
            Self {
                blocks: HashMap::new(),
                items: Vec::new(),
                held: None,
                equip_calls: 0,
                steer_calls: 0,
                place_calls: 0,
                refuse_place: false,
            }
        }

        fn with_block(mut self, pos: BlockPos, name: &str) -> Self {
            self.blocks.insert(pos, name.to_owned());
            self
        }

        fn with_item(mut self, name: &str, count: u32) -> Self {
            self.items.push(ItemStack {
                name: name.to_owned(),
                count,
            });
            self
        }
    }

    impl WorldClient for GridWorld {
        fn block_name_at(&self, pos: BlockPos) -> Option<String> {
            self.blocks.get(&pos).cloned()
        }

        fn inventory_items(&self) -> Vec<ItemStack> {
            self.items.clone()
        }

        async fn equip(&mut self, item_name: &str) -> Result<(), WorldError> {
            self.equip_calls = self.equip_calls.saturating_add(1);
            self.held = Some(item_name.to_owned());
            Ok(())
        }

        async fn look_at(&mut self, _target: Position) {}

        async fn place_against(&mut self, support: BlockPos, face: Face) -> Result<(), WorldError> {
            self.place_calls = self.place_calls.saturating_add(1);
            if self.refuse_place {
                return Err(WorldError::ClientRejected {
                    operation: "place",
                    message: String::from("entity in the way"),
                });
            }
            let material = self.held.clone().unwrap_or_default();
            self.blocks.insert(support.neighbor(face), material);
            Ok(())
        }

        async fn toss(&mut self, _item_name: &str, _count: u32) -> Result<(), WorldError> {
            Ok(())
        }

        fn set_control(&mut self, _control: Control, _active: bool) {}

        async fn steer_toward(&mut self, _target: Position) {
            self.steer_calls = self.steer_calls.saturating_add(1);
        }

        fn position(&self) -> Position {
            Position::new(0.5, 64.0, 0.5)
        }
    }

    const TARGET: BlockPos = BlockPos::new(0, 64, 0);

    async fn place(world: &mut GridWorld, material: &str) -> Result<PlaceOutcome, PlaceError> {
        place_block_at(
            world,
            material,
            TARGET,
            PlacementConfig::default(),
            MovementConfig::default(),
        )
        .await
    }

    // -----------------------------------------------------------------------
    // Air classification and support search
    // -----------------------------------------------------------------------

    #[test]
    fn absent_and_air_variants_are_air_like() {
        assert!(is_air_like(None));
        assert!(is_air_like(Some("air")));
        assert!(is_air_like(Some("cave_air")));
        assert!(is_air_like(Some("void_air")));
        assert!(!is_air_like(Some("stone")));
    }

    #[test]
    fn support_search_returns_none_when_isolated() {
        let world = GridWorld::empty();
        assert_eq!(find_place_support(&world, TARGET), None);
    }

    #[test]
    fn support_prefers_below_over_all_others() {
        let world = GridWorld::empty()
            .with_block(TARGET.offset(0, -1, 0), "stone")
            .with_block(TARGET.offset(1, 0, 0), "stone")
            .with_block(TARGET.offset(0, 1, 0), "stone");
        let support = find_place_support(&world, TARGET);
        assert_eq!(
            support,
            Some(Support {
                pos: TARGET.offset(0, -1, 0),
                face: Face::PosY,
            })
        );
    }

    #[test]
    fn support_priority_is_left_before_right_before_front() {
        let world = GridWorld::empty()
            .with_block(TARGET.offset(1, 0, 0), "stone")
            .with_block(TARGET.offset(0, 0, -1), "stone");
        // Right (+x) outranks front (-z).
        let support = find_place_support(&world, TARGET);
        assert_eq!(
            support,
            Some(Support {
                pos: TARGET.offset(1, 0, 0),
                face: Face::NegX,
            })
        );
    }

    #[test]
    fn above_is_the_last_resort() {
        let world = GridWorld::empty().with_block(TARGET.offset(0, 1, 0), "stone");
        let support = find_place_support(&world, TARGET);
        assert_eq!(
            support,
            Some(Support {
                pos: TARGET.offset(0, 1, 0),
                face: Face::NegY,
            })
        );
    }

    #[test]
    fn air_neighbors_are_not_support() {
        let world = GridWorld::empty().with_block(TARGET.offset(0, -1, 0), "cave_air");
        assert_eq!(find_place_support(&world, TARGET), None);
    }

    // -----------------------------------------------------------------------
    // Placement primitive
    // -----------------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn occupied_target_is_idempotent_success() {
        let mut world = GridWorld::empty()
            .with_block(TARGET, "stone")
            .with_item("stone", 64);
        let outcome = place(&mut world, "stone").await;
        assert!(matches!(outcome, Ok(PlaceOutcome::AlreadyPresent)));
        // Neither equip nor place ran.
        assert_eq!(world.equip_calls, 0);
        assert_eq!(world.place_calls, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_material_fails_before_any_movement() {
        let mut world = GridWorld::empty()
            .with_block(TARGET.offset(0, -1, 0), "stone")
            .with_item("dirt", 64);
        let outcome = place(&mut world, "cobblestone").await;
        assert!(matches!(
            outcome,
            Err(PlaceError::NoMaterialInInventory { .. })
        ));
        assert_eq!(world.equip_calls, 0);
        assert_eq!(world.steer_calls, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn material_match_is_case_insensitive_substring() {
        let mut world = GridWorld::empty()
            .with_block(TARGET.offset(0, -1, 0), "stone")
            .with_item("Mossy_Cobblestone", 12);
        let outcome = place(&mut world, "cobble").await;
        assert!(matches!(outcome, Ok(PlaceOutcome::Placed)));
        assert_eq!(world.held.as_deref(), Some("Mossy_Cobblestone"));
    }

    #[tokio::test(start_paused = true)]
    async fn no_support_fails_after_equip() {
        let mut world = GridWorld::empty().with_item("stone", 64);
        let outcome = place(&mut world, "stone").await;
        assert!(matches!(outcome, Err(PlaceError::NoSupportBlock { .. })));
        assert_eq!(world.equip_calls, 1);
        assert_eq!(world.place_calls, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn refused_place_maps_to_place_failed() {
        let mut world = GridWorld::empty()
            .with_block(TARGET.offset(0, -1, 0), "stone")
            .with_item("stone", 64);
        world.refuse_place = true;
        let outcome = place(&mut world, "stone").await;
        assert!(matches!(outcome, Err(PlaceError::PlaceFailed { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn successful_place_fills_the_target_voxel() {
        let mut world = GridWorld::empty()
            .with_block(TARGET.offset(0, -1, 0), "grass_block")
            .with_item("cobblestone", 64);
        let outcome = place(&mut world, "cobblestone").await;
        assert!(matches!(outcome, Ok(PlaceOutcome::Placed)));
        assert_eq!(world.block_name_at(TARGET).as_deref(), Some("cobblestone"));
    }
}
