//! The structural block planner.
//!
//! A pure function from (structure kind, material, origin, size) to an
//! ordered list of [`PlannedBlock`]s. The enumeration order is deterministic
//! and load-bearing: the build ledger places blocks strictly by index, so a
//! structure must enumerate bottom-up (floors before walls, each wall column
//! bottom-to-top) or later placements would have no support.
//!
//! The planner performs no world I/O and never fails; invalid dimensions are
//! clamped, not rejected.

use golem_types::{BlockPos, PlannedBlock, StructureKind, StructureSize};

/// Dimension used for any axis the caller leaves unspecified.
const DEFAULT_DIMENSION: i32 = 3;

/// Height of the door gap in a `house_simple` wall, in blocks.
const DOOR_HEIGHT: i32 = 2;

/// Resolve one requested dimension: floor it, clamp to a minimum of 1,
/// default to [`DEFAULT_DIMENSION`] when absent.
#[allow(clippy::cast_possible_truncation)] // saturating float-to-int cast is the intended clamp
fn clamp_dimension(requested: Option<f64>) -> i32 {
    requested.map_or(DEFAULT_DIMENSION, |d| d.floor() as i32).max(1)
}

/// Whether `(dx, dz)` lies on the perimeter of a `width x depth` footprint.
const fn is_perimeter(dx: i32, dz: i32, width: i32, depth: i32) -> bool {
    dx == 0 || dz == 0 || dx == width.saturating_sub(1) || dz == depth.saturating_sub(1)
}

/// Plan the block sequence for a structure.
///
/// Dimensions default to 3 and are floored and clamped to a minimum of 1.
/// Every block uses the same `material`. The output ordering per kind:
///
/// - `floor`: x-major scan of one flat layer at the origin height
/// - `wall`: columns along x, each column bottom-to-top
/// - `tower`: layers bottom-to-top, perimeter cells only per layer
/// - `house_simple`: floor layer, wall layers with a door gap, roof layer
pub fn plan_structure(
    kind: StructureKind,
    material: &str,
    origin: BlockPos,
    size: StructureSize,
) -> Vec<PlannedBlock> {
    let width = clamp_dimension(size.width);
    let depth = clamp_dimension(size.depth);
    let height = clamp_dimension(size.height);

    let mut blocks = Vec::new();
    let mut push = |dx: i32, dy: i32, dz: i32| {
        blocks.push(PlannedBlock {
            pos: origin.offset(dx, dy, dz),
            material: material.to_owned(),
        });
    };

    match kind {
        StructureKind::Floor => {
            for dx in 0..width {
                for dz in 0..depth {
                    push(dx, 0, dz);
                }
            }
        }
        StructureKind::Wall => {
            for dx in 0..width {
                for dy in 0..height {
                    push(dx, dy, 0);
                }
            }
        }
        StructureKind::Tower => {
            for dy in 0..height {
                for dx in 0..width {
                    for dz in 0..depth {
                        if is_perimeter(dx, dz, width, depth) {
                            push(dx, dy, dz);
                        }
                    }
                }
            }
        }
        StructureKind::HouseSimple => {
            // Floor layer.
            for dx in 0..width {
                for dz in 0..depth {
                    push(dx, 0, dz);
                }
            }
            // Perimeter walls with a 1-wide, 2-tall door gap centered on
            // the z = 0 face.
            let door_x = width.wrapping_div(2);
            for dy in 1..=height {
                for dx in 0..width {
                    for dz in 0..depth {
                        if !is_perimeter(dx, dz, width, depth) {
                            continue;
                        }
                        if dx == door_x && dz == 0 && dy <= DOOR_HEIGHT {
                            continue;
                        }
                        push(dx, dy, dz);
                    }
                }
            }
            // Full roof layer above the walls.
            for dx in 0..width {
                for dz in 0..depth {
                    push(dx, height.saturating_add(1), dz);
                }
            }
        }
    }

    blocks
}
