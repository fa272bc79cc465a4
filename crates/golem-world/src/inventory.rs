//! Inventory helpers: material matching and dropping items.
//!
//! Matching is deliberately loose: the decision-maker asks for "cobble" and
//! whatever stack name contains that substring (case-insensitively) wins.
//! First match takes priority; there is no disambiguation by exact name.

use std::time::Duration;

use tokio::time::sleep;

use crate::client::{WorldClient, WorldError};

/// Settle delay between consecutive toss calls.
const TOSS_SETTLE: Duration = Duration::from_millis(100);

/// Find the first inventory stack whose name contains `material`,
/// case-insensitively. Returns the stack's exact name for equipping.
pub fn find_matching_item<W: WorldClient>(world: &W, material: &str) -> Option<String> {
    let needle = material.to_lowercase();
    world
        .inventory_items()
        .into_iter()
        .map(|stack| stack.name)
        .find(|name| name.to_lowercase().contains(&needle))
}

/// Ways a drop request can fail.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// No inventory stack name contains the requested item name.
    #[error("item \"{name}\" not found in inventory")]
    NoMatchingItem {
        /// The requested item name.
        name: String,
    },

    /// The client refused a toss mid-sequence. Items tossed before the
    /// refusal stay dropped.
    #[error("toss failed: {source}")]
    TossRefused {
        /// The client's refusal.
        #[source]
        source: WorldError,
    },
}

/// Result of a drop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    /// Total items tossed.
    pub dropped: u32,
}

/// Drop items matching `name` from the inventory.
///
/// Walks matching stacks in inventory order, tossing from each until
/// `count` items have been dropped (or every matching stack is exhausted
/// when `count` is absent). A settle delay separates consecutive tosses.
pub async fn drop_items<W: WorldClient>(
    world: &mut W,
    name: &str,
    count: Option<u32>,
) -> Result<DropOutcome, InventoryError> {
    let needle = name.to_lowercase();
    let matching: Vec<_> = world
        .inventory_items()
        .into_iter()
        .filter(|stack| stack.name.to_lowercase().contains(&needle))
        .collect();
    if matching.is_empty() {
        return Err(InventoryError::NoMatchingItem {
            name: name.to_owned(),
        });
    }

    let mut dropped: u32 = 0;
    for stack in matching {
        let wanted = count.map_or(stack.count, |c| c.saturating_sub(dropped));
        let take = wanted.min(stack.count);
        if take == 0 {
            break;
        }
        world
            .toss(&stack.name, take)
            .await
            .map_err(|source| InventoryError::TossRefused { source })?;
        dropped = dropped.saturating_add(take);
        sleep(TOSS_SETTLE).await;
        if count.is_some_and(|c| dropped >= c) {
            break;
        }
    }

    Ok(DropOutcome { dropped })
}
