//! The capability interface onto the live game client.
//!
//! The core never talks to a concrete game-client library. Everything it
//! needs from the world -- block lookup, inventory enumeration, equipping,
//! orientation, placement, movement intent, steering, and its own position --
//! is expressed through [`WorldClient`]. Production wires this to the real
//! connection; tests implement it with an in-memory fake that records calls.

use golem_types::{BlockPos, Control, Face, ItemStack, Position};

/// Errors surfaced by the game client backing a [`WorldClient`].
///
/// The core treats these as opaque refusals; each caller decides whether
/// the failure is fatal to its operation or transient.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The client refused or failed an operation.
    #[error("game client rejected {operation}: {message}")]
    ClientRejected {
        /// Which client call failed (`equip`, `place`, `toss`).
        operation: &'static str,
        /// Client-provided failure description.
        message: String,
    },
}

/// Capabilities the core requires from the game-world connection.
///
/// Execution is single-threaded: one action runs to completion before the
/// next is accepted, so implementations need no interior locking. The
/// suspending methods are the core's suspension points -- an implementation
/// may take real time in them (network round-trips, server acknowledgement).
#[allow(async_fn_in_trait)] // single logical thread of control; futures need not be Send
pub trait WorldClient {
    /// The registry name of the block at `pos`, or `None` if the voxel is
    /// outside loaded world data.
    ///
    /// Callers re-read immediately before acting on a voxel; stale reads,
    /// not races, are the correctness hazard here.
    fn block_name_at(&self, pos: BlockPos) -> Option<String>;

    /// Enumerate the agent's inventory stacks.
    fn inventory_items(&self) -> Vec<ItemStack>;

    /// Equip the named inventory item into the agent's hand.
    async fn equip(&mut self, item_name: &str) -> Result<(), WorldError>;

    /// Orient the agent's view toward a world position.
    async fn look_at(&mut self, target: Position);

    /// Place the currently equipped block against `support`, on the side
    /// indicated by `face`. Consumes one equipped item on success.
    async fn place_against(&mut self, support: BlockPos, face: Face) -> Result<(), WorldError>;

    /// Toss `count` items of the named stack onto the ground.
    async fn toss(&mut self, item_name: &str, count: u32) -> Result<(), WorldError>;

    /// Assert or clear a movement-intent flag.
    fn set_control(&mut self, control: Control, active: bool);

    /// Issue one steering update toward a target position.
    async fn steer_toward(&mut self, target: Position);

    /// The agent's current position in continuous world space.
    fn position(&self) -> Position;
}
