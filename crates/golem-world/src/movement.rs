//! The mover: a straight-line steering loop with tolerance and timeout.
//!
//! This is deliberately not a path planner. The agent asserts forward,
//! sprint, and jump intent, then issues steering updates toward the target
//! on a fixed polling interval until it is within tolerance or the timeout
//! elapses. A target behind an obstacle can legitimately time out without
//! any logic error.
//!
//! Whatever way the loop exits, the movement-intent flags are cleared before
//! returning -- an abandoned steering loop must never leave the agent
//! sprinting into a wall.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::debug;

use golem_types::{Control, Position};

use crate::client::WorldClient;
use crate::config::MovementConfig;

/// The movement-intent flags asserted while steering.
const MOVE_CONTROLS: [Control; 3] = [Control::Forward, Control::Sprint, Control::Jump];

/// Caller-supplied overrides for one movement request.
///
/// Both fields are clamped against the floors in [`MovementConfig`]; a
/// nonsensical tolerance or timeout is corrected, not rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveOptions {
    /// Arrival tolerance in blocks.
    pub tolerance: Option<f64>,
    /// Give-up timeout in milliseconds.
    pub timeout_ms: Option<u64>,
}

/// Result of one movement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Whether the agent ended within tolerance of the target.
    pub reached: bool,
}

/// Steer the agent toward `target` until within tolerance or timed out.
///
/// Asserts forward/sprint/jump intent for the duration of the loop and
/// clears all three on every exit path. Returns whether the final distance
/// to the target is within the (clamped) tolerance.
pub async fn move_to_position<W: WorldClient>(
    world: &mut W,
    target: Position,
    opts: MoveOptions,
    cfg: MovementConfig,
) -> MoveOutcome {
    let tolerance = opts
        .tolerance
        .unwrap_or(cfg.default_tolerance)
        .max(cfg.min_tolerance);
    let timeout = Duration::from_millis(
        opts.timeout_ms
            .unwrap_or(cfg.default_timeout_ms)
            .max(cfg.min_timeout_ms),
    );
    let poll = Duration::from_millis(cfg.poll_interval_ms);

    for control in MOVE_CONTROLS {
        world.set_control(control, true);
    }

    let started = Instant::now();
    loop {
        if world.position().distance_to(target) <= tolerance {
            break;
        }
        if started.elapsed() >= timeout {
            debug!(?target, ?timeout, "movement timed out before reaching target");
            break;
        }
        world.steer_toward(target).await;
        sleep(poll).await;
    }

    // Guaranteed cleanup: no exit leaves movement intent asserted.
    for control in MOVE_CONTROLS {
        world.set_control(control, false);
    }

    MoveOutcome {
        reached: world.position().distance_to(target) <= tolerance,
    }
}

/// Move close enough to a target to interact with it.
///
/// A thin wrapper over [`move_to_position`] using `reach` as the tolerance
/// and the default timeout.
pub async fn ensure_in_range<W: WorldClient>(
    world: &mut W,
    target: Position,
    reach: f64,
    cfg: MovementConfig,
) -> MoveOutcome {
    let opts = MoveOptions {
        tolerance: Some(reach),
        timeout_ms: None,
    };
    move_to_position(world, target, opts, cfg).await
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use golem_types::{BlockPos, Face, ItemStack};

    use super::*;
    use crate::client::WorldError;

    /// A fixed-position fake world that records control and steer calls.
    struct StaticWorld {
        position: Position,
        controls: HashMap<Control, bool>,
        steer_calls: u32,
    }

    impl StaticWorld {
        fn at(position: Position) -> Self {
            Self {
                position,
                controls: HashMap::new(),
                steer_calls: 0,
            }
        }

        fn control(&self, control: Control) -> bool {
            self.controls.get(&control).copied().unwrap_or(false)
        }
    }

    impl WorldClient for StaticWorld {
        fn block_name_at(&self, _pos: BlockPos) -> Option<String> {
            None
        }

        fn inventory_items(&self) -> Vec<ItemStack> {
            Vec::new()
        }

        async fn equip(&mut self, _item_name: &str) -> Result<(), WorldError> {
            Ok(())
        }

        async fn look_at(&mut self, _target: Position) {}

        async fn place_against(&mut self, _support: BlockPos, _face: Face) -> Result<(), WorldError> {
            Ok(())
        }

        async fn toss(&mut self, _item_name: &str, _count: u32) -> Result<(), WorldError> {
            Ok(())
        }

        fn set_control(&mut self, control: Control, active: bool) {
            self.controls.insert(control, active);
        }

        async fn steer_toward(&mut self, _target: Position) {
            self.steer_calls = self.steer_calls.saturating_add(1);
        }

        fn position(&self) -> Position {
            self.position
        }
    }

    #[tokio::test(start_paused = true)]
    async fn negative_tolerance_clamps_to_floor() {
        // Agent is 0.3 blocks from the target; a tolerance of -1 must clamp
        // to 0.5 and still count as arrived.
        let mut world = StaticWorld::at(Position::new(0.3, 0.0, 0.0));
        let opts = MoveOptions {
            tolerance: Some(-1.0),
            timeout_ms: None,
        };
        let outcome =
            move_to_position(&mut world, Position::new(0.0, 0.0, 0.0), opts, MovementConfig::default())
                .await;
        assert!(outcome.reached);
        // Arrival on the first check: no steering was needed.
        assert_eq!(world.steer_calls, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_target_times_out() {
        let mut world = StaticWorld::at(Position::new(0.0, 0.0, 0.0));
        let opts = MoveOptions {
            tolerance: None,
            timeout_ms: Some(500),
        };
        let started = Instant::now();
        let outcome = move_to_position(
            &mut world,
            Position::new(100.0, 0.0, 0.0),
            opts,
            MovementConfig::default(),
        )
        .await;
        assert!(!outcome.reached);
        // Clamped timeout is 1000 ms; the loop polls every 100 ms, so the
        // elapsed virtual time lands on the clamp boundary.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(1_000));
        assert!(elapsed < Duration::from_millis(1_200));
        assert!(world.steer_calls > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn controls_cleared_on_every_exit() {
        // Timeout path.
        let mut world = StaticWorld::at(Position::new(0.0, 0.0, 0.0));
        let opts = MoveOptions {
            tolerance: None,
            timeout_ms: Some(1_000),
        };
        let _ = move_to_position(
            &mut world,
            Position::new(50.0, 0.0, 0.0),
            opts,
            MovementConfig::default(),
        )
        .await;
        for control in MOVE_CONTROLS {
            assert!(!world.control(control), "{control:?} left asserted after timeout");
        }

        // Success path.
        let mut world = StaticWorld::at(Position::new(0.0, 0.0, 0.0));
        let _ = move_to_position(
            &mut world,
            Position::new(1.0, 0.0, 0.0),
            MoveOptions::default(),
            MovementConfig::default(),
        )
        .await;
        for control in MOVE_CONTROLS {
            assert!(!world.control(control), "{control:?} left asserted after arrival");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ensure_in_range_uses_reach_as_tolerance() {
        let mut world = StaticWorld::at(Position::new(3.0, 0.0, 0.0));
        let outcome = ensure_in_range(
            &mut world,
            Position::new(0.0, 0.0, 0.0),
            4.0,
            MovementConfig::default(),
        )
        .await;
        assert!(outcome.reached);
    }
}
