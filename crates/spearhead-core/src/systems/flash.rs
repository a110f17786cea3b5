//! Flash system - timed highlight pulsing on an object's appearance.
//!
//! Pure presentation: the effect alternates a white tint-fill with the
//! normal appearance on the configured cadence, then removes itself and
//! runs its completion callback once after the final pulse. It carries no
//! gameplay state and runs concurrently with any behavior.

use hecs::{Entity, World};

use crate::components::{Appearance, CompletionCallback, FlashEffect, FlashPhase};
use crate::config;

const HIGHLIGHT_TINT: u32 = 0xffffff;
const HIGHLIGHT_ALPHA: f32 = 0.7;

/// Start a flash cycle on an object. Restarts any cycle already running.
pub fn flash(world: &mut World, entity: Entity, on_complete: Option<CompletionCallback>) {
    let _ = world.insert_one(entity, FlashEffect::new(on_complete));
}

enum AppearanceOp {
    Highlight,
    Revert,
}

/// Advance every running flash by `delta_seconds`, carrying leftover time
/// across phase boundaries so large ticks cannot skip pulses.
pub fn flash_system(world: &mut World, delta_seconds: f32) {
    let mut ops: Vec<(Entity, AppearanceOp)> = Vec::new();
    let mut finished: Vec<(Entity, Option<CompletionCallback>)> = Vec::new();

    for (entity, effect) in world.query_mut::<&mut FlashEffect>() {
        let mut carry = delta_seconds;
        loop {
            if carry < effect.remaining {
                effect.remaining -= carry;
                break;
            }
            carry -= effect.remaining;

            match effect.phase {
                FlashPhase::AwaitHighlight => {
                    ops.push((entity, AppearanceOp::Highlight));
                    effect.phase = FlashPhase::AwaitRevert;
                    effect.remaining = config::FLASH_REVERT_DELAY;
                }
                FlashPhase::AwaitRevert => {
                    ops.push((entity, AppearanceOp::Revert));
                    effect.pulses_done += 1;
                    if effect.pulses_done >= config::FLASH_PULSES {
                        finished.push((entity, effect.take_callback()));
                        break;
                    }
                    effect.phase = FlashPhase::AwaitHighlight;
                    effect.remaining = config::FLASH_INTERVAL - config::FLASH_REVERT_DELAY;
                }
            }
        }
    }

    for (entity, op) in ops {
        if let Ok(mut appearance) = world.get::<&mut Appearance>(entity) {
            match op {
                AppearanceOp::Highlight => {
                    appearance.tint = HIGHLIGHT_TINT;
                    appearance.tint_fill = true;
                    appearance.alpha = HIGHLIGHT_ALPHA;
                }
                AppearanceOp::Revert => {
                    appearance.tint = HIGHLIGHT_TINT;
                    appearance.tint_fill = false;
                    appearance.alpha = 1.0;
                }
            }
        }
    }

    for (entity, callback) in finished {
        let _ = world.remove_one::<FlashEffect>(entity);
        if let Some(callback) = callback {
            callback();
        }
    }
}
