//! Chest system - reveal and unlock flow for lootable chests.
//!
//! Quiz-locked chests publish a show-quiz trigger instead of opening and
//! wait in `QuizPending` until the answer event comes back through the
//! scene's channel. The quiz side knows nothing about chests; this system
//! is the single consumer of the answer topic.

use hecs::{Entity, World};

use crate::components::{Chest, ChestState, DungeonItem};
use crate::events::{EventChannel, GameEvent};
use crate::progress::ProgressStore;
use crate::systems::flash;

/// Make a hidden chest visible, with a flash to draw the eye.
pub fn reveal_chest(world: &mut World, entity: Entity) {
    let revealed = match world.get::<&mut Chest>(entity) {
        Ok(mut chest) if chest.state == ChestState::Hidden => {
            chest.state = ChestState::Revealed;
            true
        }
        _ => false,
    };
    if revealed {
        flash(world, entity, None);
    }
}

/// Player interaction with a revealed chest. Quiz-locked chests start a
/// quiz cycle; unlocked ones open on the spot.
pub fn request_chest_open(
    world: &mut World,
    events: &mut EventChannel,
    progress: &mut ProgressStore,
    entity: Entity,
) {
    let requires_quiz = match world.get::<&mut Chest>(entity) {
        Ok(mut chest) if chest.state == ChestState::Revealed => {
            if chest.requires_quiz {
                chest.state = ChestState::QuizPending;
            }
            chest.requires_quiz
        }
        _ => return,
    };

    if requires_quiz {
        events.publish(GameEvent::ShowQuiz);
    } else {
        open_chest(world, progress, entity);
    }
}

/// React to drained quiz-answer events: the pending chest opens on a pass
/// and relocks to `Revealed` on a fail.
pub fn chest_system(world: &mut World, drained: &[GameEvent], progress: &mut ProgressStore) {
    for event in drained {
        let correct = match event {
            GameEvent::QuizAnswered { correct } => *correct,
            _ => continue,
        };

        let pending: Option<Entity> = world
            .query::<&Chest>()
            .iter()
            .find(|(_, chest)| chest.state == ChestState::QuizPending)
            .map(|(entity, _)| entity);

        let Some(entity) = pending else { continue };

        if correct {
            open_chest(world, progress, entity);
        } else {
            log::info!("quiz failed, chest {:?} stays locked", entity);
            if let Ok(mut chest) = world.get::<&mut Chest>(entity) {
                chest.state = ChestState::Revealed;
            }
        }
    }
}

fn open_chest(world: &mut World, progress: &mut ProgressStore, entity: Entity) {
    let contents: Option<DungeonItem> = match world.get::<&mut Chest>(entity) {
        Ok(mut chest) if chest.state != ChestState::Open => {
            chest.state = ChestState::Open;
            Some(chest.contents)
        }
        _ => None,
    };

    if let Some(item) = contents {
        log::info!("chest {:?} opened: {:?}", entity, item);
        progress.grant_item(item);
        flash(world, entity, None);
    }
}
