//! Game scene - owns the world, the clock and the interaction flows.
//!
//! Scheduling is single-threaded cooperative: one update loop drives
//! entity systems, and timers fire synchronously inside a tick on the
//! scene's own clock. Pausing the scene freezes the clock, so no timer
//! fires while paused; dropping the scene drops the queue, so no timer
//! outlives it. The quiz cycle is the one asynchronous boundary, and the
//! scene stays paused for its whole duration.

use hecs::{Entity, World};

use crate::events::{EventChannel, GameEvent};
use crate::progress::{LevelTransition, ProgressStore};
use crate::quiz::{QuestionSource, QuizFlow, QuizState};
use crate::scheduler::{TimerAction, TimerQueue};
use crate::systems::{chest_system, flash_system, physics_system, settle_thrown};

/// One playable room/level instance. Owns every entity and everything
/// attached to them.
pub struct GameScene {
    /// ECS world containing all scene objects
    pub world: World,
    /// Player progress carried by this run
    pub progress: ProgressStore,
    timers: TimerQueue,
    events: EventChannel,
    quiz: QuizFlow,
    transition: LevelTransition,
    paused: bool,
}

impl GameScene {
    /// Build a scene from saved progress. A missing store (direct launch,
    /// very first run) falls back to the documented default transition.
    pub fn new(progress: Option<ProgressStore>) -> Self {
        let progress = progress.unwrap_or_else(|| {
            log::info!("no saved progress, starting from the default entry point");
            ProgressStore::default()
        });
        let transition = LevelTransition::from_progress(&progress);
        log::info!(
            "scene start: {:?} room {} door {}",
            transition.level,
            transition.room_id,
            transition.door_id
        );

        Self {
            world: World::new(),
            progress,
            timers: TimerQueue::new(),
            events: EventChannel::new(),
            quiz: QuizFlow::new(),
            transition,
            paused: false,
        }
    }

    /// The transition payload this scene was initialized with
    pub fn transition(&self) -> &LevelTransition {
        &self.transition
    }

    /// Seconds of unpaused simulation time
    pub fn sim_time(&self) -> f64 {
        self.timers.now()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Advance the simulation by one tick. Does nothing while paused.
    pub fn update(&mut self, delta_seconds: f32) {
        if self.paused {
            return;
        }

        for action in self.timers.advance(delta_seconds) {
            self.dispatch(action);
        }

        let drained = self.events.drain();
        for event in &drained {
            if let GameEvent::ShowQuiz = event {
                if self.quiz.begin() {
                    self.paused = true;
                }
            }
        }
        chest_system(&mut self.world, &drained, &mut self.progress);

        // A quiz began this tick: stop before the simulation advances
        if self.paused {
            return;
        }

        physics_system(&mut self.world, delta_seconds);
        flash_system(&mut self.world, delta_seconds);
    }

    fn dispatch(&mut self, action: TimerAction) {
        match action {
            TimerAction::SettleThrow(entity) => settle_thrown(&mut self.world, entity),
        }
    }

    // ── Behavior registry ───────────────────────────────────────────────

    /// Attach a behavior component, replacing any existing one of the same
    /// kind. Attaching to a despawned entity is a no-op.
    pub fn attach<C: hecs::Component>(&mut self, entity: Entity, component: C) {
        let _ = self.world.insert_one(entity, component);
    }

    /// Look up the attached component of a kind, if any. Never panics.
    pub fn component<C: hecs::Component>(&self, entity: Entity) -> Option<hecs::Ref<'_, C>> {
        self.world.get::<&C>(entity).ok()
    }

    /// Detach a component kind; no-op when absent.
    pub fn detach<C: hecs::Component>(&mut self, entity: Entity) {
        let _ = self.world.remove_one::<C>(entity);
    }

    // ── Throwing ────────────────────────────────────────────────────────

    /// Throw an entity's throwable behavior in a direction; see
    /// [`crate::systems::throw_object`].
    pub fn throw(&mut self, entity: Entity, direction: crate::components::Direction) {
        crate::systems::throw_object(&mut self.world, &mut self.timers, entity, direction);
    }

    /// Put the object down without motion.
    pub fn drop_held(&mut self, entity: Entity) {
        crate::systems::drop_object(&mut self.world, entity);
    }

    // ── Chests ──────────────────────────────────────────────────────────

    /// Player interaction with a chest.
    pub fn open_chest(&mut self, entity: Entity) {
        crate::systems::request_chest_open(
            &mut self.world,
            &mut self.events,
            &mut self.progress,
            entity,
        );
    }

    // ── Quiz overlay ────────────────────────────────────────────────────

    /// External "show quiz" trigger (the same path a chest uses).
    pub fn trigger_quiz(&mut self) {
        self.events.publish(GameEvent::ShowQuiz);
    }

    pub fn quiz_state(&self) -> &QuizState {
        self.quiz.state()
    }

    /// Resolve a pending quiz load with a question from `source`. The
    /// overlay layer calls this once the scene reports `Loading`; any
    /// source failure transparently presents the fallback question.
    pub fn present_quiz(&mut self, source: &mut dyn QuestionSource) {
        self.quiz.load_question(source);
    }

    /// Deliver the player's answer: closes the overlay, resumes the
    /// simulation and publishes the pass/fail result for whatever gameplay
    /// element triggered the quiz. Returns the correctness, or `None` when
    /// no question was presented.
    pub fn answer_quiz(&mut self, index: usize) -> Option<bool> {
        let correct = self.quiz.answer(index)?;
        self.paused = false;

        // Show-quiz triggers published while this cycle was active are
        // rejected, not queued
        for event in self.events.drain() {
            if event != GameEvent::ShowQuiz {
                self.events.publish(event);
            }
        }

        self.events.publish(GameEvent::QuizAnswered { correct });
        Some(correct)
    }
}

impl Default for GameScene {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::*;
    use crate::config;
    use crate::progress::LevelName;
    use crate::quiz::StaticQuestionSource;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_callback() -> (CompletionCallback, Arc<AtomicUsize>) {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        (
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
            fired,
        )
    }

    #[test]
    fn test_scene_start_defaults() {
        let scene = GameScene::new(None);
        assert_eq!(scene.transition().level, LevelName::Overworld);
        assert_eq!(scene.transition().room_id, 0);
        assert_eq!(scene.transition().door_id, 0);
        assert!(!scene.is_paused());
    }

    #[test]
    fn test_scene_start_from_progress() {
        let progress = ProgressStore {
            level: LevelName::Dungeon1,
            room_id: 2,
            door_id: 1,
            items: Vec::new(),
        };
        let scene = GameScene::new(Some(progress));
        assert_eq!(scene.transition().level, LevelName::Dungeon1);
        assert_eq!(scene.transition().room_id, 2);
    }

    #[test]
    fn test_registry_attach_replace_remove() {
        let mut scene = GameScene::new(None);
        let entity = scene.world.spawn((Position::new(0.0, 0.0),));

        scene.attach(entity, Speed::new(50.0));
        scene.attach(entity, Speed::new(120.0));
        assert_eq!(scene.component::<Speed>(entity).unwrap().value(), 120.0);

        scene.detach::<Speed>(entity);
        assert!(scene.component::<Speed>(entity).is_none());
        // Removing again stays a no-op
        scene.detach::<Speed>(entity);
    }

    #[test]
    fn test_throw_down_scenario() {
        let mut scene = GameScene::new(None);
        let (callback, fired) = counting_callback();
        let pot = scene.world.spawn((
            Position::new(100.0, 50.0),
            PhysicsBody::dynamic(),
            Interactive::disabled(),
            Throwable::new(callback),
        ));

        scene.throw(pot, Direction::Down);

        {
            let pos = scene.component::<Position>(pot).unwrap();
            assert_eq!(pos.y, 50.0 + config::THROW_DOWN_OFFSET);
            let body = scene.component::<PhysicsBody>(pot).unwrap();
            assert_eq!(body.velocity.y, config::THROW_ITEM_SPEED);
            assert_eq!(body.velocity.x, 0.0);
        }

        // Tick past the settle delay
        let mut elapsed = 0.0;
        while elapsed < config::THROW_ITEM_DELAY + 0.05 {
            scene.update(0.016);
            elapsed += 0.016;
        }

        let body = scene.component::<PhysicsBody>(pot).unwrap();
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_pause_freezes_timers_and_motion() {
        let mut scene = GameScene::new(None);
        let (callback, fired) = counting_callback();
        let pot = scene.world.spawn((
            Position::new(0.0, 0.0),
            PhysicsBody::dynamic(),
            Interactive::disabled(),
            Throwable::new(callback),
        ));

        scene.throw(pot, Direction::Right);
        scene.pause();

        for _ in 0..100 {
            scene.update(0.1);
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(scene.sim_time(), 0.0);
        let x = scene.component::<Position>(pot).unwrap().x;
        assert_eq!(x, 0.0);

        scene.resume();
        for _ in 0..40 {
            scene.update(0.016);
        }
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(scene.component::<Position>(pot).unwrap().x > 0.0);
    }

    #[test]
    fn test_quiz_cycle_unlocks_chest() {
        let bank = r#"[{"question":"Fire is weak against which element?",
                        "options":["Water","Earth","Wind","Fire"],
                        "correctIndex":0}]"#;
        let mut source = StaticQuestionSource::from_json(bank).unwrap();

        let mut scene = GameScene::new(None);
        let chest = scene.world.spawn((
            Chest::quiz_locked(DungeonItem::SmallKey),
            Appearance::default(),
        ));

        scene.open_chest(chest);
        assert_eq!(*scene.quiz_state(), QuizState::Hidden);

        // The trigger lands on the next tick and pauses the scene
        scene.update(0.016);
        assert!(scene.is_paused());
        assert_eq!(*scene.quiz_state(), QuizState::Loading);

        scene.present_quiz(&mut source);
        assert!(matches!(scene.quiz_state(), QuizState::Presented(_)));

        // Simulation stays frozen while presented
        let frozen_at = scene.sim_time();
        scene.update(1.0);
        assert_eq!(scene.sim_time(), frozen_at);

        assert_eq!(scene.answer_quiz(0), Some(true));
        assert!(!scene.is_paused());

        // Result event routes to the chest on the next tick
        scene.update(0.016);
        assert_eq!(
            scene.component::<Chest>(chest).unwrap().state,
            ChestState::Open
        );
        assert!(scene.progress.has_item(DungeonItem::SmallKey));
    }

    #[test]
    fn test_wrong_answer_keeps_chest_locked() {
        let mut source = StaticQuestionSource::from_json(
            r#"[{"question":"?","options":["a","b","c","d"],"correctIndex":1}]"#,
        )
        .unwrap();

        let mut scene = GameScene::new(None);
        let chest = scene.world.spawn((
            Chest::quiz_locked(DungeonItem::BossKey),
            Appearance::default(),
        ));

        scene.open_chest(chest);
        scene.update(0.016);
        scene.present_quiz(&mut source);
        assert_eq!(scene.answer_quiz(3), Some(false));

        scene.update(0.016);
        assert_eq!(
            scene.component::<Chest>(chest).unwrap().state,
            ChestState::Revealed
        );
        assert!(scene.progress.items.is_empty());
    }

    #[test]
    fn test_second_trigger_rejected_mid_cycle() {
        let bank = r#"[{"question":"?","options":["a","b","c","d"],"correctIndex":0}]"#;
        let mut source = StaticQuestionSource::from_json(bank).unwrap();

        let mut scene = GameScene::new(None);
        scene.trigger_quiz();
        scene.update(0.016);
        assert_eq!(*scene.quiz_state(), QuizState::Loading);

        // Second trigger while a cycle is active: rejected, not queued
        scene.trigger_quiz();
        scene.present_quiz(&mut source);
        assert_eq!(scene.answer_quiz(0), Some(true));

        scene.update(0.016);
        assert_eq!(*scene.quiz_state(), QuizState::Hidden);
        assert!(!scene.is_paused());
    }

    #[test]
    fn test_answer_without_question_is_noop() {
        let mut scene = GameScene::new(None);
        assert_eq!(scene.answer_quiz(0), None);
    }
}
