//! One-shot task scheduling on the scene clock.
//!
//! The queue is owned by a scene and only advances inside that scene's
//! update, so a paused scene fires nothing and dropping the scene cancels
//! every pending task. Tasks are plain data rather than stored closures;
//! the scene dispatches each fired action itself.

use hecs::Entity;

/// What to do when a scheduled task comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Zero a thrown object's velocity and run its completion callback
    SettleThrow(Entity),
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTask {
    fire_at: f64,
    action: TimerAction,
}

/// Scene-owned clock with pending one-shot tasks
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: f64,
    tasks: Vec<ScheduledTask>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds of unpaused scene time since creation
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn schedule(&mut self, delay_seconds: f32, action: TimerAction) {
        self.tasks.push(ScheduledTask {
            fire_at: self.now + delay_seconds as f64,
            action,
        });
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Advance the clock and return every action that came due, in firing
    /// order. Fired tasks are removed; each fires exactly once.
    pub fn advance(&mut self, delta_seconds: f32) -> Vec<TimerAction> {
        self.now += delta_seconds as f64;

        let mut due: Vec<ScheduledTask> = Vec::new();
        self.tasks.retain(|task| {
            if task.fire_at <= self.now {
                due.push(*task);
                false
            } else {
                true
            }
        });

        due.sort_by(|a, b| {
            a.fire_at
                .partial_cmp(&b.fire_at)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        due.into_iter().map(|task| task.action).collect()
    }
}
