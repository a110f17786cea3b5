//! Typed in-process event channel between gameplay and the overlay layer.
//!
//! Replaces an ambient global bus with explicit message passing: publishers
//! push onto the scene-owned channel, and the scene drains it once per tick,
//! routing each topic to exactly one consumer. Delivery is synchronous and
//! in-process; nothing is persisted or replayed.

use std::collections::VecDeque;

/// Events crossing the gameplay/overlay boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A gameplay element (a quiz-locked chest) wants the quiz overlay up
    ShowQuiz,
    /// The player answered the presented quiz
    QuizAnswered { correct: bool },
}

/// FIFO channel drained by the owning scene each tick
#[derive(Debug, Default)]
pub struct EventChannel {
    queue: VecDeque<GameEvent>,
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, event: GameEvent) {
        self.queue.push_back(event);
    }

    /// Take every queued event, in publish order.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_order_preserved() {
        let mut channel = EventChannel::new();
        channel.publish(GameEvent::ShowQuiz);
        channel.publish(GameEvent::QuizAnswered { correct: true });

        let drained = channel.drain();
        assert_eq!(
            drained,
            vec![GameEvent::ShowQuiz, GameEvent::QuizAnswered { correct: true }]
        );
        assert!(channel.is_empty());
    }

    #[test]
    fn test_drain_empties_channel() {
        let mut channel = EventChannel::new();
        channel.publish(GameEvent::ShowQuiz);
        let _ = channel.drain();
        assert!(channel.drain().is_empty());
    }
}
