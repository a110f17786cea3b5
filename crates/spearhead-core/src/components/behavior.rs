//! Behavior components - attachable capabilities for game objects.
//!
//! A capability is granted by attaching a component through the world and
//! revoked by removing it. The object's own type stays closed; at most one
//! component of a kind exists per object at a time (re-attaching replaces).

/// Deferred action invoked exactly once when a behavior completes its cycle.
/// Owned by whichever caller constructed the behavior, typically the object
/// pool that will recycle the entity.
pub type CompletionCallback = Box<dyn FnOnce() + Send + Sync>;

/// Immutable movement-speed attribute, in units per second.
///
/// Set once at attachment; movement and throw-scaling code read it through
/// the world and never write it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed {
    value: f32,
}

impl Speed {
    pub fn new(value: f32) -> Self {
        Self { value }
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

/// Lifecycle of a throwable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowState {
    /// Held and ready to be thrown or dropped
    Idle,
    /// Moving under a thrown velocity, settle timer pending
    InFlight,
    /// Cycle finished and callback consumed; re-attach a fresh component
    /// to make the object throwable again
    Settled,
}

/// Grants an object directional projectile motion with a deferred
/// completion callback. See [`crate::systems::throw_object`].
pub struct Throwable {
    pub state: ThrowState,
    on_complete: Option<CompletionCallback>,
}

impl Throwable {
    pub fn new(on_complete: CompletionCallback) -> Self {
        Self {
            state: ThrowState::Idle,
            on_complete: Some(on_complete),
        }
    }

    /// Throwable with no completion action.
    pub fn silent() -> Self {
        Self {
            state: ThrowState::Idle,
            on_complete: None,
        }
    }

    /// Consume the callback. The `Option` guarantees at most one caller
    /// ever observes it.
    pub(crate) fn take_callback(&mut self) -> Option<CompletionCallback> {
        self.on_complete.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_speed_is_read_only() {
        let speed = Speed::new(80.0);
        assert_eq!(speed.value(), 80.0);
    }

    #[test]
    fn test_callback_taken_at_most_once() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let mut throwable = Throwable::new(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(throwable.state, ThrowState::Idle);

        if let Some(cb) = throwable.take_callback() {
            cb();
        }
        assert!(throwable.take_callback().is_none());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_silent_throwable_has_no_callback() {
        let mut throwable = Throwable::silent();
        assert!(throwable.take_callback().is_none());
    }
}
