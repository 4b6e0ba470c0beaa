//! State machine shell that owns the client state and performs its effects.

use crate::config::ClientConfig;
use crate::core::{
    ClientState, Event, Outcome, SessionEffect, StateHistory, StateTransition, Step,
};
use crate::persist::SessionStore;
use chrono::Utc;
use tokio::sync::broadcast;

/// Capacity of the outcome channel. Slow subscribers past this lag and
/// skip ahead.
pub const OUTCOME_CAPACITY: usize = 64;

/// Single owner of the process-wide [`ClientState`].
///
/// All mutation goes through [`handle`](Self::handle). The machine runs the
/// pure transition, writes or erases the persisted session as requested,
/// records the transition and publishes the outcome to subscribers.
///
/// The machine is a single-writer value: drive it from one execution
/// context, or wrap it in a lock that is never held across an await.
pub struct SessionMachine<P: SessionStore> {
    state: ClientState,
    store: P,
    history: StateHistory,
    epoch: u64,
    outcomes: broadcast::Sender<Outcome>,
}

impl<P: SessionStore> SessionMachine<P> {
    /// Create an inactive machine.
    pub fn new(store: P, config: &ClientConfig) -> Self {
        let (outcomes, _) = broadcast::channel(OUTCOME_CAPACITY);
        Self {
            state: ClientState::Inactive,
            store,
            history: StateHistory::with_limit(config.history_limit()),
            epoch: 0,
            outcomes,
        }
    }

    /// Create a machine seeded from the persisted session, if any.
    ///
    /// A session that cannot be loaded is treated as absent.
    pub fn restore(store: P, config: &ClientConfig) -> Self {
        let mut machine = Self::new(store, config);
        match machine.store.load() {
            Ok(Some(session)) => {
                tracing::debug!("restored persisted session");
                machine.state = ClientState::Active {
                    session,
                    pages: Default::default(),
                };
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "failed to restore session"),
        }
        machine
    }

    /// Get current state (pure)
    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Session generation. Increments on every activation and deactivation.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Receive every outcome emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Outcome> {
        self.outcomes.subscribe()
    }

    /// Apply `event` and return the outcome, or `None` if it was ignored.
    pub fn handle(&mut self, event: Event) -> Option<Outcome> {
        let event_name = event.name();
        let from = self.state.name();
        let Step {
            state,
            outcome,
            effect,
        } = std::mem::take(&mut self.state).handle(event);
        self.state = state;

        if let Some(effect) = effect {
            self.apply(effect);
        }

        let Some(outcome) = outcome else {
            tracing::trace!(event = event_name, state = from, "event ignored");
            return None;
        };

        let to = self.state.name();
        tracing::debug!(
            event = event_name,
            from,
            to,
            outcome = outcome.name(),
            "transition"
        );
        if !matches!(outcome, Outcome::Error(_)) {
            self.history = std::mem::take(&mut self.history).record(StateTransition {
                from: from.to_string(),
                to: to.to_string(),
                outcome: outcome.name().to_string(),
                timestamp: Utc::now(),
            });
        }

        // No subscribers is not an error.
        let _ = self.outcomes.send(outcome.clone());
        Some(outcome)
    }

    /// Apply `event` only if no activation or deactivation happened since
    /// `epoch` was read.
    ///
    /// Completions of calls started under an earlier session are dropped.
    pub fn handle_at(&mut self, epoch: u64, event: Event) -> Option<Outcome> {
        if epoch != self.epoch {
            tracing::debug!(
                event = event.name(),
                started = epoch,
                current = self.epoch,
                "dropping stale completion"
            );
            return None;
        }
        self.handle(event)
    }

    fn apply(&mut self, effect: SessionEffect) {
        self.epoch += 1;
        let result = match &effect {
            SessionEffect::Persist(session) => self.store.save(session),
            SessionEffect::Erase => self.store.erase(),
        };
        if let Err(e) = result {
            tracing::warn!(
                error = %e,
                effect = effect_name(&effect),
                "session persistence failed"
            );
        }
    }
}

fn effect_name(effect: &SessionEffect) -> &'static str {
    match effect {
        SessionEffect::Persist(_) => "persist",
        SessionEffect::Erase => "erase",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Page, Session};
    use crate::error::ServiceError;
    use crate::persist::{MemorySessionStore, StoreError, StoreOp};

    fn machine() -> SessionMachine<MemorySessionStore> {
        SessionMachine::new(MemorySessionStore::new(), &ClientConfig::default())
    }

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn load(&self) -> Result<Option<Session>, StoreError> {
            Err(std::io::Error::other("disk gone").into())
        }

        fn save(&self, _: &Session) -> Result<(), StoreError> {
            Err(std::io::Error::other("disk gone").into())
        }

        fn erase(&self) -> Result<(), StoreError> {
            Err(std::io::Error::other("disk gone").into())
        }
    }

    #[test]
    fn activation_round_trip_persists_then_erases() {
        let mut machine = machine();

        assert_eq!(
            machine.handle(Event::Activate(Session::new("t1"))),
            Some(Outcome::Activated)
        );
        assert_eq!(machine.handle(Event::Deactivate), Some(Outcome::Deactivated));

        assert_eq!(machine.state(), &ClientState::Inactive);
        assert_eq!(
            machine.store().ops(),
            vec![StoreOp::Save("t1".into()), StoreOp::Erase]
        );
        assert_eq!(machine.epoch(), 2);
    }

    #[test]
    fn restore_seeds_active_state() {
        let store = MemorySessionStore::with_session(&Session::new("t1")).unwrap();
        let machine = SessionMachine::restore(store, &ClientConfig::default());

        assert_eq!(machine.state().token(), Some("t1"));
        assert_eq!(machine.state().pages().map(|p| p.len()), Some(0));
    }

    #[test]
    fn restore_failure_starts_inactive() {
        let machine = SessionMachine::restore(BrokenStore, &ClientConfig::default());
        assert_eq!(machine.state(), &ClientState::Inactive);
    }

    #[test]
    fn persistence_failure_does_not_block_transition() {
        let mut machine = SessionMachine::new(BrokenStore, &ClientConfig::default());

        assert_eq!(
            machine.handle(Event::Activate(Session::new("t1"))),
            Some(Outcome::Activated)
        );
        assert!(machine.state().is_active());
    }

    #[test]
    fn subscribers_receive_outcomes() {
        let mut machine = machine();
        let mut rx = machine.subscribe();

        machine.handle(Event::Activate(Session::new("t1")));
        machine.handle(Event::Activate(Session::new("t2")));
        machine.handle(Event::Update(vec![Page::new("a", "hi")]));

        assert_eq!(rx.try_recv().unwrap(), Outcome::Activated);
        assert_eq!(rx.try_recv().unwrap(), Outcome::Updated);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut machine = machine();
        machine.handle(Event::Activate(Session::new("t1")));
        let started = machine.epoch();

        machine.handle(Event::Deactivate);
        machine.handle(Event::Activate(Session::new("t2")));

        let outcome = machine.handle_at(started, Event::Update(vec![Page::new("a", "old")]));

        assert_eq!(outcome, None);
        assert_eq!(machine.state().pages().map(|p| p.len()), Some(0));
    }

    #[test]
    fn current_completion_is_applied() {
        let mut machine = machine();
        machine.handle(Event::Activate(Session::new("t1")));
        let started = machine.epoch();

        let outcome = machine.handle_at(started, Event::Update(vec![Page::new("a", "hi")]));

        assert_eq!(outcome, Some(Outcome::Updated));
    }

    #[test]
    fn history_skips_errors_and_ignored_events() {
        let mut machine = machine();
        machine.handle(Event::Deactivate);
        machine.handle(Event::Error(ServiceError::ServerError("boom".into())));
        machine.handle(Event::Activate(Session::new("t1")));
        machine.handle(Event::Update(vec![Page::new("a", "hi")]));

        assert_eq!(machine.history().get_path(), vec!["Inactive", "Active", "Active"]);
    }
}
