//! Application driver wiring the service adapter to the state machine.
//!
//! Each action issues one service call and converts its result into an
//! [`Event`]: sessions become `Activate`, page results become `Update` or
//! `Remove`, failures become `Error`. The machine lock is never held across
//! the call, and the epoch read before the call guards the completion, so a
//! session or page result that arrives after a sign-in or sign-out is
//! dropped.

use crate::core::{ClientState, Event, Outcome, Page};
use crate::effects::SessionMachine;
use crate::error::ServiceError;
use crate::persist::SessionStore;
use crate::service::{Service, Transport};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

/// Shared handle to the machine driven by an [`App`].
pub type SharedMachine<P> = Arc<Mutex<SessionMachine<P>>>;

/// Drives a [`SessionMachine`] from the results of [`Service`] calls.
pub struct App<T: Transport, P: SessionStore> {
    service: Service<T>,
    machine: SharedMachine<P>,
}

impl<T: Transport, P: SessionStore> App<T, P> {
    pub fn new(service: Service<T>, machine: SessionMachine<P>) -> Self {
        Self {
            service,
            machine: Arc::new(Mutex::new(machine)),
        }
    }

    pub fn service(&self) -> &Service<T> {
        &self.service
    }

    /// Handle to the underlying machine, for callers that submit events
    /// themselves.
    pub fn machine(&self) -> SharedMachine<P> {
        Arc::clone(&self.machine)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ClientState {
        self.lock().state().clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Outcome> {
        self.lock().subscribe()
    }

    /// Submit an event directly.
    pub fn handle(&self, event: Event) -> Option<Outcome> {
        self.lock().handle(event)
    }

    /// Register an account and sign in with the returned session.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Option<Outcome> {
        let (epoch, _) = self.snapshot();
        let result = self.service.register(name, email, password).await;
        self.complete(epoch, into_event(result, Event::Activate))
    }

    /// Sign in. A session that arrives after another sign-in or sign-out
    /// is dropped.
    pub async fn connect(&self, identifier: &str, password: &str) -> Option<Outcome> {
        let (epoch, _) = self.snapshot();
        let result = self.service.connect(identifier, password).await;
        self.complete(epoch, into_event(result, Event::Activate))
    }

    pub fn logout(&self) -> Option<Outcome> {
        self.handle(Event::Deactivate)
    }

    /// Fetch the page list and merge it into the cache.
    pub async fn load_pages(&self) -> Option<Outcome> {
        let (epoch, token) = self.snapshot();
        let result = self.service.page_list(token.as_deref()).await;
        self.complete(epoch, into_event(result, |set| Event::Update(set.pages)))
    }

    /// Create a page. Does nothing without an active session.
    pub async fn create(&self, text: &str) -> Option<Outcome> {
        let (epoch, token) = self.snapshot();
        let token = token?;
        let result = self.service.page_create(text, Some(&token)).await;
        self.complete(epoch, into_event(result, |page| Event::Update(vec![page])))
    }

    /// Replace the text of `page`. Does nothing without an active session.
    pub async fn update(&self, page: &Page, text: &str) -> Option<Outcome> {
        let (epoch, token) = self.snapshot();
        let token = token?;
        let result = self.service.page_update(&page.id, text, Some(&token)).await;
        self.complete(epoch, into_event(result, |page| Event::Update(vec![page])))
    }

    /// Delete `page`, removing it from the cache once the server confirms.
    pub async fn delete(&self, page: &Page) -> Option<Outcome> {
        let (epoch, token) = self.snapshot();
        let token = token?;
        let result = self.service.page_delete(&page.id, Some(&token)).await;
        let page = page.clone();
        self.complete(epoch, into_event(result, |_| Event::Remove(page)))
    }

    fn snapshot(&self) -> (u64, Option<String>) {
        let machine = self.lock();
        (machine.epoch(), machine.state().token().map(str::to_string))
    }

    fn complete(&self, epoch: u64, event: Event) -> Option<Outcome> {
        self.lock().handle_at(epoch, event)
    }

    fn lock(&self) -> MutexGuard<'_, SessionMachine<P>> {
        self.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn into_event<V>(result: Result<V, ServiceError>, on_success: impl FnOnce(V) -> Event) -> Event {
    match result {
        Ok(value) => on_success(value),
        Err(err) => Event::Error(err),
    }
}
