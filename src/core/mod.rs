//! Pure core of the client.
//!
//! This module contains the session/page state machine:
//! - Domain values (sessions, pages) exchanged with the service
//! - The two-variant [`ClientState`] and its transition function
//! - A bounded history of accepted transitions
//!
//! All logic in this module is pure (no I/O). Persistence requested by a
//! transition is returned as a [`SessionEffect`] and carried out by the
//! machine shell in [`crate::effects`].

mod event;
mod history;
mod model;
mod state;

pub use event::{Event, Outcome, SessionEffect};
pub use history::{StateHistory, StateTransition};
pub use model::{Account, Page, PageId, PagesSet, Session};
pub use state::{ClientState, Step};
