//! Inputs and outputs of the client state machine.

use super::model::{Page, Session};
use crate::error::ServiceError;

/// Event submitted to [`ClientState::handle`](super::ClientState::handle).
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A register or connect call produced a session.
    Activate(Session),
    /// The user signed out.
    Deactivate,
    /// Pages to insert or replace by identifier.
    Update(Vec<Page>),
    /// A delete was confirmed by the server.
    Remove(Page),
    /// An operation failed; forwarded untouched.
    Error(ServiceError),
}

impl Event {
    /// Short name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Activate(_) => "Activate",
            Self::Deactivate => "Deactivate",
            Self::Update(_) => "Update",
            Self::Remove(_) => "Remove",
            Self::Error(_) => "Error",
        }
    }
}

/// Outcome emitted after an event has been applied.
///
/// Ignored events produce no outcome at all.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Activated,
    Deactivated,
    Updated,
    Error(ServiceError),
}

impl Outcome {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Activated => "Activated",
            Self::Deactivated => "Deactivated",
            Self::Updated => "Updated",
            Self::Error(_) => "Error",
        }
    }
}

/// Side effect requested by a transition.
///
/// The reducer never performs I/O itself; the machine shell carries these
/// out against its persistence collaborator.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEffect {
    Persist(Session),
    Erase,
}
