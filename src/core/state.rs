//! Client state and its transition function.
//!
//! [`ClientState`] is a closed two-variant sum type. [`ClientState::handle`]
//! matches exhaustively over every `(state, event)` pair, so adding a state or
//! an event kind is a compile error until the new pairs are decided.

use super::event::{Event, Outcome, SessionEffect};
use super::model::{Page, PageId, Session};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything the client knows about the signed-in user and their pages.
///
/// # Example
///
/// ```rust
/// use pagekit::core::{ClientState, Event, Outcome, Page, Session};
///
/// let state = ClientState::Inactive;
/// let step = state.handle(Event::Activate(Session::new("t1")));
/// assert_eq!(step.outcome, Some(Outcome::Activated));
///
/// let step = step.state.handle(Event::Update(vec![Page::new("a", "hi")]));
/// assert_eq!(step.state.pages().map(|p| p.len()), Some(1));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ClientState {
    /// No session and no page cache.
    #[default]
    Inactive,
    /// One session and the latest known value of each page, keyed by id.
    Active {
        session: Session,
        pages: HashMap<PageId, Page>,
    },
}

/// Result of applying one event.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// State after the event.
    pub state: ClientState,
    /// Outcome for subscribers; `None` when the event was ignored.
    pub outcome: Option<Outcome>,
    /// Persistence work the shell must carry out.
    pub effect: Option<SessionEffect>,
}

impl Step {
    fn ignored(state: ClientState) -> Self {
        Self {
            state,
            outcome: None,
            effect: None,
        }
    }
}

impl ClientState {
    /// Get the state's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Inactive => "Inactive",
            Self::Active { .. } => "Active",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Current session, if any.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Active { session, .. } => Some(session),
            Self::Inactive => None,
        }
    }

    /// Bearer token of the current session, if any.
    pub fn token(&self) -> Option<&str> {
        self.session().map(|s| s.token.as_str())
    }

    /// Cached pages, or `None` while inactive.
    pub fn pages(&self) -> Option<&HashMap<PageId, Page>> {
        match self {
            Self::Active { pages, .. } => Some(pages),
            Self::Inactive => None,
        }
    }

    /// Cached pages ordered by creation time, oldest first.
    ///
    /// Ties are broken by id so the order is total. Empty while inactive.
    pub fn pages_by_created(&self) -> Vec<&Page> {
        let mut out: Vec<&Page> = self
            .pages()
            .map(|pages| pages.values().collect())
            .unwrap_or_default();
        out.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        out
    }

    /// Apply one event, producing the next state.
    ///
    /// Pure: persistence is requested through [`Step::effect`], never done
    /// here. Events that are not legal in the current state leave it
    /// untouched and produce no outcome. `Error` is passed through in any
    /// state.
    pub fn handle(self, event: Event) -> Step {
        match (self, event) {
            (Self::Inactive, Event::Activate(session)) => Step {
                state: Self::Active {
                    session: session.clone(),
                    pages: HashMap::new(),
                },
                outcome: Some(Outcome::Activated),
                effect: Some(SessionEffect::Persist(session)),
            },

            (Self::Active { .. }, Event::Deactivate) => Step {
                state: Self::Inactive,
                outcome: Some(Outcome::Deactivated),
                effect: Some(SessionEffect::Erase),
            },

            (Self::Active { session, mut pages }, Event::Update(updates)) => {
                for page in updates {
                    pages.insert(page.id.clone(), page);
                }
                Step {
                    state: Self::Active { session, pages },
                    outcome: Some(Outcome::Updated),
                    effect: None,
                }
            }

            (Self::Active { session, mut pages }, Event::Remove(page)) => {
                pages.remove(&page.id);
                Step {
                    state: Self::Active { session, pages },
                    outcome: Some(Outcome::Updated),
                    effect: None,
                }
            }

            (state, Event::Error(err)) => Step {
                state,
                outcome: Some(Outcome::Error(err)),
                effect: None,
            },

            // No session replacement path: re-authenticating requires a
            // Deactivate first.
            (state @ Self::Active { .. }, Event::Activate(_)) => Step::ignored(state),

            (
                state @ Self::Inactive,
                Event::Deactivate | Event::Update(_) | Event::Remove(_),
            ) => Step::ignored(state),
        }
    }
}
