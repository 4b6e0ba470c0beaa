//! Pagekit: client-side session and page state for the Pages service
//!
//! Pagekit follows a "pure core, imperative shell" layout. The core state
//! machine is a pure function from (state, event) to (state, outcome), while
//! I/O is isolated at the edges: the service adapter talks to the remote
//! service, and the machine shell persists sessions and publishes outcomes.
//!
//! # Core Concepts
//!
//! - **State**: [`ClientState`] is either `Inactive` or `Active` with one
//!   session and a page cache keyed by page id
//! - **Events and outcomes**: every change goes through
//!   [`ClientState::handle`]; each accepted event yields one [`Outcome`]
//! - **Service**: [`Service`] maps typed calls onto transport routes and
//!   normalizes every failure into a [`ServiceError`]
//!
//! # Example
//!
//! ```rust
//! use pagekit::config::ClientConfig;
//! use pagekit::core::{Event, Outcome, Page, Session};
//! use pagekit::effects::SessionMachine;
//! use pagekit::persist::MemorySessionStore;
//!
//! let mut machine = SessionMachine::new(MemorySessionStore::new(), &ClientConfig::default());
//!
//! assert_eq!(machine.handle(Event::Activate(Session::new("t1"))), Some(Outcome::Activated));
//! assert_eq!(
//!     machine.handle(Event::Update(vec![Page::new("a", "hi")])),
//!     Some(Outcome::Updated)
//! );
//! assert_eq!(machine.handle(Event::Deactivate), Some(Outcome::Deactivated));
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod effects;
pub mod error;
pub mod persist;
pub mod service;

// Re-export commonly used types
pub use app::App;
pub use config::ClientConfig;
pub use core::{ClientState, Event, Outcome, Page, Session};
pub use effects::SessionMachine;
pub use error::ServiceError;
pub use service::{Service, Transport};
