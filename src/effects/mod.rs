//! Imperative shell around the pure client core.
//!
//! [`SessionMachine`] owns the single [`ClientState`](crate::core::ClientState)
//! value for the lifetime of the process. It runs the pure transition
//! function and carries out the effects it requests:
//!
//! - **Persistence**: saving the session on activation, erasing it on
//!   deactivation
//! - **Publication**: broadcasting each outcome to subscribers
//! - **Bookkeeping**: transition history and the session epoch used to drop
//!   stale completions

mod machine;

pub use machine::{SessionMachine, OUTCOME_CAPACITY};
