//! Persistence gateway for the watchlist.
//!
//! [`MovieStore`] owns the single SQLite connection and is the only code that
//! touches the `movies` table. It is constructed explicitly and handed to
//! whoever needs it; there is no process-wide handle.

pub mod error;
pub mod seed;
pub mod store;

pub use error::{Result, StoreError};
pub use seed::{Suggestion, SUGGESTED_MOVIES};
pub use store::{MovieStore, StoreLocation, StoreState};
