//! `tgpeer` user reconciliation
//!
//! Turns wire-format user objects into canonical [`TelegramUser`] records and
//! merges new observations into cached ones.
//!
//! ## Policy
//!
//! - A full projection always replaces whatever is cached
//! - A min projection only refreshes the fields it reliably carries
//! - A `Personal` access hash is never downgraded by a merge
//! - Close-friend status and the bot `can_edit` capability survive min merges
//!
//! Everything here is pure and synchronous. Callers serialise updates to the
//! same peer themselves (see `tgpeer-persistence`).

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod construct;
pub mod decode;
pub mod merge;

pub use construct::construct_user;
pub use merge::{merge_users, merge_wire_user};

pub use tgpeer_types::{TelegramUser, WireUser};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{construct_user, merge_users, merge_wire_user, TelegramUser, WireUser};
}
