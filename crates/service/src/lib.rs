//! Service layer for the food-sharing marketplace.
//! - `listing`: food-item store contract, claim transition, stats, change events.
//! - `users`: profile lookups and partial updates, demo sign-in audit.
//! - Business logic takes the caller explicitly; nothing reads ambient session state.

pub mod identity;
pub mod catalog;
pub mod listing;
pub mod users;
#[cfg(test)]
pub mod test_support;

pub use identity::{Caller, UserId};
