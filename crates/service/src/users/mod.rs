//! Users module: profile data attached to identities, plus the demo
//! sign-in audit trail.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::UserService;
