//! Auth module: registration composition and credential login.
//!
//! Registration creates the user row and its role profile in one transaction.

pub mod domain;
pub mod service;

pub use service::AuthService;
