//! Core types and trait definitions for the personas tag manager.
//!
//! This crate is free of database dependencies. Storage backends implement
//! the collaborator traits in [`store`]; the [`manager::PersonasManager`]
//! reconciles a person's label set against add and remove requests.

pub mod clock;
pub mod codec;
pub mod error;
pub mod label;
pub mod manager;
pub mod portrait;
pub mod request;
pub mod store;

pub use error::{Error, Result};
pub use manager::{Outcome, PersonasManager, SkipReason};
