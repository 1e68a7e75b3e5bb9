//! CLI command implementations.

pub mod canonicalize;
pub mod get;
pub mod inspect;
pub mod list;
pub mod verify;
