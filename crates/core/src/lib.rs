//! Domain types and rules for the studio API.
//!
//! Everything here is pure: no I/O, no async. The database and HTTP crates
//! build on these types and call the validators before touching the store.

#[macro_use]
mod macros;

pub mod account;
pub mod analysis;
pub mod automation;
pub mod effects;
pub mod error;
pub mod midi;
pub mod ownership;
pub mod project;
pub mod text;
pub mod track;
pub mod types;
