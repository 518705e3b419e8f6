//! Shared foundation for the physalia compound-triage toolkit.
//!
//! `physalia-core` provides what the domain crates build on:
//!
//! - **Error types** — [`PhysaliaError`] and [`Result`] for structured error handling
//! - **Traits** — [`ContentAddressable`], [`Scored`], [`Annotated`], [`Summarizable`]
//! - **Hashing** — SHA-256 content addressing for deterministic identity

pub mod error;
pub mod hash;
pub mod traits;

pub use error::{PhysaliaError, Result};
pub use traits::*;
