//! # swastha-contracts
//!
//! Shared types and error definitions for the SWASTHA triage runtime.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions, their serde shape, and error types.

pub mod appointment;
pub mod chat;
pub mod error;
pub mod location;
pub mod profile;
pub mod triage;
