//! # swastha-store
//!
//! Session record storage for the SWASTHA runtime.
//!
//! ## Overview
//!
//! Both stores implement [`SessionStore`](swastha_core::traits::SessionStore)
//! and hold at most one `UserProfile`:
//!
//! - [`InMemorySessionStore`]: a shared in-process slot.
//! - [`JsonFileStore`]: one pretty-printed JSON file under a fixed key.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use swastha_store::JsonFileStore;
//! use swastha_core::session;
//!
//! let store = JsonFileStore::new(".swastha", "user");
//! session::login(&store, "asha@example.com", "secret")?;
//! let profile = session::open_dashboard(&store, chrono::Utc::now())?;
//! ```

pub mod file;
pub mod memory;

pub use file::{JsonFileStore, DEFAULT_KEY};
pub use memory::InMemorySessionStore;

// ── Tests ─────────────────────────────────────────────────────────────────────
