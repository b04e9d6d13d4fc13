//! Session domain module.
//!
//! Tracks who is using the app and which countries they marked as favorites.
//!
//! # Module Structure
//!
//! - `model`: `Identity` value accepted by login/register
//! - `provider`: `SessionProvider`, the state owner synchronized with storage

pub mod model;
pub mod provider;

pub use model::Identity;
pub use provider::SessionProvider;
