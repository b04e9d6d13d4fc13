//! Application layer for Orbis.
//!
//! Coordinates the country directory with the session, history and preference
//! state to serve the explorer's use cases.

pub mod explorer;

pub use explorer::{Charts, CountryDetail, Explorer, Profile, error_message};
