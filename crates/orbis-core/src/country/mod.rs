//! Country domain module.
//!
//! # Module Structure
//!
//! - `model`: the typed country record returned by the remote directory
//! - `directory`: the `CountryDirectory` port implemented by HTTP clients
//! - `format`: display helpers used by the detail and listing views

pub mod directory;
pub mod format;
pub mod model;

pub use directory::CountryDirectory;
pub use model::{Country, CountryName, Currency, Flags};
