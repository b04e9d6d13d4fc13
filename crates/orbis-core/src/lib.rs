pub mod catalog;
pub mod config;
pub mod country;
pub mod error;
pub mod history;
pub mod preferences;
pub mod session;
pub mod stats;
pub mod storage;

// Re-export common types
pub use country::{Country, CountryDirectory};
pub use error::{OrbisError, Result};
pub use history::HistoryProvider;
pub use session::{Identity, SessionProvider};
pub use storage::KeyValueStore;
