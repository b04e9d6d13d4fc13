pub mod config_service;
pub mod paths;
pub mod rest_countries;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::rest_countries::RestCountriesClient;
pub use crate::storage::{InMemoryStore, JsonFileStore};
