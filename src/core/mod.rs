pub mod config;
pub mod constants;
pub mod error;

pub use config::SessionConfig;
pub use error::{ConfigError, HammurabiError, PersistenceError, Result, ValidationError};
