//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, PORT override)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → server swaps the [autodir] settings atomically
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal (or absent) configs
//! - Listener and timeout changes need a restart; listing settings reload live

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{AppConfig, AutoDirConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig};
