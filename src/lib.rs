//! Feature Flags - A feature flag configuration service
//!
//! Stores global features and per-user overrides in a JSON file and serves
//! them over HTTP, with a read-through TTL cache in front of the store.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{FlagError, Result};
pub use service::FeatureService;
pub use store::{CachedStore, FeatureConfigStore, JsonFileStore};
pub use tasks::spawn_cleanup_task;
