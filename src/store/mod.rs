//! Store Module
//!
//! The [`FeatureConfigStore`] trait, the JSON file backend, and the TTL
//! caching decorator. Callers hold an `Arc<dyn FeatureConfigStore>` and do
//! not need to know whether caching is enabled.

mod cached;
mod json_file;
mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use cached::CachedStore;
pub use json_file::JsonFileStore;
pub use traits::FeatureConfigStore;
