//! Configuration: the live store, the per-call immutable snapshot, and the
//! optional TOML file schema.
//!
//! Separated so the mutation surface (store) stays independent of what the
//! pipeline actually reads (snapshot).

mod file;
mod snapshot;
mod store;

pub use file::{ConfigFile, FileSection, FilterSection, GeneralSection, StackSection};
pub use snapshot::ConfigSnapshot;
pub use store::{ConfigStore, DEFAULT_APP_NAME, DEFAULT_SKIP_PREFIXES};
