//! Download management: cache layout, per-name locking, streaming fetch.

pub mod fetch;
pub mod files;
pub mod locks;

pub use fetch::{fetch_to_temp, TempGuard};
pub use files::{sanitize_component, target_path, temp_path, track_stem};
pub use locks::FileLocks;
