//! Environment providers for phoenix.
//!
//! Everything the sync layer needs to know about the host (storage roots,
//! file existence and writability, audio and display properties) is reached
//! through the traits in [`providers`]. Queries that can fail return
//! [`ProviderError`] instead of panicking or defaulting silently.
//!
//! Two sets of implementations ship here:
//! - [`system`]: the real host: environment variables and `std::fs`
//! - [`fixed`]: a serde-loadable [`StaticPlatform`] profile and an
//!   in-memory [`MemoryFiles`] probe, for hosts without audio/display
//!   services and for tests

pub mod error;
pub mod fixed;
pub mod providers;
pub mod system;

pub use error::ProviderError;
pub use fixed::{MemoryFiles, StaticPlatform};
pub use providers::{
    ApiLevel, AppPaths, AudioProvider, DisplayProvider, FileProbe, Platform, StorageProvider,
};
pub use system::{SystemFiles, SystemStorage};
