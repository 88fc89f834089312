//! Domain types shared by the catalog, factory and graph layers.

pub mod error;
pub mod version;

pub use error::{CrossVersionError, Result};
pub use version::VersionId;
