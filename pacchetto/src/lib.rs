//! Pacchetto - Assetto Corsa dedicated server packaging
//!
//! This library finds a local Assetto Corsa installation, stages the files a
//! dedicated server needs, and bundles them into distributable zip archives.
//! It also performs the inverse: unpacking those archives into a working
//! server installation.
//!
//! # Pipeline
//!
//! ```text
//! locate ──► stage (filtered copy) ──► archive ──► (transport) ──► install
//! ```
//!
//! - [`locator`] discovers the installation root with a platform strategy
//! - [`staging`] owns the ephemeral staging tree and the filtered copy
//! - [`builder`] produces a phat archive or a distributed archive set
//! - [`installer`] validates and extracts packages into a server tree

pub mod archive;
pub mod builder;
pub mod config;
pub mod content;
pub mod error;
pub mod installer;
pub mod layout;
pub mod locator;
pub mod logging;
pub mod staging;

mod fs_util;

pub use content::{ContentCategory, CopyMode, PackageMode};
pub use error::{PacchettoError, Result};
pub use layout::Layout;
pub use locator::{InstallationLocator, InstallationPath};

/// Library version, as declared in Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
