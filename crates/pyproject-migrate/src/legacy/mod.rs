//! Legacy setuptools configuration: data model and readers.
//!
//! Two sources produce a [`LegacyConfig`]:
//!
//! - [`setup_cfg::parse`] reads the declarative `setup.cfg` format;
//! - [`LegacyConfig::from_json_str`] reads a JSON dump of `setup()` keyword
//!   arguments, for projects configured imperatively in `setup.py`.
//!
//! Field names are interpreted by the translator through [`LegacyField`].

pub mod discovery;
pub mod field;
mod json;
pub mod model;
pub mod setup_cfg;

pub use discovery::{find_setup_cfg, project_root};
pub use field::LegacyField;
pub use model::{FileRef, LegacyConfig, LegacyValue, Split};
