//! The generated `pyproject.toml` manifest and its writer.

pub mod model;
pub mod writer;

pub use model::{
    BuildSystem, ContentType, Contributor, DynamicVersion, InvalidContentType, License, Readme,
    TargetManifest,
};
pub use writer::{ReadmeStyle, WriterOptions};
