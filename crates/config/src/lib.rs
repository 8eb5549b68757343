//! Theme configuration for the themegen style generator.
//!
//! The generator scans the markup files named by `content` for class usage
//! and emits style rules from the palette and font stacks declared here.
//! This crate owns the record's schema and the validating loader; the
//! generator itself only consumes the loaded [`ThemeConfig`].

pub mod color;
pub mod loader;
pub mod model;

pub use color::{Color, ColorError, ColorKind, Rgba};
pub use loader::{ConfigError, load_path, load_slice, load_str};
pub use model::{FontStack, ThemeConfig};
