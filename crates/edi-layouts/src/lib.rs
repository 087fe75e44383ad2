#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi-layouts
//!
//! Fixed-width layout schemas, override persistence, and merge logic.
//!
//! This crate holds the built-in field-mapping schemas for the known
//! NOTFIS/OCOREN formats and merges them, at read time, with a
//! user-customized override set loaded through an injected [`LayoutStore`].
//! Decoders depend only on the merged [`LayoutSet`] value, never on the
//! persistence backend.

/// Built-in default layouts for the four known formats.
pub mod defaults;
/// Structural merge of an override set onto the defaults.
pub mod merge;
/// Layout, record, and field-mapping model types.
pub mod model;
/// Registry facade combining defaults, overrides, and the store.
pub mod registry;
/// Persistence boundary for the override document.
pub mod store;

pub use defaults::default_layouts;
pub use model::{
    FieldMapping, LayoutDefinition, LayoutSet, RecordDefinition, ValueFormat, format_id,
    layout_key,
};
pub use registry::LayoutRegistry;
pub use store::{JsonFileStore, LayoutStore, MemoryStore};

use thiserror::Error;

/// Errors that can occur at the layout persistence boundary.
///
/// These are deliberately distinct from parse errors: a failing store must
/// never corrupt the in-memory layout state for the current session.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("layout store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("layout document serialization error: {0}")]
    Serialize(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
