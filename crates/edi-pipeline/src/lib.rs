#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi-pipeline
//!
//! Format auto-detection, decoder dispatch, and record naming.
//!
//! The entry point for callers holding a raw text buffer: [`detect`]
//! inspects the first meaningful line, consults the layout set, and
//! dispatches to the fixed-width or PROCEDA decoder. [`record_name`]
//! resolves record/segment identifiers to display labels for the table
//! layer.

/// Format detection and decoder dispatch.
pub mod detect;
/// Record/segment display-name resolution.
pub mod naming;

pub use detect::{detect, detect_with_format};
pub use naming::record_name;

use thiserror::Error;

/// Fatal, per-file errors of detection and dispatch.
///
/// Everything recoverable lives inside the returned
/// [`edi_result::ParseResult`] instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("EDI file is empty or contains no valid records")]
    EmptyFile,

    #[error("unrecognized EDI format: identifier {identifier:?}, line length {length}")]
    UnrecognizedFormat { identifier: String, length: usize },

    #[error(transparent)]
    Fixed(#[from] edi_adapter_fixed::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
