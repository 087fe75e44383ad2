#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi-adapter-fixed
//!
//! Fixed-width NOTFIS/OCOREN decoder.
//!
//! Extracts fields by 1-based position/length according to a
//! [`edi_layouts::LayoutDefinition`], with per-line error recovery: one
//! malformed line never aborts the file. Length mismatches are advisory
//! warnings; unknown record types degrade to a generic content capture.

/// Line decoding against a layout definition.
pub mod decoder;
/// Implied-decimal value unpacking.
pub mod numeric;

pub use decoder::parse_fixed;
pub use numeric::unpack_decimal;

use thiserror::Error;

/// Fatal, per-file errors of the fixed-width decoder.
#[derive(Error, Debug)]
pub enum Error {
    #[error("layout definition not found for format: {0}")]
    LayoutNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
