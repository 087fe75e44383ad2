#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi-adapter-proceda
//!
//! Segment-delimited PROCEDA/EDIFACT decoder.
//!
//! Segments are `+`-delimited and `'`-terminated; the leading 3 characters
//! of each line are the segment tag. Known tags go through a fixed
//! extraction table, unknown tags fall back to generic numbered-field
//! capture. Unlike the fixed-width formats there is no preamble or blank
//! line convention, so every line is processed.
//!
//! This decoder has no fatal failure mode: any text input yields a
//! [`edi_result::ParseResult`], with per-line problems accumulated in it.

/// Segment splitting and message-type detection.
pub mod decoder;
/// Per-tag field extraction table.
pub mod extract;

pub use decoder::parse_proceda;
pub use extract::SegmentTable;
