//! # profdump - Profiler Trace Dump Tool
//!
//! profdump decodes a proprietary little-endian binary profiler-trace format
//! into structured records and renders them as an indented text report. It is
//! a forensic, offline tool: given two capture files from the same profiler,
//! it dumps both so the runs can be diffed.
//!
//! ## Architecture Overview
//!
//! ```text
//! trace file ──▶ ByteCursor ──▶ header ──▶ descriptors ──▶ thread sections
//!                (decode)                                        │
//!                                                                ▼
//!                                                          ProfileData
//!                                                                │
//!                                                                ▼
//!                                                        report (text dump)
//! ```
//!
//! ## Module Structure
//!
//! - [`decode`]: the binary decoder — the core of the tool
//!   - `cursor`: position-tracked little-endian reads with truncation errors
//!   - `header`: fixed-layout global header, read in wire order
//!   - `descriptors`: count-prefixed table of sized descriptor records
//!   - `threads`: EOF-bounded thread sections with nested context-switch and
//!     block lists (including the legacy zero-size block quirk)
//!
//! - [`trace_data`]: the decoded in-memory model ([`trace_data::ProfileData`])
//!
//! - [`report`]: indented text rendering of every decoded field
//!
//! - [`cli`]: command-line argument parsing
//!
//! - [`domain`]: core newtypes (`ThreadId`, `DescriptorId`) and the
//!   structured [`domain::DecodeError`]
//!
//! ## Format Notes
//!
//! The format is self-describing but strictly sequential: every record's
//! trailing variable-length fields are sized by a leading size field, and the
//! fixed/variable split point differs per record type. Decoding therefore
//! cannot skip ahead or recover mid-stream; any truncation or length
//! underflow fails the whole file.

pub mod cli;
pub mod decode;
pub mod domain;
pub mod report;
pub mod trace_data;
