//! This crate removes duplicate clauses from DIMACS CNF files.
//!
//! Clauses are read with the [`cnf`] parser, which returns each clause with its literals sorted.
//! The [`dedup`] module collects them into a set of distinct clauses and writes a DIMACS CNF file
//! with a recomputed header.

#![warn(missing_docs)]
pub mod cnf;
pub mod dedup;
mod dimacs_trait;
mod error;
mod token;

pub use dedup::deduplicate;
pub use dimacs_trait::Dimacs;
pub use error::{InnerParseError, LineColumn, MalformedLiteral, ParseError};
