//! Parsers for sequence input files.
//!
//! Reading records from storage is collaborator glue around the core: the
//! detector itself only ever sees plain sequences.

pub mod fasta;
