//! castwire command-line library.
//!
//! The binary (`castwire-decode`) is a thin shell over [`run::decode_lines`],
//! which integration tests drive directly with in-memory readers and writers.

pub mod args;
pub mod config;
pub mod run;
