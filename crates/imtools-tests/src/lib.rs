//! Integration tests for imtools crates.
//!
//! These tests go through files on disk: images are generated in-process,
//! encoded into a temporary directory and reopened through the analyzer.
