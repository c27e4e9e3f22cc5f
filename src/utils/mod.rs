//! Utility modules for file I/O and encoding.

pub mod encoding;
pub mod file_helper;
