//! Core definitions (error model and result helpers), relied upon by all docindex-* crates.

pub mod error;
pub mod result;

pub use result::Result;
