//! `cgm-rs` converts binary Computer Graphics Metafiles (ISO/IEC 8632-3)
//! to the clear-text encoding (ISO/IEC 8632-4).
//!
//! The heavy lifting lives in the [`cgm_types`] crate; this crate re-exports
//! it and ships the `cgm-convert` command line tool.

pub use cgm_types::*;
