//! Core types and codecs for the `cgm-rs` project: a decoder for binary
//! Computer Graphics Metafiles (ISO/IEC 8632-3:1999) and an emitter for the
//! clear-text encoding (ISO/IEC 8632-4:1999).
//!
//! Binary CGM is contextual: integer widths, real representations, the VDC
//! type and the colour pipeline are all declared by descriptor elements
//! earlier in the same stream, so a [`Context`] value is threaded through
//! both the reader and the writer.
//!
//! # Examples
//!
//! ```
//! use cgm_types::{Metafile, decode_and_emit};
//!
//! let binary = [0x00u8, 0x20, 0x00, 0x40]; // BEGMF; ENDMF
//! let (text, diagnostics) = decode_and_emit(&binary);
//! assert_eq!(text, "BEGMF '';\nENDMF;\n");
//! assert!(diagnostics.is_empty());
//!
//! // The decoded form is available for tooling
//! let metafile = Metafile::from_bytes(&binary, "example");
//! assert_eq!(metafile.commands().len(), 2);
//! ```

pub mod commands;
pub mod context;
pub mod diagnostic;
pub mod error;
pub mod metafile;
pub mod values;

mod binary;
mod cleartext;

pub mod prelude;

pub use commands::{
	ApplicationStructureDescriptor, Attribute, Command, Control, Delimiter, External,
	GraphicalPrimitive, MetafileDescriptor, PictureDescriptor,
};
pub use context::Context;
pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use error::CgmError;
pub use metafile::{Metafile, decode_and_emit};
pub use values::{Colour, Point, StructuredDataRecord};
