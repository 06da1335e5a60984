//! Prelude module for `cgm_types`.
//!
//! # Examples
//!
//! ```
//! use cgm_types::prelude::*;
//!
//! let metafile = Metafile::from_bytes(&[0x00, 0x20, 0x00, 0x40], "stream");
//! let (text, _) = metafile.to_clear_text();
//! assert!(text.starts_with("BEGMF"));
//! ```

#[doc(inline)]
pub use crate::{
	// Error type
	CgmError,
	// Command model
	Command,

	// Context state
	Context,
	Diagnostic,

	// Diagnostics
	Diagnostics,

	// Driver
	Metafile,
	Severity,
	decode_and_emit,
};

#[doc(inline)]
pub use crate::commands::{
	ApplicationStructureDescriptor, Attribute, Control, Delimiter, External,
	GraphicalPrimitive, MetafileDescriptor, PictureDescriptor,
};

#[doc(inline)]
pub use crate::values::{Colour, Point, StructuredDataRecord};

#[doc(inline)]
pub use crate::context::{
	ColourModel, ColourSelectionMode, DeviceViewportMode, RealPrecisionKind,
	RestrictedTextKind, SpecificationMode, VdcType,
};
