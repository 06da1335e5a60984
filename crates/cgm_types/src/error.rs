//! Error types for binary CGM decoding.

use thiserror::Error;

/// Errors raised while decoding a binary CGM stream.
///
/// Most problems encountered in a metafile are recoverable and are reported
/// through [`crate::diagnostic::Diagnostic`] records instead; this type only
/// covers conditions that abort the current read.
#[derive(Debug, Error)]
pub enum CgmError {
	/// A primitive read ran past the end of the command's argument buffer
	#[error(
		"read past end of arguments: needed {needed} more byte(s) at offset {offset} of {len}"
	)]
	ArgumentsExhausted {
		/// Bytes the read still needed
		needed: usize,
		/// Byte offset the read started at
		offset: usize,
		/// Total length of the argument buffer
		len: usize,
	},

	/// A recognised construct whose decoder does not exist yet
	#[error("{0} is not implemented")]
	Unimplemented(String),

	/// A real-precision declaration outside the four representable tuples
	#[error("unsupported real precision ({representation}, {whole}, {fraction})")]
	UnsupportedRealPrecision {
		/// Representation selector (0 = floating, 1 = fixed)
		representation: i16,
		/// Whole-part / exponent width field
		whole: i32,
		/// Fraction / mantissa width field
		fraction: i32,
	},

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}
