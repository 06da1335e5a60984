//! Diagnostics accumulated while reading or writing a metafile.
//!
//! Decoding never aborts on a malformed command; problems are appended to a
//! [`Diagnostics`] list and the stream position advances to the next command
//! boundary. Reporting tools consume the list as a whole, so every record
//! carries the element class and id it was raised for.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Severity of a [`Diagnostic`].
///
/// The ordering is significant: `Info < Unsupported < Unimplemented < Fatal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
	/// Intentional divergence from the source bytes, recorded for audit
	Info,
	/// Spec-defined value or construct this implementation does not handle
	Unsupported,
	/// Recognised command whose body is not decoded yet
	Unimplemented,
	/// The current command could not be read; decoding continued after it
	Fatal,
}

impl Display for Severity {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Severity::Info => write!(f, "info"),
			Severity::Unsupported => write!(f, "unsupported"),
			Severity::Unimplemented => write!(f, "unimplemented"),
			Severity::Fatal => write!(f, "fatal"),
		}
	}
}

/// A single message produced while reading or writing CGM data.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
	/// Severity of the condition
	pub severity: Severity,
	/// Element class of the command being processed
	pub element_class: u8,
	/// Element id of the command being processed
	pub element_id: u8,
	/// Human-readable description
	pub message: String,
	/// Clear-text keyword of the command, empty when unknown
	pub command: String,
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"[{}] class={}, id={}: {}",
			self.severity, self.element_class, self.element_id, self.message
		)
	}
}

/// Append-only collection of [`Diagnostic`] records.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
	entries: Vec<Diagnostic>,
}

impl Diagnostics {
	/// Creates an empty collection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a record with the given severity.
	pub fn push(
		&mut self,
		severity: Severity,
		element_class: u8,
		element_id: u8,
		command: &str,
		message: impl Into<String>,
	) {
		self.entries.push(Diagnostic {
			severity,
			element_class,
			element_id,
			message: message.into(),
			command: command.to_owned(),
		});
	}

	/// Moves all records from `other` into `self`, preserving order.
	pub fn append(&mut self, other: &mut Diagnostics) {
		self.entries.append(&mut other.entries);
	}

	/// Number of records collected so far.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` when no record has been collected.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Highest severity seen, or `None` when empty.
	pub fn max_severity(&self) -> Option<Severity> {
		self.entries.iter().map(|d| d.severity).max()
	}

	/// Iterates over the collected records in encounter order.
	pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
		self.entries.iter()
	}

	/// Consumes the collection and returns the underlying records.
	pub fn into_vec(self) -> Vec<Diagnostic> {
		self.entries
	}
}

impl<'a> IntoIterator for &'a Diagnostics {
	type Item = &'a Diagnostic;
	type IntoIter = std::slice::Iter<'a, Diagnostic>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}
