//! Clear-text CGM (ISO/IEC 8632-4) emission.
//!
//! Commands are written one per logical line with a soft 80-column wrap.
//! The writer threads the same [`Context`] the decoder maintained: the VDC
//! type and colour modes in effect when a command is emitted decide its
//! numeric formatting, so descriptor commands mutate the context here too,
//! in emission order.

pub(crate) mod format;

use crate::commands::{Command, element_name};
use crate::context::Context;
use crate::diagnostic::{Diagnostics, Severity};

/// Soft wrapping target.
const MAX_CHARS_PER_LINE: usize = 80;

/// Accumulates clear-text output with soft line wrapping.
///
/// A line that would exceed the 80-column target is broken at the last
/// whitespace before the limit, except immediately before a quoted string
/// (a break there would orphan the opening quote). A `;` is never the
/// first character of a line.
#[derive(Debug, Default)]
pub(crate) struct ClearTextWriter {
	out: String,
	column: usize,
	element_class: u8,
	element_id: u8,
	label: &'static str,
	diagnostics: Diagnostics,
}

impl ClearTextWriter {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// Emits one command, updating the context the way the matching
	/// descriptor decoder did.
	pub(crate) fn write_command(&mut self, command: &Command, ctx: &mut Context) {
		let (class, id) = command.element();
		self.element_class = class;
		self.element_id = id;
		self.label = element_name(class, id);

		match command {
			Command::Delimiter(inner) => inner.write(self, ctx),
			Command::MetafileDescriptor(inner) => inner.write(self, ctx),
			Command::PictureDescriptor(inner) => inner.write(self, ctx),
			Command::Control(inner) => inner.write(self, ctx),
			Command::GraphicalPrimitive(inner) => inner.write(self, ctx),
			Command::Attribute(inner) => inner.write(self, ctx),
			Command::External(inner) => inner.write(self),
			Command::ApplicationStructure(inner) => inner.write(self),
			Command::Unknown(inner) => self.write_line(&inner.comment()),
		}
	}

	/// Finishes emission, returning the text and collected diagnostics.
	pub(crate) fn finish(self) -> (String, Diagnostics) {
		(self.out, self.diagnostics)
	}

	/// Records an `info` diagnostic against the current command.
	pub(crate) fn info(&mut self, message: impl Into<String>) {
		self.diagnostics.push(
			Severity::Info,
			self.element_class,
			self.element_id,
			self.label,
			message,
		);
	}

	/// Writes `text` followed by a line feed and resets the column.
	pub(crate) fn write_line(&mut self, text: &str) {
		self.write(text);
		self.out.push('\n');
		self.column = 0;
	}

	/// Writes text, wrapping softly at the 80-column target.
	pub(crate) fn write(&mut self, text: &str) {
		if text.is_empty() {
			return;
		}
		if text.contains('\n') && text.len() > 1 {
			self.write_with_line_feeds(text);
		} else if self.column + text.len() > MAX_CHARS_PER_LINE {
			if text == "\n" || text == ";" || text.len() == 1 {
				// Terminators stay on the current line
				self.out.push_str(text);
			} else {
				self.write_split(text);
			}
		} else {
			self.out.push_str(text);
			self.column += text.len();
		}
	}

	fn write_with_line_feeds(&mut self, text: &str) {
		let mut parts = text.split('\n').peekable();
		while let Some(part) = parts.next() {
			if parts.peek().is_some() {
				self.write_line(part);
			} else {
				self.write(part);
			}
		}
	}

	fn write_split(&mut self, text: &str) {
		let mut rest = text;
		while self.column + rest.len() > MAX_CHARS_PER_LINE && !rest.is_empty() {
			let window = MAX_CHARS_PER_LINE.saturating_sub(self.column).min(rest.len());

			let mut separator = rest[..window].rfind(' ');
			// Never break right before a quoted string
			if let Some(pos) = separator {
				if pos > 0 && rest.as_bytes().get(pos + 1) == Some(&b'\'') {
					separator = None;
				}
			}
			let separator = separator
				.or_else(|| rest[..window].rfind('\n'))
				.or_else(|| rest.find(' '))
				.or_else(|| rest.find('\n'));

			match separator {
				// A leading separator just breaks the line before the token
				Some(0) if self.column > 0 => self.write_line(""),
				Some(pos) if pos > 0 => {
					let (line, tail) = rest.split_at(pos);
					self.write_line(line);
					rest = tail;
				}
				// No separator that makes progress: emit as-is, new count
				_ => {
					self.out.push_str(rest);
					self.column = 0;
					rest = "";
				}
			}
		}
		self.write(rest);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_short_tokens_are_not_wrapped() {
		let mut w = ClearTextWriter::new();
		w.write("  LINE");
		w.write(" (0,0)");
		w.write_line(";");

		let (text, _) = w.finish();
		assert_eq!(text, "  LINE (0,0);\n");
	}

	#[test]
	fn test_long_line_breaks_at_last_space() {
		let mut w = ClearTextWriter::new();
		let mut line = String::from("  LINE");
		for i in 0..20 {
			line.push_str(&format!(" ({i},{i})"));
		}
		w.write(&line);
		w.write_line(";");

		let (text, _) = w.finish();
		for emitted in text.lines() {
			assert!(emitted.len() <= MAX_CHARS_PER_LINE, "line too long: {emitted:?}");
		}
		// All tokens survive the wrap
		let rejoined = text.replace('\n', "");
		assert_eq!(rejoined, format!("{line};"));
	}

	#[test]
	fn test_semicolon_never_starts_a_line() {
		let mut w = ClearTextWriter::new();
		w.write(&"x".repeat(MAX_CHARS_PER_LINE));
		w.write_line(";");

		let (text, _) = w.finish();
		assert!(!text.lines().any(|line| line.starts_with(';')));
		assert!(text.contains(';'));
	}

	#[test]
	fn test_no_break_before_quoted_string() {
		let mut w = ClearTextWriter::new();
		w.write(&format!("{} ", "y".repeat(74)));
		w.write("name 'value'");
		let (text, _) = w.finish();

		// The quote must not open a line
		assert!(!text.lines().any(|line| line.starts_with('\'')));
	}

	#[test]
	fn test_embedded_line_feeds_reset_column() {
		let mut w = ClearTextWriter::new();
		w.write("first\nsecond");
		w.write_line(";");

		let (text, _) = w.finish();
		assert_eq!(text, "first\nsecond;\n");
	}
}
