//! Metafile driver: decode a whole binary stream, then emit clear text.

use std::path::Path;

use crate::binary::decode::decode_stream;
use crate::cleartext::ClearTextWriter;
use crate::commands::Command;
use crate::context::Context;
use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::error::CgmError;

/// A decoded binary metafile.
///
/// Decoding is infallible: malformed commands are retained as
/// [`Command::Unknown`] placeholders and reported through the diagnostic
/// list instead of aborting the stream.
///
/// # Examples
///
/// ```
/// use cgm_types::Metafile;
///
/// // BEGMF with no name, then ENDMF
/// let metafile = Metafile::from_bytes(&[0x00, 0x20, 0x00, 0x40], "minimal");
/// assert_eq!(metafile.commands().len(), 2);
///
/// let (text, _diagnostics) = metafile.to_clear_text();
/// assert_eq!(text, "BEGMF '';\nENDMF;\n");
/// ```
#[derive(Debug, Clone)]
pub struct Metafile {
	name: String,
	commands: Vec<Command>,
	context: Context,
	diagnostics: Diagnostics,
}

impl Metafile {
	/// Decodes a binary metafile held in memory.
	pub fn from_bytes(data: &[u8], name: impl Into<String>) -> Self {
		let mut context = Context::new();
		let mut diagnostics = Diagnostics::new();
		let commands = decode_stream(data, &mut context, &mut diagnostics);
		Self { name: name.into(), commands, context, diagnostics }
	}

	/// Reads and decodes a binary metafile from disk.
	///
	/// # Errors
	///
	/// Returns an error only when the file cannot be read; decoding
	/// problems are reported through [`Metafile::diagnostics`].
	pub fn open(path: impl AsRef<Path>) -> Result<Self, CgmError> {
		let path = path.as_ref();
		let data = std::fs::read(path)?;
		let name = path
			.file_name()
			.map_or_else(|| "stream".to_owned(), |n| n.to_string_lossy().into_owned());
		Ok(Self::from_bytes(&data, name))
	}

	/// Name the metafile was loaded under.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The decoded command sequence, in stream order.
	pub fn commands(&self) -> &[Command] {
		&self.commands
	}

	/// Context state after the last decoded command.
	pub fn context(&self) -> &Context {
		&self.context
	}

	/// Diagnostics collected while decoding.
	pub fn diagnostics(&self) -> &Diagnostics {
		&self.diagnostics
	}

	/// Emits the command sequence as clear text.
	///
	/// The emitter threads a fresh context through the commands so numeric
	/// formatting tracks the descriptor state at each position, exactly as
	/// reading did. Returns the text and the emit-pass diagnostics.
	pub fn to_clear_text(&self) -> (String, Vec<Diagnostic>) {
		let mut context = Context::new();
		let mut writer = ClearTextWriter::new();
		for command in &self.commands {
			writer.write_command(command, &mut context);
		}
		let (text, diagnostics) = writer.finish();
		(text, diagnostics.into_vec())
	}
}

/// Decodes a binary metafile and emits it as clear text in one call.
///
/// Returns the clear text and the decode- and emit-pass diagnostics merged
/// in encounter order.
pub fn decode_and_emit(data: &[u8]) -> (String, Vec<Diagnostic>) {
	let metafile = Metafile::from_bytes(data, "stream");
	let (text, emit_diagnostics) = metafile.to_clear_text();

	let mut diagnostics = metafile.diagnostics.into_vec();
	diagnostics.extend(emit_diagnostics);
	(text, diagnostics)
}
