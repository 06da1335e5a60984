//! Frame-to-command dispatch.
//!
//! Decoders consume the primitive reader bound to the frame's argument
//! buffer, build the command variant and, for descriptor elements, mutate
//! the context. The mutation ordering is load-bearing: a descriptor's own
//! arguments are read under the state its predecessors established, and
//! its mutation is visible to the next command.

use crate::binary::frame::{Frame, FrameReader};
use crate::binary::primitives::PrimitiveReader;
use crate::commands::{
	ApplicationStructureDescriptor, Attribute, Command, Control, Delimiter, External,
	GraphicalPrimitive, MetafileDescriptor, PictureDescriptor, UnknownCommand, element_name,
};
use crate::context::Context;
use crate::diagnostic::{Diagnostics, Severity};
use crate::error::CgmError;

/// Decodes an entire binary stream into a command sequence.
///
/// Never fails: framing and per-command problems are recorded as
/// diagnostics and decoding continues at the next command boundary.
pub(crate) fn decode_stream(
	data: &[u8],
	ctx: &mut Context,
	diagnostics: &mut Diagnostics,
) -> Vec<Command> {
	let mut frames = FrameReader::new(data);
	let mut commands = Vec::new();
	while let Some(frame) = frames.next_frame() {
		commands.push(decode_frame(&frame, ctx, diagnostics));
	}
	commands
}

/// Decodes one framed command.
fn decode_frame(frame: &Frame, ctx: &mut Context, diagnostics: &mut Diagnostics) -> Command {
	let class = frame.element_class;
	let id = frame.element_id;
	let label = element_name(class, id);

	if frame.truncated {
		diagnostics.push(
			Severity::Fatal,
			class,
			id,
			label,
			"command arguments truncated by end of stream",
		);
	}

	// Escape and segment classes are skipped with a diagnostic; reserved
	// classes are skipped silently like any unrecognised element.
	match class {
		6 => {
			diagnostics.push(
				Severity::Unsupported,
				class,
				id,
				label,
				"escape elements are not interpreted; arguments skipped",
			);
			return unknown(frame);
		}
		8 => {
			diagnostics.push(
				Severity::Unsupported,
				class,
				id,
				label,
				"segment elements are not interpreted; arguments skipped",
			);
			return unknown(frame);
		}
		10.. => return unknown(frame),
		_ => {}
	}

	let mut reader = PrimitiveReader::new(&frame.arguments, class, id, label);
	let result = match class {
		0 => Delimiter::decode(id, &mut reader, ctx).map(|d| d.map(Command::Delimiter)),
		1 => MetafileDescriptor::decode(id, &mut reader, ctx)
			.map(|d| d.map(Command::MetafileDescriptor)),
		2 => PictureDescriptor::decode(id, &mut reader, ctx)
			.map(|d| d.map(Command::PictureDescriptor)),
		3 => Control::decode(id, &mut reader, ctx).map(|d| d.map(Command::Control)),
		4 => GraphicalPrimitive::decode(id, &mut reader, ctx)
			.map(|d| d.map(Command::GraphicalPrimitive)),
		5 => Attribute::decode(id, &mut reader, ctx).map(|d| d.map(Command::Attribute)),
		7 => External::decode(id, &mut reader).map(|d| d.map(Command::External)),
		9 => ApplicationStructureDescriptor::decode(id, &mut reader, ctx)
			.map(|d| d.map(Command::ApplicationStructure)),
		_ => Ok(None),
	};

	let mut collected = reader.take_diagnostics();
	diagnostics.append(&mut collected);

	match result {
		Ok(Some(command)) => command,
		Ok(None) => unknown(frame),
		Err(error) => {
			let severity = match error {
				CgmError::Unimplemented(_) => Severity::Unimplemented,
				_ => Severity::Fatal,
			};
			diagnostics.push(severity, class, id, label, error.to_string());
			unknown(frame)
		}
	}
}

fn unknown(frame: &Frame) -> Command {
	Command::Unknown(UnknownCommand {
		element_class: frame.element_class,
		element_id: frame.element_id,
		raw: frame.arguments.clone(),
	})
}
