//! Delimiter elements (class 0).

use crate::binary::PrimitiveReader;
use crate::cleartext::ClearTextWriter;
use crate::cleartext::format;
use crate::context::Context;
use crate::error::CgmError;

/// Inheritance flag of BEGIN APPLICATION STRUCTURE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inheritance {
	/// Attributes come from the modal state list
	StateList,
	/// Attributes come from the enclosing application structure
	ApplicationStructure,
}

/// A class 0 delimiter element.
#[derive(Debug, Clone, PartialEq)]
pub enum Delimiter {
	/// No operation; emits nothing
	NoOp,
	/// BEGIN METAFILE; resets the context to the metafile defaults
	BeginMetafile {
		/// Metafile name
		name: String,
	},
	/// END METAFILE
	EndMetafile,
	/// BEGIN PICTURE
	BeginPicture {
		/// Picture name
		name: String,
	},
	/// BEGIN PICTURE BODY
	BeginPictureBody,
	/// END PICTURE
	EndPicture,
	/// BEGIN FIGURE
	BeginFigure,
	/// END FIGURE
	EndFigure,
	/// BEGIN APPLICATION STRUCTURE
	BeginApplicationStructure {
		/// Structure identifier
		identifier: String,
		/// Structure type
		kind: String,
		/// Attribute inheritance flag
		inheritance: Inheritance,
	},
	/// BEGIN APPLICATION STRUCTURE BODY
	BeginApplicationStructureBody,
	/// END APPLICATION STRUCTURE
	EndApplicationStructure,
}

impl Delimiter {
	/// Element id within class 0.
	pub fn element_id(&self) -> u8 {
		match self {
			Delimiter::NoOp => 0,
			Delimiter::BeginMetafile { .. } => 1,
			Delimiter::EndMetafile => 2,
			Delimiter::BeginPicture { .. } => 3,
			Delimiter::BeginPictureBody => 4,
			Delimiter::EndPicture => 5,
			Delimiter::BeginFigure => 8,
			Delimiter::EndFigure => 9,
			Delimiter::BeginApplicationStructure { .. } => 21,
			Delimiter::BeginApplicationStructureBody => 22,
			Delimiter::EndApplicationStructure => 23,
		}
	}

	/// Decodes a class 0 element, or `None` for an unsupported id.
	pub(crate) fn decode(
		element_id: u8,
		reader: &mut PrimitiveReader<'_>,
		ctx: &mut Context,
	) -> Result<Option<Self>, CgmError> {
		Ok(Some(match element_id {
			0 => Delimiter::NoOp,
			1 => {
				// Metafile defaults apply from here until END METAFILE
				ctx.reset();
				let name = if reader.is_empty() { String::new() } else { reader.string()? };
				Delimiter::BeginMetafile { name }
			}
			2 => Delimiter::EndMetafile,
			3 => {
				let name = if reader.is_empty() { String::new() } else { reader.string()? };
				Delimiter::BeginPicture { name }
			}
			4 => Delimiter::BeginPictureBody,
			5 => Delimiter::EndPicture,
			8 => Delimiter::BeginFigure,
			9 => Delimiter::EndFigure,
			21 => {
				let identifier = reader.string()?;
				let kind = reader.string()?;
				let inheritance = if reader.enum_value()? != 0 {
					Inheritance::ApplicationStructure
				} else {
					Inheritance::StateList
				};
				Delimiter::BeginApplicationStructure { identifier, kind, inheritance }
			}
			22 => Delimiter::BeginApplicationStructureBody,
			23 => Delimiter::EndApplicationStructure,
			_ => return Ok(None),
		}))
	}

	/// Writes the element in clear text.
	pub(crate) fn write(&self, writer: &mut ClearTextWriter, ctx: &mut Context) {
		match self {
			Delimiter::NoOp => {}
			Delimiter::BeginMetafile { name } => {
				ctx.reset();
				writer.write_line(&format!("BEGMF {};", format::quoted(name)));
			}
			Delimiter::EndMetafile => writer.write_line("ENDMF;"),
			Delimiter::BeginPicture { name } => {
				writer.write_line(&format!("BEGPIC {};", format::quoted(name)));
			}
			Delimiter::BeginPictureBody => writer.write_line("BEGPICBODY;"),
			Delimiter::EndPicture => writer.write_line("ENDPIC;"),
			Delimiter::BeginFigure => writer.write_line("BEGFIG;"),
			Delimiter::EndFigure => writer.write_line("ENDFIG;"),
			Delimiter::BeginApplicationStructure { identifier, kind, inheritance } => {
				let flag = match inheritance {
					Inheritance::StateList => "stlist",
					Inheritance::ApplicationStructure => "aps",
				};
				writer.write_line(&format!(
					"BEGAPS {} {} {flag};",
					format::quoted(identifier),
					format::quoted(kind)
				));
			}
			Delimiter::BeginApplicationStructureBody => writer.write_line("BEGAPSBODY;"),
			Delimiter::EndApplicationStructure => writer.write_line("ENDAPS;"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::context::VdcType;

	#[test]
	fn test_begin_metafile_resets_context() {
		let mut ctx = Context::default();
		ctx.integer_precision = 32;
		ctx.vdc_type = VdcType::Real;

		let args = [4u8, b't', b'e', b's', b't'];
		let mut reader = PrimitiveReader::new(&args, 0, 1, "BEGMF");
		let decoded = Delimiter::decode(1, &mut reader, &mut ctx).unwrap().unwrap();

		assert_eq!(decoded, Delimiter::BeginMetafile { name: "test".into() });
		assert_eq!(ctx.integer_precision, 16);
		assert_eq!(ctx.vdc_type, VdcType::Integer);
	}

	#[test]
	fn test_begin_metafile_without_arguments() {
		let mut ctx = Context::default();
		let mut reader = PrimitiveReader::new(&[], 0, 1, "BEGMF");
		let decoded = Delimiter::decode(1, &mut reader, &mut ctx).unwrap().unwrap();
		assert_eq!(decoded, Delimiter::BeginMetafile { name: String::new() });
	}

	#[test]
	fn test_unrecognised_id_is_none() {
		let mut ctx = Context::default();
		let mut reader = PrimitiveReader::new(&[], 0, 6, "unknown");
		assert_eq!(Delimiter::decode(6, &mut reader, &mut ctx).unwrap(), None);
	}

	#[test]
	fn test_write_begin_application_structure() {
		let mut ctx = Context::default();
		let mut writer = ClearTextWriter::new();
		Delimiter::BeginApplicationStructure {
			identifier: "id1".into(),
			kind: "grobject".into(),
			inheritance: Inheritance::StateList,
		}
		.write(&mut writer, &mut ctx);

		let (text, _) = writer.finish();
		assert_eq!(text, "BEGAPS 'id1' 'grobject' stlist;\n");
	}
}
