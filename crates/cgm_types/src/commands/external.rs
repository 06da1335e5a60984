//! External elements (class 7) and application structure descriptor
//! elements (class 9).
//!
//! MESSAGE is assigned to class 7 element 1; producers that framed it as a
//! class 0 element collide with END APPLICATION STRUCTURE and are not
//! honoured.

use crate::binary::PrimitiveReader;
use crate::cleartext::ClearTextWriter;
use crate::cleartext::format;
use crate::context::Context;
use crate::error::CgmError;
use crate::values::StructuredDataRecord;

/// A class 7 external element.
#[derive(Debug, Clone, PartialEq)]
pub enum External {
	/// MESSAGE
	Message {
		/// Whether the interpreter must take action before continuing
		action_required: bool,
		/// Message text
		text: String,
	},
}

impl External {
	/// Element id within class 7.
	pub fn element_id(&self) -> u8 {
		match self {
			External::Message { .. } => 1,
		}
	}

	/// Decodes a class 7 element, or `None` for an unsupported id.
	pub(crate) fn decode(
		element_id: u8,
		reader: &mut PrimitiveReader<'_>,
	) -> Result<Option<Self>, CgmError> {
		Ok(Some(match element_id {
			1 => External::Message {
				action_required: reader.boolean()?,
				text: reader.string()?,
			},
			_ => return Ok(None),
		}))
	}

	/// Writes the element in clear text.
	pub(crate) fn write(&self, writer: &mut ClearTextWriter) {
		match self {
			External::Message { action_required, text } => {
				let flag = if *action_required { "action" } else { "noaction" };
				writer.write_line(&format!("MESSAGE {flag} {};", format::quoted(text)));
			}
		}
	}
}

/// A class 9 application structure descriptor element.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplicationStructureDescriptor {
	/// APPLICATION STRUCTURE ATTRIBUTE
	Attribute {
		/// Attribute type name
		attribute_type: String,
		/// Attribute value record
		record: StructuredDataRecord,
	},
}

impl ApplicationStructureDescriptor {
	/// Element id within class 9.
	pub fn element_id(&self) -> u8 {
		match self {
			ApplicationStructureDescriptor::Attribute { .. } => 1,
		}
	}

	/// Decodes a class 9 element, or `None` for an unsupported id.
	pub(crate) fn decode(
		element_id: u8,
		reader: &mut PrimitiveReader<'_>,
		ctx: &Context,
	) -> Result<Option<Self>, CgmError> {
		Ok(Some(match element_id {
			1 => ApplicationStructureDescriptor::Attribute {
				attribute_type: reader.string()?,
				record: reader.sdr(ctx)?,
			},
			_ => return Ok(None),
		}))
	}

	/// Writes the element in clear text.
	///
	/// The value record is passed through without the string sanitisation
	/// pass; downstream consumers interpret its bytes themselves.
	pub(crate) fn write(&self, writer: &mut ClearTextWriter) {
		match self {
			ApplicationStructureDescriptor::Attribute { attribute_type, record } => {
				writer.write_line(&format!(
					"  APSATTR {} {};",
					format::quoted(attribute_type),
					format::quoted_raw(&record.to_string())
				));
			}
		}
	}
}
