//! Control elements (class 3).

use crate::binary::PrimitiveReader;
use crate::cleartext::ClearTextWriter;
use crate::cleartext::format;
use crate::context::{Context, RealPrecisionKind};
use crate::error::CgmError;

use super::descriptor::{read_real_precision, real_precision_text};

/// A class 3 control element.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
	/// VDC INTEGER PRECISION
	VdcIntegerPrecision {
		/// Bit width
		precision: i32,
	},
	/// VDC REAL PRECISION
	VdcRealPrecision {
		/// Accepted representation
		kind: RealPrecisionKind,
	},
	/// TRANSPARENCY
	Transparency {
		/// Auxiliary colour transparency flag
		on: bool,
	},
	/// CLIP INDICATOR
	ClipIndicator {
		/// Clipping flag
		on: bool,
	},
	/// LINE TYPE CONTINUATION
	LineTypeContinuation {
		/// Continuation mode
		mode: i32,
	},
}

impl Control {
	/// Element id within class 3.
	pub fn element_id(&self) -> u8 {
		match self {
			Control::VdcIntegerPrecision { .. } => 1,
			Control::VdcRealPrecision { .. } => 2,
			Control::Transparency { .. } => 4,
			Control::ClipIndicator { .. } => 6,
			Control::LineTypeContinuation { .. } => 19,
		}
	}

	/// Decodes a class 3 element, or `None` for an unsupported id.
	pub(crate) fn decode(
		element_id: u8,
		reader: &mut PrimitiveReader<'_>,
		ctx: &mut Context,
	) -> Result<Option<Self>, CgmError> {
		Ok(Some(match element_id {
			1 => {
				let precision = reader.int(ctx)?;
				ctx.vdc_integer_precision = precision;
				Control::VdcIntegerPrecision { precision }
			}
			2 => {
				let kind = read_real_precision(reader, ctx)?;
				ctx.vdc_real_precision = kind;
				Control::VdcRealPrecision { kind }
			}
			4 => Control::Transparency { on: reader.boolean()? },
			6 => Control::ClipIndicator { on: reader.boolean()? },
			19 => Control::LineTypeContinuation { mode: reader.index(ctx)? },
			_ => return Ok(None),
		}))
	}

	/// Writes the element in clear text, replaying its context mutation.
	pub(crate) fn write(&self, writer: &mut ClearTextWriter, ctx: &mut Context) {
		match self {
			Control::VdcIntegerPrecision { precision } => {
				ctx.vdc_integer_precision = *precision;
				let (min, max) = format::signed_range(*precision);
				writer.write_line(&format!(
					"  vdcintegerprec {min}, {max} % {precision} binary bits %;"
				));
			}
			Control::VdcRealPrecision { kind } => {
				ctx.vdc_real_precision = *kind;
				writer.write_line(&format!("  vdcrealprec {};", real_precision_text(*kind)));
			}
			Control::Transparency { on } => {
				writer.write_line(&format!("  transparency {};", format::on_off(*on)));
			}
			Control::ClipIndicator { on } => {
				writer.write_line(&format!("  clip {};", format::on_off(*on)));
			}
			Control::LineTypeContinuation { mode } => {
				writer.write_line(&format!("  linetypecont {mode};"));
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_vdc_integer_precision_mutates_context() {
		let mut ctx = Context::default();
		let args = 32i16.to_be_bytes();
		let mut reader = PrimitiveReader::new(&args, 3, 1, "vdcintegerprec");
		let decoded = Control::decode(1, &mut reader, &mut ctx).unwrap().unwrap();

		assert_eq!(decoded, Control::VdcIntegerPrecision { precision: 32 });
		assert_eq!(ctx.vdc_integer_precision, 32);
	}

	#[test]
	fn test_vdc_real_precision_rejects_bad_tuple() {
		let mut ctx = Context::default();
		let mut args = Vec::new();
		args.extend_from_slice(&0i16.to_be_bytes());
		args.extend_from_slice(&5i16.to_be_bytes());
		args.extend_from_slice(&11i16.to_be_bytes());

		let mut reader = PrimitiveReader::new(&args, 3, 2, "vdcrealprec");
		let result = Control::decode(2, &mut reader, &mut ctx);
		assert!(matches!(result, Err(CgmError::UnsupportedRealPrecision { .. })));
		assert_eq!(ctx.vdc_real_precision, RealPrecisionKind::Fixed32);
	}

	#[test]
	fn test_clip_indicator_write() {
		let mut ctx = Context::default();
		let mut writer = ClearTextWriter::new();
		Control::ClipIndicator { on: true }.write(&mut writer, &mut ctx);
		Control::Transparency { on: false }.write(&mut writer, &mut ctx);

		let (text, _) = writer.finish();
		assert_eq!(text, "  clip on;\n  transparency off;\n");
	}
}
