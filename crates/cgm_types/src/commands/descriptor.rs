//! Metafile descriptor elements (class 1).
//!
//! Most elements in this class mutate the decoding context; the same
//! mutation is replayed when the element is emitted so that later commands
//! format under the state that was in effect at their stream position.

use crate::binary::PrimitiveReader;
use crate::cleartext::ClearTextWriter;
use crate::cleartext::format;
use crate::context::{ColourModel, Context, RealPrecisionKind, VdcType};
use crate::error::CgmError;
use crate::values::{Point, StructuredDataRecord};

/// Character set designation of a CHARACTER SET LIST entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterSetKind {
	/// 94-character G-set
	Std94,
	/// 96-character G-set
	Std96,
	/// 94-character multibyte G-set
	Std94Multibyte,
	/// 96-character multibyte G-set
	Std96Multibyte,
	/// Complete code
	CompleteCode,
}

impl CharacterSetKind {
	fn keyword(self) -> &'static str {
		match self {
			CharacterSetKind::Std94 => "STD94",
			CharacterSetKind::Std96 => "STD96",
			CharacterSetKind::Std94Multibyte => "STD94MULTIBYTE",
			CharacterSetKind::Std96Multibyte => "STD96MULTIBYTE",
			CharacterSetKind::CompleteCode => "COMPLETECODE",
		}
	}
}

/// CHARACTER CODING ANNOUNCER values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterCoding {
	/// Basic 7-bit
	Basic7Bit,
	/// Basic 8-bit
	Basic8Bit,
	/// Extended 7-bit
	Extended7Bit,
	/// Extended 8-bit
	Extended8Bit,
}

impl CharacterCoding {
	fn keyword(self) -> &'static str {
		match self {
			CharacterCoding::Basic7Bit => "basic7bit",
			CharacterCoding::Basic8Bit => "basic8bit",
			CharacterCoding::Extended7Bit => "extd7bit",
			CharacterCoding::Extended8Bit => "extd8bit",
		}
	}
}

/// One FONT PROPERTIES group.
#[derive(Debug, Clone, PartialEq)]
pub struct FontProperty {
	/// Property indicator
	pub indicator: i32,
	/// Property priority
	pub priority: i32,
	/// Property value record
	pub record: StructuredDataRecord,
}

/// Named metafile element sets selectable in MF ELEMENT LIST.
const ELEMENT_SET_NAMES: [&str; 7] = [
	"DRAWINGSET",
	"DRAWINGPLUS",
	"VERSION2",
	"EXTDPRIM",
	"VERSION2GKSM",
	"VERSION3",
	"VERSION4",
];

/// A class 1 metafile descriptor element.
#[derive(Debug, Clone, PartialEq)]
pub enum MetafileDescriptor {
	/// METAFILE VERSION
	Version {
		/// Declared version number
		version: i32,
	},
	/// METAFILE DESCRIPTION
	Description {
		/// Free-form description
		text: String,
	},
	/// VDC TYPE
	VdcKind {
		/// Declared VDC type
		kind: VdcType,
	},
	/// INTEGER PRECISION
	IntegerPrecision {
		/// Bit width
		precision: i32,
	},
	/// REAL PRECISION
	RealPrecision {
		/// Accepted representation
		kind: RealPrecisionKind,
	},
	/// INDEX PRECISION
	IndexPrecision {
		/// Bit width
		precision: i32,
	},
	/// COLOUR PRECISION
	ColourPrecision {
		/// Bit width
		precision: i32,
	},
	/// COLOUR INDEX PRECISION
	ColourIndexPrecision {
		/// Bit width
		precision: i32,
	},
	/// MAXIMUM COLOUR INDEX
	MaximumColourIndex {
		/// Largest usable colour index
		index: u32,
	},
	/// COLOUR VALUE EXTENT
	ColourValueExtent {
		/// Minimum component triple
		minimum: [u32; 3],
		/// Maximum component triple
		maximum: [u32; 3],
	},
	/// METAFILE ELEMENT LIST
	ElementList {
		/// `(class, id)` pairs; `(-1, k)` selects a named element set
		elements: Vec<(i32, i32)>,
	},
	/// FONT LIST
	FontList {
		/// Font names in index order
		fonts: Vec<String>,
	},
	/// CHARACTER SET LIST
	CharacterSetList {
		/// Designation and designation-sequence tail pairs
		sets: Vec<(CharacterSetKind, String)>,
	},
	/// CHARACTER CODING ANNOUNCER
	CharacterCodingAnnouncer {
		/// Announced coding technique
		coding: CharacterCoding,
	},
	/// MAXIMUM VDC EXTENT
	MaximumVdcExtent {
		/// First corner
		lower_left: Point,
		/// Second corner
		upper_right: Point,
	},
	/// FONT PROPERTIES
	FontProperties {
		/// Property groups
		properties: Vec<FontProperty>,
	},
}

impl MetafileDescriptor {
	/// Element id within class 1.
	pub fn element_id(&self) -> u8 {
		match self {
			MetafileDescriptor::Version { .. } => 1,
			MetafileDescriptor::Description { .. } => 2,
			MetafileDescriptor::VdcKind { .. } => 3,
			MetafileDescriptor::IntegerPrecision { .. } => 4,
			MetafileDescriptor::RealPrecision { .. } => 5,
			MetafileDescriptor::IndexPrecision { .. } => 6,
			MetafileDescriptor::ColourPrecision { .. } => 7,
			MetafileDescriptor::ColourIndexPrecision { .. } => 8,
			MetafileDescriptor::MaximumColourIndex { .. } => 9,
			MetafileDescriptor::ColourValueExtent { .. } => 10,
			MetafileDescriptor::ElementList { .. } => 11,
			MetafileDescriptor::FontList { .. } => 13,
			MetafileDescriptor::CharacterSetList { .. } => 14,
			MetafileDescriptor::CharacterCodingAnnouncer { .. } => 15,
			MetafileDescriptor::MaximumVdcExtent { .. } => 17,
			MetafileDescriptor::FontProperties { .. } => 21,
		}
	}

	/// Decodes a class 1 element, or `None` for an unsupported id.
	pub(crate) fn decode(
		element_id: u8,
		reader: &mut PrimitiveReader<'_>,
		ctx: &mut Context,
	) -> Result<Option<Self>, CgmError> {
		Ok(Some(match element_id {
			1 => MetafileDescriptor::Version { version: reader.int(ctx)? },
			2 => {
				let text = if reader.is_empty() { String::new() } else { reader.string()? };
				MetafileDescriptor::Description { text }
			}
			3 => {
				let value = reader.enum_value()?;
				let kind = match value {
					0 => VdcType::Integer,
					1 => VdcType::Real,
					other => {
						reader.unsupported(format!("VDC type {other}"));
						VdcType::Integer
					}
				};
				ctx.vdc_type = kind;
				MetafileDescriptor::VdcKind { kind }
			}
			4 => {
				let precision = reader.int(ctx)?;
				ctx.integer_precision = precision;
				MetafileDescriptor::IntegerPrecision { precision }
			}
			5 => {
				let kind = read_real_precision(reader, ctx)?;
				ctx.real_precision = kind;
				MetafileDescriptor::RealPrecision { kind }
			}
			6 => {
				let precision = reader.int(ctx)?;
				ctx.index_precision = precision;
				MetafileDescriptor::IndexPrecision { precision }
			}
			7 => {
				let precision = reader.int(ctx)?;
				ctx.colour_precision = precision;
				MetafileDescriptor::ColourPrecision { precision }
			}
			8 => {
				let precision = reader.int(ctx)?;
				ctx.colour_index_precision = precision;
				MetafileDescriptor::ColourIndexPrecision { precision }
			}
			9 => MetafileDescriptor::MaximumColourIndex {
				index: reader.colour_index(ctx, None)?,
			},
			10 => {
				match ctx.colour_model {
					ColourModel::Rgb | ColourModel::RgbRelated => {
						let precision = ctx.colour_precision;
						let mut minimum = [0u32; 3];
						let mut maximum = [0u32; 3];
						for slot in &mut minimum {
							*slot = reader.uint(precision)?;
						}
						for slot in &mut maximum {
							*slot = reader.uint(precision)?;
						}
						ctx.colour_value_extent_min = minimum;
						ctx.colour_value_extent_max = maximum;
						MetafileDescriptor::ColourValueExtent { minimum, maximum }
					}
					model => {
						reader.unsupported(format!(
							"colour value extent for colour model {model:?}"
						));
						reader.skip_to_end();
						MetafileDescriptor::ColourValueExtent {
							minimum: ctx.colour_value_extent_min,
							maximum: ctx.colour_value_extent_max,
						}
					}
				}
			}
			11 => {
				let count = reader.int(ctx)?;
				let mut elements = Vec::new();
				for _ in 0..count {
					let first = reader.index(ctx)?;
					let second = reader.index(ctx)?;
					elements.push((first, second));
				}
				MetafileDescriptor::ElementList { elements }
			}
			13 => {
				let mut fonts = Vec::new();
				while reader.remaining() > 0 {
					fonts.push(reader.string()?);
				}
				MetafileDescriptor::FontList { fonts }
			}
			14 => {
				let mut sets = Vec::new();
				while reader.remaining() > 0 {
					let value = reader.enum_value()?;
					let kind = match value {
						0 => CharacterSetKind::Std94,
						1 => CharacterSetKind::Std96,
						2 => CharacterSetKind::Std94Multibyte,
						3 => CharacterSetKind::Std96Multibyte,
						4 => CharacterSetKind::CompleteCode,
						other => {
							reader.unsupported(format!("character set type {other}"));
							CharacterSetKind::Std94
						}
					};
					sets.push((kind, reader.string()?));
				}
				MetafileDescriptor::CharacterSetList { sets }
			}
			15 => {
				let value = reader.enum_value()?;
				let coding = match value {
					0 => CharacterCoding::Basic7Bit,
					1 => CharacterCoding::Basic8Bit,
					2 => CharacterCoding::Extended7Bit,
					3 => CharacterCoding::Extended8Bit,
					other => {
						reader.unsupported(format!("character coding announcer {other}"));
						CharacterCoding::Basic7Bit
					}
				};
				MetafileDescriptor::CharacterCodingAnnouncer { coding }
			}
			17 => MetafileDescriptor::MaximumVdcExtent {
				lower_left: reader.point(ctx)?,
				upper_right: reader.point(ctx)?,
			},
			21 => {
				let mut properties = Vec::new();
				while reader.remaining() > 0 {
					properties.push(FontProperty {
						indicator: reader.index(ctx)?,
						priority: reader.int(ctx)?,
						record: reader.sdr(ctx)?,
					});
				}
				MetafileDescriptor::FontProperties { properties }
			}
			_ => return Ok(None),
		}))
	}

	/// Writes the element in clear text, replaying its context mutation.
	pub(crate) fn write(&self, writer: &mut ClearTextWriter, ctx: &mut Context) {
		match self {
			MetafileDescriptor::Version { version } => {
				writer.write_line(&format!("mfversion {version};"));
			}
			MetafileDescriptor::Description { text } => {
				writer.write_line(&format!("mfdesc {};", format::quoted(text)));
			}
			MetafileDescriptor::VdcKind { kind } => {
				// Integer VDCs are re-declared as real: several clear-text
				// consumers mis-handle integer VDC streams, and real-form
				// output carries the same coordinates.
				if *kind == VdcType::Integer {
					writer.info("vdc type integer re-written as real for clear-text output");
				}
				ctx.vdc_type = VdcType::Real;
				writer.write_line("vdctype real;");
			}
			MetafileDescriptor::IntegerPrecision { precision } => {
				ctx.integer_precision = *precision;
				let (min, max) = format::signed_range(*precision);
				writer.write_line(&format!(
					"integerprec {min}, {max} % {precision} binary bits %;"
				));
			}
			MetafileDescriptor::RealPrecision { kind } => {
				ctx.real_precision = *kind;
				writer.write_line(&format!("realprec {};", real_precision_text(*kind)));
			}
			MetafileDescriptor::IndexPrecision { precision } => {
				ctx.index_precision = *precision;
				let (min, max) = format::signed_range(*precision);
				writer.write_line(&format!(
					"indexprec {min}, {max} % {precision} binary bits %;"
				));
			}
			MetafileDescriptor::ColourPrecision { precision } => {
				ctx.colour_precision = *precision;
				let max = format::unsigned_max(*precision);
				writer.write_line(&format!("colrprec {max} % {precision} binary bits %;"));
			}
			MetafileDescriptor::ColourIndexPrecision { precision } => {
				ctx.colour_index_precision = *precision;
				let max = format::unsigned_max(*precision);
				writer
					.write_line(&format!("colrindexprec {max} % {precision} binary bits %;"));
			}
			MetafileDescriptor::MaximumColourIndex { index } => {
				writer.write_line(&format!("maxcolrindex {index};"));
			}
			MetafileDescriptor::ColourValueExtent { minimum, maximum } => {
				ctx.colour_value_extent_min = *minimum;
				ctx.colour_value_extent_max = *maximum;
				writer.write_line(&format!(
					"colrvalueext {} {} {}, {} {} {};",
					minimum[0], minimum[1], minimum[2], maximum[0], maximum[1], maximum[2]
				));
			}
			MetafileDescriptor::ElementList { elements } => {
				writer.write("mfelemlist");
				if let &[(-1, set)] = elements.as_slice() {
					let name = usize::try_from(set)
						.ok()
						.and_then(|index| ELEMENT_SET_NAMES.get(index));
					if let Some(name) = name {
						writer.write_line(&format!(" '{name}';"));
						return;
					}
				}
				for (first, second) in elements {
					writer.write(&format!(" {first} {second}"));
				}
				writer.write_line(";");
			}
			MetafileDescriptor::FontList { fonts } => {
				writer.write("fontlist");
				for (i, font) in fonts.iter().enumerate() {
					let separator = if i == 0 { " " } else { ", " };
					writer.write(&format!("{separator}{}", format::quoted(font)));
				}
				writer.write_line(";");
			}
			MetafileDescriptor::CharacterSetList { sets } => {
				writer.write("charsetlist");
				for (kind, tail) in sets {
					writer.write(&format!(" {} {}", kind.keyword(), format::quoted(tail)));
				}
				writer.write_line(";");
			}
			MetafileDescriptor::CharacterCodingAnnouncer { coding } => {
				writer.write_line(&format!("charcoding {};", coding.keyword()));
			}
			MetafileDescriptor::MaximumVdcExtent { lower_left, upper_right } => {
				writer.write_line(&format!(
					"maxvdcext {} {};",
					format::point(*lower_left, ctx),
					format::point(*upper_right, ctx)
				));
			}
			MetafileDescriptor::FontProperties { properties } => {
				writer.write("fontprop");
				for property in properties {
					writer.write(&format!(
						" {} {} {}",
						property.indicator,
						property.priority,
						format::quoted_raw(&property.record.to_string())
					));
				}
				writer.write_line(";");
			}
		}
	}
}

/// Reads a real-precision declaration and maps it to a representation.
///
/// Only the four tuples the binary encoding defines are representable;
/// anything else aborts the command and leaves the context untouched.
pub(crate) fn read_real_precision(
	reader: &mut PrimitiveReader<'_>,
	ctx: &Context,
) -> Result<RealPrecisionKind, CgmError> {
	let representation = reader.enum_value()?;
	let whole = reader.int(ctx)?;
	let fraction = reader.int(ctx)?;

	match (representation, whole, fraction) {
		(0, 9, 23) => Ok(RealPrecisionKind::Floating32),
		(0, 12, 52) => Ok(RealPrecisionKind::Floating64),
		(1, 16, 16) => Ok(RealPrecisionKind::Fixed32),
		(1, 32, 32) => Ok(RealPrecisionKind::Fixed64),
		_ => Err(CgmError::UnsupportedRealPrecision { representation, whole, fraction }),
	}
}

/// Bounds-and-digits text of a real-precision declaration.
pub(crate) fn real_precision_text(kind: RealPrecisionKind) -> &'static str {
	match kind {
		RealPrecisionKind::Fixed32 => "-32767.0000, 32767.0000, 4 % 32 binary bits %",
		RealPrecisionKind::Fixed64 => {
			"-2147483647.0000, 2147483647.0000, 9 % 64 binary bits %"
		}
		RealPrecisionKind::Floating32 => "-3.4028235e38, 3.4028235e38, 7 % 32 binary bits %",
		RealPrecisionKind::Floating64 => {
			"-1.7976931348623157e308, 1.7976931348623157e308, 15 % 64 binary bits %"
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ctx() -> Context {
		Context::default()
	}

	#[test]
	fn test_integer_precision_reads_at_current_precision() {
		let mut ctx = ctx();
		let args = 32i16.to_be_bytes();
		let mut reader = PrimitiveReader::new(&args, 1, 4, "integerprec");
		let decoded =
			MetafileDescriptor::decode(4, &mut reader, &mut ctx).unwrap().unwrap();

		assert_eq!(decoded, MetafileDescriptor::IntegerPrecision { precision: 32 });
		assert_eq!(ctx.integer_precision, 32);
	}

	#[test]
	fn test_integer_precision_emission_shape() {
		let mut ctx = ctx();
		let mut writer = ClearTextWriter::new();
		MetafileDescriptor::IntegerPrecision { precision: 32 }.write(&mut writer, &mut ctx);

		let (text, _) = writer.finish();
		assert_eq!(text, "integerprec -2147483648, 2147483647 % 32 binary bits %;\n");
	}

	#[test]
	fn test_real_precision_tuples() {
		let cases: [(i16, i16, i16, RealPrecisionKind); 4] = [
			(0, 9, 23, RealPrecisionKind::Floating32),
			(0, 12, 52, RealPrecisionKind::Floating64),
			(1, 16, 16, RealPrecisionKind::Fixed32),
			(1, 32, 32, RealPrecisionKind::Fixed64),
		];
		for (representation, whole, fraction, expected) in cases {
			let mut ctx = ctx();
			let mut args = Vec::new();
			args.extend_from_slice(&representation.to_be_bytes());
			args.extend_from_slice(&whole.to_be_bytes());
			args.extend_from_slice(&fraction.to_be_bytes());

			let mut reader = PrimitiveReader::new(&args, 1, 5, "realprec");
			let decoded =
				MetafileDescriptor::decode(5, &mut reader, &mut ctx).unwrap().unwrap();
			assert_eq!(decoded, MetafileDescriptor::RealPrecision { kind: expected });
			assert_eq!(ctx.real_precision, expected);
		}
	}

	#[test]
	fn test_real_precision_rejects_other_tuples() {
		let mut ctx = ctx();
		let mut args = Vec::new();
		args.extend_from_slice(&1i16.to_be_bytes());
		args.extend_from_slice(&8i16.to_be_bytes());
		args.extend_from_slice(&8i16.to_be_bytes());

		let mut reader = PrimitiveReader::new(&args, 1, 5, "realprec");
		let result = MetafileDescriptor::decode(5, &mut reader, &mut ctx);
		assert!(matches!(result, Err(CgmError::UnsupportedRealPrecision { .. })));
		// Context keeps its previous representation
		assert_eq!(ctx.real_precision, RealPrecisionKind::Fixed32);
	}

	#[test]
	fn test_vdc_type_decode_keeps_integer_for_binary_reads() {
		let mut ctx = ctx();
		let args = 0i16.to_be_bytes();
		let mut reader = PrimitiveReader::new(&args, 1, 3, "vdctype");
		let decoded =
			MetafileDescriptor::decode(3, &mut reader, &mut ctx).unwrap().unwrap();

		assert_eq!(decoded, MetafileDescriptor::VdcKind { kind: VdcType::Integer });
		assert_eq!(ctx.vdc_type, VdcType::Integer);
	}

	#[test]
	fn test_vdc_type_emits_real_with_info_diagnostic() {
		let mut ctx = ctx();
		let mut writer = ClearTextWriter::new();
		MetafileDescriptor::VdcKind { kind: VdcType::Integer }.write(&mut writer, &mut ctx);

		assert_eq!(ctx.vdc_type, VdcType::Real);
		let (text, diags) = writer.finish();
		assert_eq!(text, "vdctype real;\n");
		assert_eq!(diags.len(), 1);
		let diagnostic = diags.iter().next().unwrap();
		assert_eq!(diagnostic.severity, crate::diagnostic::Severity::Info);
		assert!(!diagnostic.message.is_empty());
	}

	#[test]
	fn test_element_list_sentinel_name() {
		let mut ctx = ctx();
		let mut writer = ClearTextWriter::new();
		MetafileDescriptor::ElementList { elements: vec![(-1, 1)] }
			.write(&mut writer, &mut ctx);

		let (text, _) = writer.finish();
		assert_eq!(text, "mfelemlist 'DRAWINGPLUS';\n");
	}

	#[test]
	fn test_element_list_explicit_pairs() {
		let mut ctx = ctx();
		let mut writer = ClearTextWriter::new();
		MetafileDescriptor::ElementList { elements: vec![(0, 1), (4, 1)] }
			.write(&mut writer, &mut ctx);

		let (text, _) = writer.finish();
		assert_eq!(text, "mfelemlist 0 1 4 1;\n");
	}

	#[test]
	fn test_font_list_greedy_decode() {
		let mut ctx = ctx();
		let args = [5u8, b'A', b'r', b'i', b'a', b'l', 1, b'B'];
		let mut reader = PrimitiveReader::new(&args, 1, 13, "fontlist");
		let decoded =
			MetafileDescriptor::decode(13, &mut reader, &mut ctx).unwrap().unwrap();

		assert_eq!(decoded, MetafileDescriptor::FontList {
			fonts: vec!["Arial".into(), "B".into()]
		});

		let mut writer = ClearTextWriter::new();
		decoded.write(&mut writer, &mut ctx);
		let (text, _) = writer.finish();
		assert_eq!(text, "fontlist 'Arial', 'B';\n");
	}

	#[test]
	fn test_colour_value_extent_updates_context() {
		let mut ctx = ctx();
		let args = [10u8, 20, 30, 200, 210, 220];
		let mut reader = PrimitiveReader::new(&args, 1, 10, "colrvalueext");
		let decoded =
			MetafileDescriptor::decode(10, &mut reader, &mut ctx).unwrap().unwrap();

		assert_eq!(decoded, MetafileDescriptor::ColourValueExtent {
			minimum: [10, 20, 30],
			maximum: [200, 210, 220],
		});
		assert_eq!(ctx.colour_value_extent_min, [10, 20, 30]);
		assert_eq!(ctx.colour_value_extent_max, [200, 210, 220]);
	}
}
