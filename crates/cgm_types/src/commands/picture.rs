//! Picture descriptor elements (class 2).

use crate::binary::PrimitiveReader;
use crate::cleartext::ClearTextWriter;
use crate::cleartext::format;
use crate::context::{ColourSelectionMode, Context, SpecificationMode};
use crate::error::CgmError;
use crate::values::Point;

/// SCALING MODE selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingModeKind {
	/// Abstract scaling
	Abstract,
	/// Metric scaling with a millimetre factor
	Metric,
}

/// A class 2 picture descriptor element.
#[derive(Debug, Clone, PartialEq)]
pub enum PictureDescriptor {
	/// SCALING MODE
	ScalingMode {
		/// Abstract or metric
		mode: ScalingModeKind,
		/// Metric scaling factor; meaningful only in metric mode
		factor: f64,
	},
	/// COLOUR SELECTION MODE
	ColourSelection {
		/// Indexed or direct
		mode: ColourSelectionMode,
	},
	/// LINE WIDTH SPECIFICATION MODE
	LineWidthMode {
		/// Absolute or scaled
		mode: SpecificationMode,
	},
	/// MARKER SIZE SPECIFICATION MODE
	MarkerSizeMode {
		/// Absolute or scaled
		mode: SpecificationMode,
	},
	/// EDGE WIDTH SPECIFICATION MODE
	EdgeWidthMode {
		/// Absolute or scaled
		mode: SpecificationMode,
	},
	/// VDC EXTENT
	VdcExtent {
		/// First corner
		lower_left: Point,
		/// Second corner
		upper_right: Point,
	},
	/// BACKGROUND COLOUR (always a direct colour)
	BackgroundColour {
		/// Red component
		r: u8,
		/// Green component
		g: u8,
		/// Blue component
		b: u8,
	},
	/// LINE AND EDGE TYPE DEFINITION
	LineAndEdgeTypeDefinition {
		/// Line type being defined
		line_type: i32,
		/// Dash cycle repeat length
		dash_cycle_repeat: f64,
		/// Dash element lengths
		elements: Vec<i32>,
	},
}

impl PictureDescriptor {
	/// Element id within class 2.
	pub fn element_id(&self) -> u8 {
		match self {
			PictureDescriptor::ScalingMode { .. } => 1,
			PictureDescriptor::ColourSelection { .. } => 2,
			PictureDescriptor::LineWidthMode { .. } => 3,
			PictureDescriptor::MarkerSizeMode { .. } => 4,
			PictureDescriptor::EdgeWidthMode { .. } => 5,
			PictureDescriptor::VdcExtent { .. } => 6,
			PictureDescriptor::BackgroundColour { .. } => 7,
			PictureDescriptor::LineAndEdgeTypeDefinition { .. } => 17,
		}
	}

	/// Decodes a class 2 element, or `None` for an unsupported id.
	pub(crate) fn decode(
		element_id: u8,
		reader: &mut PrimitiveReader<'_>,
		ctx: &mut Context,
	) -> Result<Option<Self>, CgmError> {
		Ok(Some(match element_id {
			1 => {
				let value = reader.enum_value()?;
				let mode = match value {
					0 => ScalingModeKind::Abstract,
					1 => ScalingModeKind::Metric,
					other => {
						reader.unsupported(format!("scaling mode {other}"));
						ScalingModeKind::Abstract
					}
				};
				// The metric factor is defined as floating point even under
				// a fixed real precision
				let factor = if mode == ScalingModeKind::Metric {
					reader.floating(ctx)?
				} else {
					0.0
				};
				PictureDescriptor::ScalingMode { mode, factor }
			}
			2 => {
				let value = reader.enum_value()?;
				let mode = match value {
					0 => ColourSelectionMode::Indexed,
					1 => ColourSelectionMode::Direct,
					other => {
						reader.unsupported(format!("colour selection mode {other}"));
						ColourSelectionMode::Indexed
					}
				};
				ctx.colour_selection_mode = mode;
				PictureDescriptor::ColourSelection { mode }
			}
			3 => {
				let mode = specification_mode(reader, "line width specification mode")?;
				ctx.line_width_mode = mode;
				PictureDescriptor::LineWidthMode { mode }
			}
			4 => {
				let mode = specification_mode(reader, "marker size specification mode")?;
				ctx.marker_size_mode = mode;
				PictureDescriptor::MarkerSizeMode { mode }
			}
			5 => {
				let mode = specification_mode(reader, "edge width specification mode")?;
				ctx.edge_width_mode = mode;
				PictureDescriptor::EdgeWidthMode { mode }
			}
			6 => PictureDescriptor::VdcExtent {
				lower_left: reader.point(ctx)?,
				upper_right: reader.point(ctx)?,
			},
			7 => {
				let (r, g, b) = reader.direct_colour(ctx)?;
				PictureDescriptor::BackgroundColour { r, g, b }
			}
			17 => {
				let line_type = reader.index(ctx)?;
				let dash_cycle_repeat =
					reader.size_specification(ctx, ctx.line_width_mode)?;
				let mut elements = Vec::new();
				while reader.remaining() > 0 {
					elements.push(reader.int(ctx)?);
				}
				PictureDescriptor::LineAndEdgeTypeDefinition {
					line_type,
					dash_cycle_repeat,
					elements,
				}
			}
			_ => return Ok(None),
		}))
	}

	/// Writes the element in clear text, replaying its context mutation.
	pub(crate) fn write(&self, writer: &mut ClearTextWriter, ctx: &mut Context) {
		match self {
			PictureDescriptor::ScalingMode { mode, factor } => match mode {
				ScalingModeKind::Abstract => writer.write_line("  scalemode abstract;"),
				ScalingModeKind::Metric => {
					writer.write_line(&format!("  scalemode metric {};", format::real(*factor)));
				}
			},
			PictureDescriptor::ColourSelection { mode } => {
				ctx.colour_selection_mode = *mode;
				writer.write_line(&format!("  colrmode {mode};"));
			}
			PictureDescriptor::LineWidthMode { mode } => {
				ctx.line_width_mode = *mode;
				writer.write_line(&format!("  linewidthmode {mode};"));
			}
			PictureDescriptor::MarkerSizeMode { mode } => {
				ctx.marker_size_mode = *mode;
				writer.write_line(&format!("  markersizemode {mode};"));
			}
			PictureDescriptor::EdgeWidthMode { mode } => {
				ctx.edge_width_mode = *mode;
				writer.write_line(&format!("  edgewidthmode {mode};"));
			}
			PictureDescriptor::VdcExtent { lower_left, upper_right } => {
				writer.write_line(&format!(
					"  vdcext {} {};",
					format::point(*lower_left, ctx),
					format::point(*upper_right, ctx)
				));
			}
			PictureDescriptor::BackgroundColour { r, g, b } => {
				writer.write_line(&format!("  backcolr {r} {g} {b};"));
			}
			PictureDescriptor::LineAndEdgeTypeDefinition {
				line_type,
				dash_cycle_repeat,
				elements,
			} => {
				writer.write(&format!(
					"  lineedgetypedef {line_type} {}",
					format::vdc(*dash_cycle_repeat, ctx)
				));
				for element in elements {
					writer.write(&format!(" {element}"));
				}
				writer.write_line(";");
			}
		}
	}
}

/// Reads an abs/scaled specification-mode enumeration.
fn specification_mode(
	reader: &mut PrimitiveReader<'_>,
	what: &str,
) -> Result<SpecificationMode, CgmError> {
	let value = reader.enum_value()?;
	Ok(match value {
		0 => SpecificationMode::Absolute,
		1 => SpecificationMode::Scaled,
		other => {
			reader.unsupported(format!("{what} {other}"));
			SpecificationMode::Absolute
		}
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_colour_selection_mode_mutates_context() {
		let mut ctx = Context::default();
		let args = 1i16.to_be_bytes();
		let mut reader = PrimitiveReader::new(&args, 2, 2, "colrmode");
		let decoded = PictureDescriptor::decode(2, &mut reader, &mut ctx).unwrap().unwrap();

		assert_eq!(decoded, PictureDescriptor::ColourSelection {
			mode: ColourSelectionMode::Direct
		});
		assert_eq!(ctx.colour_selection_mode, ColourSelectionMode::Direct);
	}

	#[test]
	fn test_invalid_mode_falls_back_with_diagnostic() {
		let mut ctx = Context::default();
		let args = 9i16.to_be_bytes();
		let mut reader = PrimitiveReader::new(&args, 2, 2, "colrmode");
		let decoded = PictureDescriptor::decode(2, &mut reader, &mut ctx).unwrap().unwrap();

		assert_eq!(decoded, PictureDescriptor::ColourSelection {
			mode: ColourSelectionMode::Indexed
		});
		assert_eq!(reader.take_diagnostics().len(), 1);
	}

	#[test]
	fn test_background_colour_is_direct_even_in_indexed_mode() {
		let mut ctx = Context::default();
		assert_eq!(ctx.colour_selection_mode, ColourSelectionMode::Indexed);

		let args = [12u8, 34, 56];
		let mut reader = PrimitiveReader::new(&args, 2, 7, "backcolr");
		let decoded = PictureDescriptor::decode(7, &mut reader, &mut ctx).unwrap().unwrap();

		assert_eq!(decoded, PictureDescriptor::BackgroundColour { r: 12, g: 34, b: 56 });
	}

	#[test]
	fn test_scaling_mode_metric_reads_floating_factor() {
		let mut ctx = Context::default();
		let mut args = Vec::new();
		args.extend_from_slice(&1i16.to_be_bytes());
		args.extend_from_slice(&0.25f32.to_be_bytes());

		let mut reader = PrimitiveReader::new(&args, 2, 1, "scalemode");
		let decoded = PictureDescriptor::decode(1, &mut reader, &mut ctx).unwrap().unwrap();
		match decoded {
			PictureDescriptor::ScalingMode { mode, factor } => {
				assert_eq!(mode, ScalingModeKind::Metric);
				assert!((factor - 0.25).abs() < 1e-9);
			}
			other => panic!("unexpected {other:?}"),
		}
	}

	#[test]
	fn test_vdc_extent_write() {
		let mut ctx = Context::default();
		let mut writer = ClearTextWriter::new();
		PictureDescriptor::VdcExtent {
			lower_left: Point::new(0.0, 0.0),
			upper_right: Point::new(100.0, 200.0),
		}
		.write(&mut writer, &mut ctx);

		let (text, _) = writer.finish();
		assert_eq!(text, "  vdcext (0,0) (100,200);\n");
	}
}
