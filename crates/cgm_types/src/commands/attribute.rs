//! Attribute elements (class 5).

use crate::binary::PrimitiveReader;
use crate::cleartext::ClearTextWriter;
use crate::cleartext::format;
use crate::context::{Context, RestrictedTextKind};
use crate::error::CgmError;
use crate::values::{Colour, Point};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlignment {
	/// Normal
	Normal,
	/// Left
	Left,
	/// Centre
	Centre,
	/// Right
	Right,
	/// Continuous, using the continuous alignment parameter
	Continuous,
}

impl HorizontalAlignment {
	fn keyword(self) -> &'static str {
		match self {
			HorizontalAlignment::Normal => "normhoriz",
			HorizontalAlignment::Left => "left",
			HorizontalAlignment::Centre => "ctr",
			HorizontalAlignment::Right => "right",
			HorizontalAlignment::Continuous => "conthoriz",
		}
	}
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlignment {
	/// Normal
	Normal,
	/// Top
	Top,
	/// Cap line
	Cap,
	/// Half line
	Half,
	/// Baseline
	Base,
	/// Bottom
	Bottom,
	/// Continuous, using the continuous alignment parameter
	Continuous,
}

impl VerticalAlignment {
	fn keyword(self) -> &'static str {
		match self {
			VerticalAlignment::Normal => "normvert",
			VerticalAlignment::Top => "top",
			VerticalAlignment::Cap => "cap",
			VerticalAlignment::Half => "half",
			VerticalAlignment::Base => "base",
			VerticalAlignment::Bottom => "bottom",
			VerticalAlignment::Continuous => "contvert",
		}
	}
}

/// Interior style of filled elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteriorStyleKind {
	/// Hollow
	Hollow,
	/// Solid
	Solid,
	/// Pattern
	Pattern,
	/// Hatch
	Hatch,
	/// Empty
	Empty,
	/// Geometric pattern
	GeometricPattern,
	/// Interpolated
	Interpolated,
}

impl InteriorStyleKind {
	fn keyword(self) -> &'static str {
		match self {
			InteriorStyleKind::Hollow => "hollow",
			InteriorStyleKind::Solid => "solid",
			InteriorStyleKind::Pattern => "pat",
			InteriorStyleKind::Hatch => "hatch",
			InteriorStyleKind::Empty => "empty",
			InteriorStyleKind::GeometricPattern => "geopat",
			InteriorStyleKind::Interpolated => "interp",
		}
	}
}

/// A class 5 attribute element.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
	/// LINE TYPE
	LineType {
		/// Line type index
		index: i32,
	},
	/// LINE WIDTH
	LineWidth {
		/// Width under the line width specification mode
		width: f64,
	},
	/// LINE COLOUR
	LineColour {
		/// Colour
		colour: Colour,
	},
	/// TEXT FONT INDEX
	TextFontIndex {
		/// Font list index
		index: i32,
	},
	/// CHARACTER EXPANSION FACTOR
	CharacterExpansionFactor {
		/// Width expansion factor
		factor: f64,
	},
	/// TEXT COLOUR
	TextColour {
		/// Colour
		colour: Colour,
	},
	/// CHARACTER HEIGHT
	CharacterHeight {
		/// Height in VDC
		height: f64,
	},
	/// CHARACTER ORIENTATION
	CharacterOrientation {
		/// Up vector
		up: Point,
		/// Base vector
		base: Point,
	},
	/// TEXT ALIGNMENT
	TextAlignment {
		/// Horizontal alignment
		horizontal: HorizontalAlignment,
		/// Vertical alignment
		vertical: VerticalAlignment,
		/// Continuous horizontal alignment
		continuous_horizontal: f64,
		/// Continuous vertical alignment
		continuous_vertical: f64,
	},
	/// CHARACTER SET INDEX
	CharacterSetIndex {
		/// Character set list index
		index: i32,
	},
	/// ALTERNATE CHARACTER SET INDEX
	AlternateCharacterSetIndex {
		/// Character set list index
		index: i32,
	},
	/// INTERIOR STYLE
	InteriorStyle {
		/// Style
		style: InteriorStyleKind,
	},
	/// FILL COLOUR
	FillColour {
		/// Colour
		colour: Colour,
	},
	/// EDGE TYPE
	EdgeType {
		/// Edge type index
		index: i32,
	},
	/// EDGE WIDTH
	EdgeWidth {
		/// Width under the edge width specification mode
		width: f64,
	},
	/// EDGE COLOUR
	EdgeColour {
		/// Colour
		colour: Colour,
	},
	/// EDGE VISIBILITY
	EdgeVisibility {
		/// Visibility flag
		on: bool,
	},
	/// COLOUR TABLE
	ColourTable {
		/// First index being (re)defined
		start_index: u32,
		/// Direct colour entries
		entries: Vec<(u8, u8, u8)>,
	},
	/// LINE CAP
	LineCap {
		/// Line cap indicator
		line_indicator: i32,
		/// Dash cap indicator
		dash_indicator: i32,
	},
	/// LINE JOIN
	LineJoin {
		/// Join indicator
		indicator: i32,
	},
	/// RESTRICTED TEXT TYPE
	RestrictedTextType {
		/// Restriction variant
		kind: RestrictedTextKind,
	},
	/// EDGE CAP
	EdgeCap {
		/// Edge cap indicator
		edge_indicator: i32,
		/// Dash cap indicator
		dash_indicator: i32,
	},
	/// EDGE JOIN
	EdgeJoin {
		/// Join indicator
		indicator: i32,
	},
	/// GEOMETRIC PATTERN DEFINITION
	GeometricPatternDefinition {
		/// Pattern index being defined
		pattern_index: i32,
		/// Segment identifier
		segment: i32,
		/// First corner point
		first_corner: Point,
		/// Second corner point
		second_corner: Point,
	},
}

impl Attribute {
	/// Element id within class 5.
	pub fn element_id(&self) -> u8 {
		match self {
			Attribute::LineType { .. } => 2,
			Attribute::LineWidth { .. } => 3,
			Attribute::LineColour { .. } => 4,
			Attribute::TextFontIndex { .. } => 10,
			Attribute::CharacterExpansionFactor { .. } => 12,
			Attribute::TextColour { .. } => 14,
			Attribute::CharacterHeight { .. } => 15,
			Attribute::CharacterOrientation { .. } => 16,
			Attribute::TextAlignment { .. } => 18,
			Attribute::CharacterSetIndex { .. } => 19,
			Attribute::AlternateCharacterSetIndex { .. } => 20,
			Attribute::InteriorStyle { .. } => 22,
			Attribute::FillColour { .. } => 23,
			Attribute::EdgeType { .. } => 27,
			Attribute::EdgeWidth { .. } => 28,
			Attribute::EdgeColour { .. } => 29,
			Attribute::EdgeVisibility { .. } => 30,
			Attribute::ColourTable { .. } => 34,
			Attribute::LineCap { .. } => 37,
			Attribute::LineJoin { .. } => 38,
			Attribute::RestrictedTextType { .. } => 42,
			Attribute::EdgeCap { .. } => 44,
			Attribute::EdgeJoin { .. } => 45,
			Attribute::GeometricPatternDefinition { .. } => 46,
		}
	}

	/// Decodes a class 5 element, or `None` for an unsupported id.
	pub(crate) fn decode(
		element_id: u8,
		reader: &mut PrimitiveReader<'_>,
		ctx: &mut Context,
	) -> Result<Option<Self>, CgmError> {
		Ok(Some(match element_id {
			2 => Attribute::LineType { index: reader.index(ctx)? },
			3 => Attribute::LineWidth {
				width: reader.size_specification(ctx, ctx.line_width_mode)?,
			},
			4 => Attribute::LineColour { colour: reader.colour(ctx, None)? },
			10 => Attribute::TextFontIndex { index: reader.index(ctx)? },
			12 => Attribute::CharacterExpansionFactor { factor: reader.real(ctx)? },
			14 => Attribute::TextColour { colour: reader.colour(ctx, None)? },
			15 => Attribute::CharacterHeight { height: reader.vdc(ctx)? },
			16 => Attribute::CharacterOrientation {
				up: reader.point(ctx)?,
				base: reader.point(ctx)?,
			},
			18 => {
				let horizontal = match reader.enum_value()? {
					0 => HorizontalAlignment::Normal,
					1 => HorizontalAlignment::Left,
					2 => HorizontalAlignment::Centre,
					3 => HorizontalAlignment::Right,
					4 => HorizontalAlignment::Continuous,
					other => {
						reader.unsupported(format!("horizontal alignment {other}"));
						HorizontalAlignment::Normal
					}
				};
				let vertical = match reader.enum_value()? {
					0 => VerticalAlignment::Normal,
					1 => VerticalAlignment::Top,
					2 => VerticalAlignment::Cap,
					3 => VerticalAlignment::Half,
					4 => VerticalAlignment::Base,
					5 => VerticalAlignment::Bottom,
					6 => VerticalAlignment::Continuous,
					other => {
						reader.unsupported(format!("vertical alignment {other}"));
						VerticalAlignment::Normal
					}
				};
				Attribute::TextAlignment {
					horizontal,
					vertical,
					continuous_horizontal: reader.real(ctx)?,
					continuous_vertical: reader.real(ctx)?,
				}
			}
			19 => Attribute::CharacterSetIndex { index: reader.index(ctx)? },
			20 => Attribute::AlternateCharacterSetIndex { index: reader.index(ctx)? },
			22 => {
				let style = match reader.enum_value()? {
					0 => InteriorStyleKind::Hollow,
					1 => InteriorStyleKind::Solid,
					2 => InteriorStyleKind::Pattern,
					3 => InteriorStyleKind::Hatch,
					4 => InteriorStyleKind::Empty,
					5 => InteriorStyleKind::GeometricPattern,
					6 => InteriorStyleKind::Interpolated,
					other => {
						reader.unsupported(format!("interior style {other}"));
						InteriorStyleKind::Hollow
					}
				};
				Attribute::InteriorStyle { style }
			}
			23 => Attribute::FillColour { colour: reader.colour(ctx, None)? },
			27 => Attribute::EdgeType { index: reader.index(ctx)? },
			28 => Attribute::EdgeWidth {
				width: reader.size_specification(ctx, ctx.edge_width_mode)?,
			},
			29 => Attribute::EdgeColour { colour: reader.colour(ctx, None)? },
			30 => Attribute::EdgeVisibility { on: reader.boolean()? },
			34 => {
				let start_index = reader.colour_index(ctx, None)?;
				let components =
					if ctx.colour_model == crate::context::ColourModel::Cmyk { 4 } else { 3 };
				let entry_bits = components * ctx.colour_precision.max(1) as usize;
				let mut entries = Vec::new();
				while reader.remaining_bits() >= entry_bits {
					entries.push(reader.direct_colour(ctx)?);
				}
				// Sub-byte entries leave the cursor off the word grid
				reader.align_word();
				Attribute::ColourTable { start_index, entries }
			}
			37 => Attribute::LineCap {
				line_indicator: reader.index(ctx)?,
				dash_indicator: reader.index(ctx)?,
			},
			38 => Attribute::LineJoin { indicator: reader.index(ctx)? },
			42 => {
				let kind = match reader.index(ctx)? {
					1 => RestrictedTextKind::Basic,
					2 => RestrictedTextKind::BoxedCap,
					3 => RestrictedTextKind::BoxedAll,
					4 => RestrictedTextKind::IsotropicCap,
					5 => RestrictedTextKind::IsotropicAll,
					6 => RestrictedTextKind::Justified,
					other => {
						reader.unsupported(format!("restricted text type {other}"));
						RestrictedTextKind::Basic
					}
				};
				ctx.restricted_text_type = kind;
				Attribute::RestrictedTextType { kind }
			}
			44 => Attribute::EdgeCap {
				edge_indicator: reader.index(ctx)?,
				dash_indicator: reader.index(ctx)?,
			},
			45 => Attribute::EdgeJoin { indicator: reader.index(ctx)? },
			46 => Attribute::GeometricPatternDefinition {
				pattern_index: reader.index(ctx)?,
				segment: reader.name(ctx)?,
				first_corner: reader.point(ctx)?,
				second_corner: reader.point(ctx)?,
			},
			_ => return Ok(None),
		}))
	}

	/// Writes the element in clear text, replaying its context mutation.
	pub(crate) fn write(&self, writer: &mut ClearTextWriter, ctx: &mut Context) {
		match self {
			Attribute::LineType { index } => {
				writer.write_line(&format!("  linetype {index};"));
			}
			Attribute::LineWidth { width } => {
				writer.write_line(&format!(
					"  linewidth {};",
					format::size(*width, ctx, ctx.line_width_mode)
				));
			}
			Attribute::LineColour { colour } => {
				writer.write_line(&format!("  linecolr {};", colour_text(colour)));
			}
			Attribute::TextFontIndex { index } => {
				writer.write_line(&format!("  textfontindex {index};"));
			}
			Attribute::CharacterExpansionFactor { factor } => {
				writer.write_line(&format!("  charexpan {};", format::real(*factor)));
			}
			Attribute::TextColour { colour } => {
				writer.write_line(&format!("  textcolr {};", colour_text(colour)));
			}
			Attribute::CharacterHeight { height } => {
				writer.write_line(&format!("  charheight {};", format::vdc(*height, ctx)));
			}
			Attribute::CharacterOrientation { up, base } => {
				writer.write_line(&format!(
					"  charori {} {} {} {};",
					format::vdc(up.x, ctx),
					format::vdc(up.y, ctx),
					format::vdc(base.x, ctx),
					format::vdc(base.y, ctx)
				));
			}
			Attribute::TextAlignment {
				horizontal,
				vertical,
				continuous_horizontal,
				continuous_vertical,
			} => {
				writer.write_line(&format!(
					"  textalign {} {} {} {};",
					horizontal.keyword(),
					vertical.keyword(),
					format::real(*continuous_horizontal),
					format::real(*continuous_vertical)
				));
			}
			Attribute::CharacterSetIndex { index } => {
				writer.write_line(&format!("  charsetindex {index};"));
			}
			Attribute::AlternateCharacterSetIndex { index } => {
				writer.write_line(&format!("  altcharsetindex {index};"));
			}
			Attribute::InteriorStyle { style } => {
				writer.write_line(&format!("  intstyle {};", style.keyword()));
			}
			Attribute::FillColour { colour } => {
				writer.write_line(&format!("  fillcolr {};", colour_text(colour)));
			}
			Attribute::EdgeType { index } => {
				writer.write_line(&format!("  edgetype {index};"));
			}
			Attribute::EdgeWidth { width } => {
				writer.write_line(&format!(
					"  edgewidth {};",
					format::size(*width, ctx, ctx.edge_width_mode)
				));
			}
			Attribute::EdgeColour { colour } => {
				writer.write_line(&format!("  edgecolr {};", colour_text(colour)));
			}
			Attribute::EdgeVisibility { on } => {
				writer.write_line(&format!("  edgevis {};", format::on_off(*on)));
			}
			Attribute::ColourTable { start_index, entries } => {
				writer.write(&format!("  colrtable {start_index}"));
				for (r, g, b) in entries {
					writer.write(&format!(" {r} {g} {b}"));
				}
				writer.write_line(";");
			}
			Attribute::LineCap { line_indicator, dash_indicator } => {
				writer.write_line(&format!("  linecap {line_indicator} {dash_indicator};"));
			}
			Attribute::LineJoin { indicator } => {
				writer.write_line(&format!("  linejoin {indicator};"));
			}
			Attribute::RestrictedTextType { kind } => {
				ctx.restricted_text_type = *kind;
				writer.write_line(&format!("  restrtexttype {kind};"));
			}
			Attribute::EdgeCap { edge_indicator, dash_indicator } => {
				writer.write_line(&format!("  edgecap {edge_indicator} {dash_indicator};"));
			}
			Attribute::EdgeJoin { indicator } => {
				writer.write_line(&format!("  edgejoin {indicator};"));
			}
			Attribute::GeometricPatternDefinition {
				pattern_index,
				segment,
				first_corner,
				second_corner,
			} => {
				writer.write_line(&format!(
					"  geopatdef {pattern_index} {segment} {} {};",
					format::point(*first_corner, ctx),
					format::point(*second_corner, ctx)
				));
			}
		}
	}
}

/// Formats a colour: a bare index or a component triple.
fn colour_text(colour: &Colour) -> String {
	match colour {
		Colour::Indexed(index) => index.to_string(),
		Colour::Direct { r, g, b } => format!("{r} {g} {b}"),
	}
}
