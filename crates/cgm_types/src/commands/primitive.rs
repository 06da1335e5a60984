//! Graphical primitive elements (class 4).
//!
//! Primitive keywords are emitted upper-case, matching the clear-text
//! encoding's convention for drawing elements.

use crate::binary::PrimitiveReader;
use crate::cleartext::ClearTextWriter;
use crate::cleartext::format;
use crate::context::Context;
use crate::error::CgmError;
use crate::values::Point;

/// A class 4 graphical primitive element.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicalPrimitive {
	/// POLYLINE
	Polyline {
		/// Vertices in drawing order
		points: Vec<Point>,
	},
	/// DISJOINT POLYLINE
	DisjointPolyline {
		/// Segment endpoint pairs
		points: Vec<Point>,
	},
	/// TEXT
	Text {
		/// Text position
		position: Point,
		/// Final/not-final flag
		is_final: bool,
		/// Text content
		text: String,
	},
	/// RESTRICTED TEXT
	RestrictedText {
		/// Width of the restriction box
		delta_width: f64,
		/// Height of the restriction box
		delta_height: f64,
		/// Text position
		position: Point,
		/// Final/not-final flag
		is_final: bool,
		/// Text content
		text: String,
	},
	/// POLYGON
	Polygon {
		/// Vertices in boundary order
		points: Vec<Point>,
	},
	/// CIRCLE
	Circle {
		/// Centre point
		centre: Point,
		/// Radius
		radius: f64,
	},
	/// CIRCULAR ARC CENTRE
	CircularArcCentre {
		/// Centre point
		centre: Point,
		/// Start direction vector
		start: Point,
		/// End direction vector
		end: Point,
		/// Radius
		radius: f64,
	},
	/// ELLIPSE
	Ellipse {
		/// Centre point
		centre: Point,
		/// First conjugate diameter endpoint
		first_conjugate: Point,
		/// Second conjugate diameter endpoint
		second_conjugate: Point,
	},
	/// ELLIPTICAL ARC
	EllipticalArc {
		/// Centre point
		centre: Point,
		/// First conjugate diameter endpoint
		first_conjugate: Point,
		/// Second conjugate diameter endpoint
		second_conjugate: Point,
		/// Start direction vector
		start: Point,
		/// End direction vector
		end: Point,
	},
	/// POLYBEZIER
	Polybezier {
		/// Continuity indicator
		continuity: i32,
		/// Control points
		points: Vec<Point>,
	},
}

impl GraphicalPrimitive {
	/// Element id within class 4.
	pub fn element_id(&self) -> u8 {
		match self {
			GraphicalPrimitive::Polyline { .. } => 1,
			GraphicalPrimitive::DisjointPolyline { .. } => 2,
			GraphicalPrimitive::Text { .. } => 4,
			GraphicalPrimitive::RestrictedText { .. } => 5,
			GraphicalPrimitive::Polygon { .. } => 7,
			GraphicalPrimitive::Circle { .. } => 12,
			GraphicalPrimitive::CircularArcCentre { .. } => 15,
			GraphicalPrimitive::Ellipse { .. } => 17,
			GraphicalPrimitive::EllipticalArc { .. } => 18,
			GraphicalPrimitive::Polybezier { .. } => 26,
		}
	}

	/// Decodes a class 4 element, or `None` for an unsupported id.
	pub(crate) fn decode(
		element_id: u8,
		reader: &mut PrimitiveReader<'_>,
		ctx: &mut Context,
	) -> Result<Option<Self>, CgmError> {
		Ok(Some(match element_id {
			1 => GraphicalPrimitive::Polyline { points: reader.point_list(ctx)? },
			2 => GraphicalPrimitive::DisjointPolyline { points: reader.point_list(ctx)? },
			4 => GraphicalPrimitive::Text {
				position: reader.point(ctx)?,
				is_final: reader.enum_value()? != 0,
				text: reader.string()?,
			},
			5 => GraphicalPrimitive::RestrictedText {
				delta_width: reader.vdc(ctx)?,
				delta_height: reader.vdc(ctx)?,
				position: reader.point(ctx)?,
				is_final: reader.enum_value()? != 0,
				text: reader.string()?,
			},
			7 => GraphicalPrimitive::Polygon { points: reader.point_list(ctx)? },
			12 => GraphicalPrimitive::Circle {
				centre: reader.point(ctx)?,
				radius: reader.vdc(ctx)?,
			},
			15 => GraphicalPrimitive::CircularArcCentre {
				centre: reader.point(ctx)?,
				start: reader.point(ctx)?,
				end: reader.point(ctx)?,
				radius: reader.vdc(ctx)?,
			},
			17 => GraphicalPrimitive::Ellipse {
				centre: reader.point(ctx)?,
				first_conjugate: reader.point(ctx)?,
				second_conjugate: reader.point(ctx)?,
			},
			18 => GraphicalPrimitive::EllipticalArc {
				centre: reader.point(ctx)?,
				first_conjugate: reader.point(ctx)?,
				second_conjugate: reader.point(ctx)?,
				start: reader.point(ctx)?,
				end: reader.point(ctx)?,
			},
			26 => GraphicalPrimitive::Polybezier {
				continuity: reader.index(ctx)?,
				points: reader.point_list(ctx)?,
			},
			_ => return Ok(None),
		}))
	}

	/// Writes the element in clear text.
	pub(crate) fn write(&self, writer: &mut ClearTextWriter, ctx: &Context) {
		match self {
			GraphicalPrimitive::Polyline { points } => {
				write_point_sequence(writer, ctx, "  LINE", points);
			}
			GraphicalPrimitive::DisjointPolyline { points } => {
				write_point_sequence(writer, ctx, "  DISJTLINE", points);
			}
			GraphicalPrimitive::Text { position, is_final, text } => {
				writer.write(&format!(" TEXT {}", format::point(*position, ctx)));
				writer.write(if *is_final { " final" } else { " notfinal" });
				writer.write(&format!(" {}", format::quoted(text)));
				writer.write_line(";");
			}
			GraphicalPrimitive::RestrictedText {
				delta_width,
				delta_height,
				position,
				is_final,
				text,
			} => {
				writer.write(&format!(
					" RESTRTEXT {} {} {}",
					format::vdc(*delta_width, ctx),
					format::vdc(*delta_height, ctx),
					format::point(*position, ctx)
				));
				writer.write(if *is_final { " final" } else { " notfinal" });
				writer.write(&format!(" {}", format::quoted(text)));
				writer.write_line(";");
			}
			GraphicalPrimitive::Polygon { points } => {
				write_point_sequence(writer, ctx, "  POLYGON", points);
			}
			GraphicalPrimitive::Circle { centre, radius } => {
				writer.write_line(&format!(
					"  CIRCLE {} {};",
					format::point(*centre, ctx),
					format::vdc(*radius, ctx)
				));
			}
			GraphicalPrimitive::CircularArcCentre { centre, start, end, radius } => {
				writer.write_line(&format!(
					"  ARCCTR {} {} {} {} {} {};",
					format::point(*centre, ctx),
					format::vdc(start.x, ctx),
					format::vdc(start.y, ctx),
					format::vdc(end.x, ctx),
					format::vdc(end.y, ctx),
					format::vdc(*radius, ctx)
				));
			}
			GraphicalPrimitive::Ellipse { centre, first_conjugate, second_conjugate } => {
				writer.write_line(&format!(
					"  ELLIPSE {} {} {};",
					format::point(*centre, ctx),
					format::point(*first_conjugate, ctx),
					format::point(*second_conjugate, ctx)
				));
			}
			GraphicalPrimitive::EllipticalArc {
				centre,
				first_conjugate,
				second_conjugate,
				start,
				end,
			} => {
				writer.write_line(&format!(
					"  ELLIPARC {} {} {} {} {} {} {};",
					format::point(*centre, ctx),
					format::point(*first_conjugate, ctx),
					format::point(*second_conjugate, ctx),
					format::vdc(start.x, ctx),
					format::vdc(start.y, ctx),
					format::vdc(end.x, ctx),
					format::vdc(end.y, ctx)
				));
			}
			GraphicalPrimitive::Polybezier { continuity, points } => {
				writer.write(&format!("  POLYBEZIER {continuity}"));
				for point in points {
					writer.write(&format!(" {}", format::point(*point, ctx)));
				}
				writer.write_line(";");
			}
		}
	}
}

/// Writes `keyword point point … ;`, one token at a time so the soft wrap
/// can break between points.
fn write_point_sequence(
	writer: &mut ClearTextWriter,
	ctx: &Context,
	keyword: &str,
	points: &[Point],
) {
	writer.write(keyword);
	for point in points {
		writer.write(&format!(" {}", format::point(*point, ctx)));
	}
	writer.write_line(";");
}
