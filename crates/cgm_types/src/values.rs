//! Value types carried by decoded commands.

use std::fmt::{self, Display, Formatter};

/// A 2D point in virtual device coordinates.
///
/// Integer VDCs are widened to `f64` at read time; the clear-text writer
/// narrows them back based on the VDC type in effect when the point is
/// emitted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
	/// Horizontal coordinate
	pub x: f64,
	/// Vertical coordinate
	pub y: f64,
}

impl Point {
	/// Creates a point from its coordinates.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Compares two points at the four-decimal-place resolution of the
	/// clear-text encoding.
	pub fn approx_eq(&self, other: &Point) -> bool {
		(self.x - other.x).abs() < 0.0004 && (self.y - other.y).abs() < 0.0004
	}
}

impl Display for Point {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {})", self.x, self.y)
	}
}

/// A colour, either a table index or scaled direct components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
	/// Index into the colour table
	Indexed(u32),
	/// Direct colour scaled to the 8-bit display range
	Direct {
		/// Red component
		r: u8,
		/// Green component
		g: u8,
		/// Blue component
		b: u8,
	},
}

impl Display for Colour {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Colour::Indexed(index) => write!(f, "index {index}"),
			Colour::Direct { r, g, b } => write!(f, "rgb({r}, {g}, {b})"),
		}
	}
}

/// A viewport coordinate, integer or real depending on the device viewport
/// specification mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Vc {
	/// Millimetre or physical-device-coordinate value
	Integer(i32),
	/// Fraction-of-viewport value
	Real(f64),
}

/// A viewport point built from two viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportPoint {
	/// First coordinate
	pub first: Vc,
	/// Second coordinate
	pub second: Vc,
}

/// Type codes of structured-data-record members.
///
/// The numbering follows the single canonical enumeration of ISO 8632-3
/// (annex C); producers that used the historical zero-based table are not
/// supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum SdrType {
	/// Nested structured data record
	Record = 1,
	/// Colour index
	ColourIndex = 2,
	/// Direct colour
	DirectColour = 3,
	/// Name
	Name = 4,
	/// Enumerated value
	Enumerated = 5,
	/// Integer at the current integer precision
	Integer = 6,
	/// Reserved
	Reserved = 7,
	/// Signed 8-bit integer
	Int8 = 8,
	/// Signed 16-bit integer
	Int16 = 9,
	/// Signed 32-bit integer
	Int32 = 10,
	/// Index at the current index precision
	Index = 11,
	/// Real at the current real precision
	Real = 12,
	/// String
	String = 13,
	/// Fixed string
	StringFixed = 14,
	/// Viewport coordinate
	ViewportCoordinate = 15,
	/// VDC value
	Vdc = 16,
	/// Colour component
	ColourComponent = 17,
	/// Unsigned 8-bit integer
	Unsigned8 = 18,
	/// Unsigned 32-bit integer
	Unsigned32 = 19,
	/// Bit stream
	BitStream = 20,
	/// Colour list
	ColourList = 21,
	/// Unsigned 16-bit integer
	Unsigned16 = 22,
}

impl SdrType {
	/// Maps a wire type-index to its member type.
	pub fn from_index(index: i32) -> Option<Self> {
		Some(match index {
			1 => SdrType::Record,
			2 => SdrType::ColourIndex,
			3 => SdrType::DirectColour,
			4 => SdrType::Name,
			5 => SdrType::Enumerated,
			6 => SdrType::Integer,
			7 => SdrType::Reserved,
			8 => SdrType::Int8,
			9 => SdrType::Int16,
			10 => SdrType::Int32,
			11 => SdrType::Index,
			12 => SdrType::Real,
			13 => SdrType::String,
			14 => SdrType::StringFixed,
			15 => SdrType::ViewportCoordinate,
			16 => SdrType::Vdc,
			17 => SdrType::ColourComponent,
			18 => SdrType::Unsigned8,
			19 => SdrType::Unsigned32,
			20 => SdrType::BitStream,
			21 => SdrType::ColourList,
			22 => SdrType::Unsigned16,
			_ => return None,
		})
	}
}

/// One value inside a structured-data-record member.
#[derive(Debug, Clone, PartialEq)]
pub enum SdrValue {
	/// Nested record
	Record(StructuredDataRecord),
	/// Colour table index
	ColourIndex(u32),
	/// Direct colour scaled to the display range
	Colour {
		/// Red component
		r: u8,
		/// Green component
		g: u8,
		/// Blue component
		b: u8,
	},
	/// Name value
	Name(i32),
	/// Enumerated value
	Enumerated(i16),
	/// Signed integer
	Integer(i32),
	/// Index value
	Index(i32),
	/// Real value
	Real(f64),
	/// Text value
	Text(String),
	/// Viewport coordinate
	Viewport(Vc),
	/// VDC value
	Vdc(f64),
	/// Unsigned integer
	Unsigned(u32),
}

impl Display for SdrValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			SdrValue::Record(record) => write!(f, "({record})"),
			SdrValue::ColourIndex(index) => write!(f, "{index}"),
			SdrValue::Colour { r, g, b } => write!(f, "{r} {g} {b}"),
			SdrValue::Name(value) | SdrValue::Integer(value) | SdrValue::Index(value) => {
				write!(f, "{value}")
			}
			SdrValue::Enumerated(value) => write!(f, "{value}"),
			SdrValue::Real(value) | SdrValue::Vdc(value) => write!(f, "{value:.4}"),
			SdrValue::Text(text) => write!(f, "'{text}'"),
			SdrValue::Viewport(Vc::Integer(value)) => write!(f, "{value}"),
			SdrValue::Viewport(Vc::Real(value)) => write!(f, "{value:.4}"),
			SdrValue::Unsigned(value) => write!(f, "{value}"),
		}
	}
}

/// One member of a structured data record.
#[derive(Debug, Clone, PartialEq)]
pub struct SdrMember {
	/// Declared member type
	pub kind: SdrType,
	/// Declared value count
	pub count: i32,
	/// Decoded values
	pub values: Vec<SdrValue>,
}

/// A structured data record: an ordered list of self-describing members.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructuredDataRecord {
	/// Members in wire order
	pub members: Vec<SdrMember>,
}

impl StructuredDataRecord {
	/// Creates an empty record.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a member.
	pub fn add(&mut self, kind: SdrType, count: i32, values: Vec<SdrValue>) {
		self.members.push(SdrMember { kind, count, values });
	}
}

impl Display for StructuredDataRecord {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let mut first = true;
		for member in &self.members {
			for value in &member.values {
				if !first {
					write!(f, " ")?;
				}
				write!(f, "{value}")?;
				first = false;
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_point_approx_eq() {
		let a = Point::new(10.5, 20.3);
		let b = Point::new(10.50009, 20.29995);
		let c = Point::new(10.501, 20.3);

		assert!(a.approx_eq(&b));
		assert!(!a.approx_eq(&c));
	}

	#[test]
	fn test_sdr_type_round_trip() {
		for index in 1..=22 {
			let kind = SdrType::from_index(index).unwrap();
			assert_eq!(kind as i32, index);
		}
		assert_eq!(SdrType::from_index(0), None);
		assert_eq!(SdrType::from_index(23), None);
	}

	#[test]
	fn test_sdr_display() {
		let mut record = StructuredDataRecord::new();
		record.add(SdrType::Integer, 2, vec![SdrValue::Integer(3), SdrValue::Integer(-1)]);
		record.add(SdrType::String, 1, vec![SdrValue::Text("abc".into())]);

		assert_eq!(record.to_string(), "3 -1 'abc'");
	}
}
