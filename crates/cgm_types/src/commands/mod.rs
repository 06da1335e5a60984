//! Decoded CGM commands.
//!
//! [`Command`] is a two-level tagged union: one variant per element class,
//! each wrapping an enum with one variant per supported element. Every
//! class module owns its binary decode routine and its clear-text write
//! routine, so the wire knowledge for an element lives in one place.
//!
//! Element numbering follows ISO/IEC 8632-3: notably VDC TYPE is class 1
//! element 3, the VDC precisions are class 3 elements 1 and 2, COLOUR
//! SELECTION MODE is class 2 element 2, and MESSAGE is class 7 element 1.

pub mod attribute;
pub mod control;
pub mod delimiter;
pub mod descriptor;
pub mod external;
pub mod picture;
pub mod primitive;

pub use attribute::Attribute;
pub use control::Control;
pub use delimiter::Delimiter;
pub use descriptor::MetafileDescriptor;
pub use external::{ApplicationStructureDescriptor, External};
pub use picture::PictureDescriptor;
pub use primitive::GraphicalPrimitive;

/// A decoded CGM command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
	/// Class 0 delimiter elements
	Delimiter(Delimiter),
	/// Class 1 metafile descriptor elements
	MetafileDescriptor(MetafileDescriptor),
	/// Class 2 picture descriptor elements
	PictureDescriptor(PictureDescriptor),
	/// Class 3 control elements
	Control(Control),
	/// Class 4 graphical primitive elements
	GraphicalPrimitive(GraphicalPrimitive),
	/// Class 5 attribute elements
	Attribute(Attribute),
	/// Class 7 external elements
	External(External),
	/// Class 9 application structure descriptor elements
	ApplicationStructure(ApplicationStructureDescriptor),
	/// Any (class, id) pair without a decoder; emitted as a comment
	Unknown(UnknownCommand),
}

impl Command {
	/// The `(class, id)` pair this command was framed with.
	pub fn element(&self) -> (u8, u8) {
		match self {
			Command::Delimiter(inner) => (0, inner.element_id()),
			Command::MetafileDescriptor(inner) => (1, inner.element_id()),
			Command::PictureDescriptor(inner) => (2, inner.element_id()),
			Command::Control(inner) => (3, inner.element_id()),
			Command::GraphicalPrimitive(inner) => (4, inner.element_id()),
			Command::Attribute(inner) => (5, inner.element_id()),
			Command::External(inner) => (7, inner.element_id()),
			Command::ApplicationStructure(inner) => (9, inner.element_id()),
			Command::Unknown(inner) => (inner.element_class, inner.element_id),
		}
	}
}

/// Placeholder retaining the raw bytes of an undecoded command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand {
	/// Element class from the frame header
	pub element_class: u8,
	/// Element id from the frame header
	pub element_id: u8,
	/// Unparsed argument bytes
	pub raw: Vec<u8>,
}

impl UnknownCommand {
	/// Bytes of the raw dump included in the emitted comment.
	const DUMP_LIMIT: usize = 16;

	/// Renders the command as a clear-text comment.
	pub fn comment(&self) -> String {
		let mut text = format!(
			"% Unknown command: Class={}, ID={}",
			self.element_class, self.element_id
		);
		if !self.raw.is_empty() {
			let dump = hex::encode_upper(&self.raw[..self.raw.len().min(Self::DUMP_LIMIT)]);
			text.push_str(&format!(", {} bytes 0x{dump}", self.raw.len()));
			if self.raw.len() > Self::DUMP_LIMIT {
				text.push_str("..");
			}
		}
		text.push_str(" %");
		text
	}
}

/// Clear-text keyword of a `(class, id)` pair, used to label diagnostics.
pub fn element_name(element_class: u8, element_id: u8) -> &'static str {
	match (element_class, element_id) {
		(0, 0) => "no-op",
		(0, 1) => "BEGMF",
		(0, 2) => "ENDMF",
		(0, 3) => "BEGPIC",
		(0, 4) => "BEGPICBODY",
		(0, 5) => "ENDPIC",
		(0, 8) => "BEGFIG",
		(0, 9) => "ENDFIG",
		(0, 21) => "BEGAPS",
		(0, 22) => "BEGAPSBODY",
		(0, 23) => "ENDAPS",
		(1, 1) => "mfversion",
		(1, 2) => "mfdesc",
		(1, 3) => "vdctype",
		(1, 4) => "integerprec",
		(1, 5) => "realprec",
		(1, 6) => "indexprec",
		(1, 7) => "colrprec",
		(1, 8) => "colrindexprec",
		(1, 9) => "maxcolrindex",
		(1, 10) => "colrvalueext",
		(1, 11) => "mfelemlist",
		(1, 13) => "fontlist",
		(1, 14) => "charsetlist",
		(1, 15) => "charcoding",
		(1, 17) => "maxvdcext",
		(1, 21) => "fontprop",
		(2, 1) => "scalemode",
		(2, 2) => "colrmode",
		(2, 3) => "linewidthmode",
		(2, 4) => "markersizemode",
		(2, 5) => "edgewidthmode",
		(2, 6) => "vdcext",
		(2, 7) => "backcolr",
		(2, 17) => "lineedgetypedef",
		(3, 1) => "vdcintegerprec",
		(3, 2) => "vdcrealprec",
		(3, 4) => "transparency",
		(3, 6) => "clip",
		(3, 19) => "linetypecont",
		(4, 1) => "LINE",
		(4, 2) => "DISJTLINE",
		(4, 4) => "TEXT",
		(4, 5) => "RESTRTEXT",
		(4, 7) => "POLYGON",
		(4, 12) => "CIRCLE",
		(4, 15) => "ARCCTR",
		(4, 17) => "ELLIPSE",
		(4, 18) => "ELLIPARC",
		(4, 26) => "POLYBEZIER",
		(5, 2) => "linetype",
		(5, 3) => "linewidth",
		(5, 4) => "linecolr",
		(5, 10) => "textfontindex",
		(5, 12) => "charexpan",
		(5, 14) => "textcolr",
		(5, 15) => "charheight",
		(5, 16) => "charori",
		(5, 18) => "textalign",
		(5, 19) => "charsetindex",
		(5, 20) => "altcharsetindex",
		(5, 22) => "intstyle",
		(5, 23) => "fillcolr",
		(5, 27) => "edgetype",
		(5, 28) => "edgewidth",
		(5, 29) => "edgecolr",
		(5, 30) => "edgevis",
		(5, 34) => "colrtable",
		(5, 37) => "linecap",
		(5, 38) => "linejoin",
		(5, 42) => "restrtexttype",
		(5, 44) => "edgecap",
		(5, 45) => "edgejoin",
		(5, 46) => "geopatdef",
		(7, 1) => "MESSAGE",
		(9, 1) => "APSATTR",
		_ => "unknown",
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_unknown_comment_without_arguments() {
		let cmd = UnknownCommand { element_class: 6, element_id: 1, raw: Vec::new() };
		assert_eq!(cmd.comment(), "% Unknown command: Class=6, ID=1 %");
	}

	#[test]
	fn test_unknown_comment_caps_hex_dump() {
		let cmd = UnknownCommand { element_class: 8, element_id: 2, raw: vec![0xAB; 20] };
		let comment = cmd.comment();
		assert!(comment.starts_with("% Unknown command: Class=8, ID=2, 20 bytes 0x"));
		assert!(comment.contains("ABABAB"));
		assert!(comment.ends_with(".. %"));
	}

	#[test]
	fn test_element_name_table() {
		assert_eq!(element_name(0, 1), "BEGMF");
		assert_eq!(element_name(1, 3), "vdctype");
		assert_eq!(element_name(3, 1), "vdcintegerprec");
		assert_eq!(element_name(4, 1), "LINE");
		assert_eq!(element_name(7, 1), "MESSAGE");
		assert_eq!(element_name(6, 1), "unknown");
	}
}
