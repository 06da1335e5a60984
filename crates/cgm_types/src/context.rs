//! Decoding context shared by the binary reader and the clear-text writer.
//!
//! The meaning, size and numeric interpretation of almost every field in a
//! binary CGM stream depends on metafile- and picture-descriptor elements
//! that appeared earlier in the same stream. A [`Context`] value carries
//! that state: every primitive read consults it, and descriptor decoders
//! mutate it after their own arguments have been extracted.

use std::fmt::{self, Display, Formatter};

/// Representation of real numbers in the binary encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RealPrecisionKind {
	/// 16-bit whole part + 16-bit fraction
	Fixed32,
	/// 32-bit whole part + 32-bit fraction
	Fixed64,
	/// IEEE-754 binary32
	Floating32,
	/// IEEE-754 binary64
	Floating64,
}

impl RealPrecisionKind {
	/// Size of one encoded value in bytes.
	pub fn byte_size(self) -> usize {
		match self {
			RealPrecisionKind::Fixed32 | RealPrecisionKind::Floating32 => 4,
			RealPrecisionKind::Fixed64 | RealPrecisionKind::Floating64 => 8,
		}
	}
}

/// Whether VDC values are encoded as integers or reals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VdcType {
	/// Signed integers at the VDC integer precision
	Integer,
	/// Reals at the VDC real precision
	Real,
}

impl Display for VdcType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			VdcType::Integer => write!(f, "integer"),
			VdcType::Real => write!(f, "real"),
		}
	}
}

/// Colour model declared by the metafile descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColourModel {
	/// Red, green, blue components
	Rgb,
	/// CIE L*a*b*
	Cielab,
	/// CIE L*u*v*
	Cieluv,
	/// Cyan, magenta, yellow, black components
	Cmyk,
	/// RGB-related (profile-defined)
	RgbRelated,
}

/// Whether colours select a table index or carry direct components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColourSelectionMode {
	/// Colour table indices
	Indexed,
	/// Direct component values
	Direct,
}

impl Display for ColourSelectionMode {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ColourSelectionMode::Indexed => write!(f, "indexed"),
			ColourSelectionMode::Direct => write!(f, "direct"),
		}
	}
}

/// Absolute-VDC versus scaled interpretation of a width or size quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecificationMode {
	/// Value is a VDC quantity
	Absolute,
	/// Value is an abstract real factor
	Scaled,
}

impl Display for SpecificationMode {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			SpecificationMode::Absolute => write!(f, "abs"),
			SpecificationMode::Scaled => write!(f, "scaled"),
		}
	}
}

/// Interpretation of device viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceViewportMode {
	/// Fraction of the default device viewport
	Fraction,
	/// Millimetres times the scale factor
	Millimetres,
	/// Physical device coordinates
	PhysicalDeviceCoordinates,
}

/// The six restricted-text variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestrictedTextKind {
	/// Basic
	Basic,
	/// Boxed-cap
	BoxedCap,
	/// Boxed-all
	BoxedAll,
	/// Isotropic-cap
	IsotropicCap,
	/// Isotropic-all
	IsotropicAll,
	/// Justified
	Justified,
}

impl Display for RestrictedTextKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			RestrictedTextKind::Basic => write!(f, "basic"),
			RestrictedTextKind::BoxedCap => write!(f, "boxedcap"),
			RestrictedTextKind::BoxedAll => write!(f, "boxedall"),
			RestrictedTextKind::IsotropicCap => write!(f, "isotropiccap"),
			RestrictedTextKind::IsotropicAll => write!(f, "isotropicall"),
			RestrictedTextKind::Justified => write!(f, "justified"),
		}
	}
}

/// Mutable decoding/encoding state threaded through the whole pipeline.
///
/// Created once per metafile, reset at every BEGIN METAFILE. Precision
/// fields hold whatever the stream declared; the primitive reader is the
/// component that rejects unusable widths (with a diagnostic and the
/// documented 16-bit fallback), so conflicting declarations are accepted
/// here in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
	/// Bit width of integers (8, 16, 24 or 32)
	pub integer_precision: i32,
	/// Bit width of indices
	pub index_precision: i32,
	/// Bit width of names
	pub name_precision: i32,
	/// Bit width of direct-colour components
	pub colour_precision: i32,
	/// Bit width of colour indices (sub-byte widths 1/2/4 allowed)
	pub colour_index_precision: i32,
	/// Representation of reals
	pub real_precision: RealPrecisionKind,
	/// Integer or real VDC values
	pub vdc_type: VdcType,
	/// Bit width of integer VDCs (16, 24 or 32)
	pub vdc_integer_precision: i32,
	/// Representation of real VDCs
	pub vdc_real_precision: RealPrecisionKind,
	/// Declared colour model
	pub colour_model: ColourModel,
	/// Indexed or direct colour selection
	pub colour_selection_mode: ColourSelectionMode,
	/// Minimum component values used to scale direct colours
	pub colour_value_extent_min: [u32; 3],
	/// Maximum component values used to scale direct colours
	pub colour_value_extent_max: [u32; 3],
	/// Interpretation of line widths
	pub line_width_mode: SpecificationMode,
	/// Interpretation of marker sizes
	pub marker_size_mode: SpecificationMode,
	/// Interpretation of edge widths
	pub edge_width_mode: SpecificationMode,
	/// Interpretation of interior-style sizes
	pub interior_style_mode: SpecificationMode,
	/// Interpretation of device viewport coordinates
	pub device_viewport_mode: DeviceViewportMode,
	/// Declared restricted-text variant
	pub restricted_text_type: RestrictedTextKind,
}

impl Default for Context {
	fn default() -> Self {
		Self {
			integer_precision: 16,
			index_precision: 16,
			name_precision: 16,
			colour_precision: 8,
			colour_index_precision: 8,
			real_precision: RealPrecisionKind::Fixed32,
			vdc_type: VdcType::Integer,
			vdc_integer_precision: 16,
			vdc_real_precision: RealPrecisionKind::Fixed32,
			colour_model: ColourModel::Rgb,
			colour_selection_mode: ColourSelectionMode::Indexed,
			colour_value_extent_min: [0, 0, 0],
			colour_value_extent_max: [255, 255, 255],
			line_width_mode: SpecificationMode::Absolute,
			marker_size_mode: SpecificationMode::Absolute,
			edge_width_mode: SpecificationMode::Absolute,
			interior_style_mode: SpecificationMode::Absolute,
			device_viewport_mode: DeviceViewportMode::Fraction,
			restricted_text_type: RestrictedTextKind::Basic,
		}
	}
}

impl Context {
	/// Creates a context holding the ISO metafile defaults.
	pub fn new() -> Self {
		Self::default()
	}

	/// Restores every field to its metafile default.
	pub fn reset(&mut self) {
		*self = Self::default();
	}

	/// Size in bytes of one encoded VDC value under the current settings.
	pub fn vdc_byte_size(&self) -> usize {
		match self.vdc_type {
			VdcType::Integer => (self.vdc_integer_precision.max(8) as usize) / 8,
			VdcType::Real => self.vdc_real_precision.byte_size(),
		}
	}
}
