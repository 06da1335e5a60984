//! Typed primitive extraction from a command's argument buffer.
//!
//! The reader keeps a byte cursor plus a sub-byte bit cursor. Only packed
//! colour indices and packed colour components consume individual bits;
//! every byte-oriented read first discards a partial bit position. All
//! multi-byte values are big-endian.

use encoding_rs::WINDOWS_1252;

use crate::context::{
	ColourModel, ColourSelectionMode, Context, DeviceViewportMode, RealPrecisionKind,
	SpecificationMode, VdcType,
};
use crate::diagnostic::{Diagnostics, Severity};
use crate::error::CgmError;
use crate::values::{Colour, Point, SdrType, SdrValue, StructuredDataRecord, Vc};

/// Reader over one command's immutable argument buffer.
///
/// Failed reads leave the cursor where the failure occurred; the dispatch
/// layer records a fatal diagnostic and fast-forwards with
/// [`PrimitiveReader::skip_to_end`]. Recoverable oddities (unsupported
/// precisions, discarded trailing fragments) are collected on the reader
/// itself and drained by the dispatcher afterwards.
#[derive(Debug)]
pub(crate) struct PrimitiveReader<'a> {
	arguments: &'a [u8],
	byte: usize,
	bit: u32,
	element_class: u8,
	element_id: u8,
	label: &'static str,
	diagnostics: Diagnostics,
}

impl<'a> PrimitiveReader<'a> {
	pub(crate) fn new(
		arguments: &'a [u8],
		element_class: u8,
		element_id: u8,
		label: &'static str,
	) -> Self {
		Self {
			arguments,
			byte: 0,
			bit: 0,
			element_class,
			element_id,
			label,
			diagnostics: Diagnostics::new(),
		}
	}

	/// Returns `true` when the command carried no arguments.
	pub(crate) fn is_empty(&self) -> bool {
		self.arguments.is_empty()
	}

	/// Byte-aligned bytes left to read.
	pub(crate) fn remaining(&self) -> usize {
		let pos = self.byte + usize::from(self.bit != 0);
		self.arguments.len().saturating_sub(pos)
	}

	/// Bits left to read, counting a partially consumed byte.
	pub(crate) fn remaining_bits(&self) -> usize {
		let whole = self.arguments.len().saturating_sub(self.byte);
		(whole * 8).saturating_sub(self.bit as usize)
	}

	/// Fast-forwards the cursor past all remaining arguments.
	pub(crate) fn skip_to_end(&mut self) {
		self.byte = self.arguments.len();
		self.bit = 0;
	}

	/// Records an `unsupported` diagnostic against the current command.
	pub(crate) fn unsupported(&mut self, message: impl Into<String>) {
		self.diagnostics.push(
			Severity::Unsupported,
			self.element_class,
			self.element_id,
			self.label,
			message,
		);
	}

	/// Drains the diagnostics collected during reading.
	pub(crate) fn take_diagnostics(&mut self) -> Diagnostics {
		std::mem::take(&mut self.diagnostics)
	}

	fn skip_bits(&mut self) {
		if self.bit != 0 {
			self.bit = 0;
			self.byte += 1;
		}
	}

	fn exhausted(&self, needed: usize) -> CgmError {
		CgmError::ArgumentsExhausted {
			needed,
			offset: self.byte,
			len: self.arguments.len(),
		}
	}

	/// Re-aligns the cursor on a word boundary after sub-byte reads.
	pub(crate) fn align_word(&mut self) {
		if self.byte >= self.arguments.len() {
			return;
		}
		if self.byte % 2 == 0 && self.bit > 0 {
			self.bit = 0;
			self.byte += 2;
		} else if self.byte % 2 == 1 {
			self.bit = 0;
			self.byte += 1;
		}
	}

	fn take(&mut self, count: usize) -> Result<&'a [u8], CgmError> {
		self.skip_bits();
		if self.byte + count > self.arguments.len() {
			return Err(self.exhausted(self.byte + count - self.arguments.len()));
		}
		let slice = &self.arguments[self.byte..self.byte + count];
		self.byte += count;
		Ok(slice)
	}

	/// Reads one unsigned octet.
	pub(crate) fn byte(&mut self) -> Result<u8, CgmError> {
		Ok(self.take(1)?[0])
	}

	/// Reads a signed 8-bit integer.
	pub(crate) fn signed8(&mut self) -> Result<i32, CgmError> {
		Ok(i32::from(self.byte()? as i8))
	}

	/// Reads a signed big-endian 16-bit integer.
	pub(crate) fn signed16(&mut self) -> Result<i32, CgmError> {
		let bytes = self.take(2)?;
		Ok(i32::from(i16::from_be_bytes([bytes[0], bytes[1]])))
	}

	/// Reads a signed big-endian 24-bit integer, sign-extending from bit 23.
	pub(crate) fn signed24(&mut self) -> Result<i32, CgmError> {
		let bytes = self.take(3)?;
		let raw =
			(u32::from(bytes[0]) << 16) | (u32::from(bytes[1]) << 8) | u32::from(bytes[2]);
		let value = if raw & 0x80_0000 != 0 { raw | 0xFF00_0000 } else { raw };
		Ok(value as i32)
	}

	/// Reads a signed big-endian 32-bit integer.
	pub(crate) fn signed32(&mut self) -> Result<i32, CgmError> {
		let bytes = self.take(4)?;
		Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
	}

	fn u16be(&mut self) -> Result<u32, CgmError> {
		let bytes = self.take(2)?;
		Ok(u32::from(u16::from_be_bytes([bytes[0], bytes[1]])))
	}

	fn u24be(&mut self) -> Result<u32, CgmError> {
		let bytes = self.take(3)?;
		Ok((u32::from(bytes[0]) << 16) | (u32::from(bytes[1]) << 8) | u32::from(bytes[2]))
	}

	fn u32be(&mut self) -> Result<u32, CgmError> {
		let bytes = self.take(4)?;
		Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
	}

	fn uint_bits(&mut self, width: u32) -> Result<u32, CgmError> {
		if self.byte >= self.arguments.len() {
			return Err(self.exhausted(1));
		}
		// A width that no longer fits in the current byte starts a fresh one
		if self.bit + width > 8 {
			self.bit = 0;
			self.byte += 1;
			if self.byte >= self.arguments.len() {
				return Err(self.exhausted(1));
			}
		}

		let shift = 8 - width - self.bit;
		let mask = ((1u32 << width) - 1) << shift;
		let value = (u32::from(self.arguments[self.byte]) & mask) >> shift;

		self.bit += width;
		if self.bit == 8 {
			self.bit = 0;
			self.byte += 1;
		}
		Ok(value)
	}

	/// Reads an unsigned integer of the given bit width.
	///
	/// Widths 1, 2 and 4 pack MSB-first within a byte; wider values are
	/// whole-byte big-endian. An unusable width is reported and falls back
	/// to a single octet.
	pub(crate) fn uint(&mut self, precision: i32) -> Result<u32, CgmError> {
		match precision {
			1 | 2 | 4 => self.uint_bits(precision as u32),
			8 => self.byte().map(u32::from),
			16 => self.u16be(),
			24 => self.u24be(),
			32 => self.u32be(),
			other => {
				self.unsupported(format!("unsupported unsigned integer precision {other}"));
				self.byte().map(u32::from)
			}
		}
	}

	/// Reads a signed integer of the given bit width, falling back to 16
	/// bits (with a diagnostic) for unusable widths.
	pub(crate) fn int_at(&mut self, precision: i32) -> Result<i32, CgmError> {
		match precision {
			8 => self.signed8(),
			16 => self.signed16(),
			24 => self.signed24(),
			32 => self.signed32(),
			other => {
				self.unsupported(format!("unsupported integer precision {other}"));
				self.signed16()
			}
		}
	}

	/// Reads a signed integer at the context's integer precision.
	pub(crate) fn int(&mut self, ctx: &Context) -> Result<i32, CgmError> {
		self.int_at(ctx.integer_precision)
	}

	/// Reads a signed integer at the context's index precision.
	pub(crate) fn index(&mut self, ctx: &Context) -> Result<i32, CgmError> {
		self.int_at(ctx.index_precision)
	}

	/// Reads a signed integer at the context's name precision.
	pub(crate) fn name(&mut self, ctx: &Context) -> Result<i32, CgmError> {
		self.int_at(ctx.name_precision)
	}

	/// Reads an enumeration value (always a signed 16-bit integer).
	pub(crate) fn enum_value(&mut self) -> Result<i16, CgmError> {
		Ok(self.signed16()? as i16)
	}

	/// Reads a boolean encoded as an enumeration.
	pub(crate) fn boolean(&mut self) -> Result<bool, CgmError> {
		Ok(self.enum_value()? != 0)
	}

	fn string_length(&mut self) -> Result<usize, CgmError> {
		let first = self.byte()?;
		if first != 255 {
			return Ok(usize::from(first));
		}
		let word = self.u16be()?;
		if word & 0x8000 != 0 {
			// Low 15 bits are the upper half of a 31-bit length
			let low = self.u16be()?;
			Ok((((word & 0x7FFF) as usize) << 16) | low as usize)
		} else {
			Ok(word as usize)
		}
	}

	/// Reads a length-prefixed string; bytes are decoded as Windows-1252.
	pub(crate) fn string(&mut self) -> Result<String, CgmError> {
		let length = self.string_length()?;
		let bytes = self.take(length)?;
		let (text, _, _) = WINDOWS_1252.decode(bytes);
		Ok(text.into_owned())
	}

	fn fixed32(&mut self) -> Result<f64, CgmError> {
		let whole = self.signed16()?;
		let fraction = self.u16be()?;
		Ok(f64::from(whole) + f64::from(fraction) / f64::from(1u32 << 16))
	}

	fn fixed64(&mut self) -> Result<f64, CgmError> {
		let whole = self.signed32()?;
		let fraction = self.u32be()?;
		Ok(f64::from(whole) + f64::from(fraction) / 2f64.powi(32))
	}

	fn floating32(&mut self) -> Result<f64, CgmError> {
		let bytes = self.take(4)?;
		let value = f32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
		// Flush denormal noise that would otherwise print as -0.0000
		if f64::from(value).abs() < 1e-10 {
			return Ok(0.0);
		}
		Ok(f64::from(value))
	}

	fn floating64(&mut self) -> Result<f64, CgmError> {
		let bytes = self.take(8)?;
		Ok(f64::from_be_bytes([
			bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
		]))
	}

	fn real_at(&mut self, kind: RealPrecisionKind) -> Result<f64, CgmError> {
		match kind {
			RealPrecisionKind::Fixed32 => self.fixed32(),
			RealPrecisionKind::Fixed64 => self.fixed64(),
			RealPrecisionKind::Floating32 => self.floating32(),
			RealPrecisionKind::Floating64 => self.floating64(),
		}
	}

	/// Reads a real at the context's real precision.
	pub(crate) fn real(&mut self, ctx: &Context) -> Result<f64, CgmError> {
		self.real_at(ctx.real_precision)
	}

	/// Reads a floating-point value even under a fixed real precision.
	///
	/// The binary encoding fixes a handful of parameters (such as the
	/// metric scaling factor) as floating point regardless of REAL
	/// PRECISION.
	pub(crate) fn floating(&mut self, ctx: &Context) -> Result<f64, CgmError> {
		match ctx.real_precision {
			RealPrecisionKind::Floating32 | RealPrecisionKind::Floating64 => self.real(ctx),
			RealPrecisionKind::Fixed32 | RealPrecisionKind::Fixed64 => self.floating32(),
		}
	}

	/// Reads a VDC value under the current VDC type and precision.
	pub(crate) fn vdc(&mut self, ctx: &Context) -> Result<f64, CgmError> {
		match ctx.vdc_type {
			VdcType::Real => self.real_at(ctx.vdc_real_precision),
			VdcType::Integer => match ctx.vdc_integer_precision {
				16 => self.signed16().map(f64::from),
				24 => self.signed24().map(f64::from),
				32 => self.signed32().map(f64::from),
				other => {
					self.unsupported(format!("unsupported VDC integer precision {other}"));
					self.signed16().map(f64::from)
				}
			},
		}
	}

	/// Reads a point (two VDC values).
	pub(crate) fn point(&mut self, ctx: &Context) -> Result<Point, CgmError> {
		Ok(Point { x: self.vdc(ctx)?, y: self.vdc(ctx)? })
	}

	/// Greedily reads points from the remaining aligned argument bytes.
	///
	/// A trailing fragment shorter than one point is discarded with an
	/// `unsupported` diagnostic; this is the only behaviour that works
	/// under long-form partitioning, where the frame length is not known
	/// when the element is dispatched.
	pub(crate) fn point_list(&mut self, ctx: &Context) -> Result<Vec<Point>, CgmError> {
		self.skip_bits();
		let size = 2 * ctx.vdc_byte_size();
		let available = self.remaining();
		let count = available / size;
		let fragment = available % size;

		let mut points = Vec::with_capacity(count);
		for _ in 0..count {
			points.push(self.point(ctx)?);
		}
		if fragment > 0 {
			self.unsupported(format!(
				"discarded {fragment} trailing byte(s) shorter than one point"
			));
			self.skip_to_end();
		}
		Ok(points)
	}

	/// Reads a colour index, optionally at a command-local precision.
	pub(crate) fn colour_index(
		&mut self,
		ctx: &Context,
		local_precision: Option<i32>,
	) -> Result<u32, CgmError> {
		self.uint(local_precision.unwrap_or(ctx.colour_index_precision))
	}

	/// Reads a direct colour and scales it to the 8-bit display range.
	///
	/// CMYK is converted to RGB on the 0–255 scale; models without a
	/// conversion are read for size and yield the cyan sentinel.
	pub(crate) fn direct_colour(&mut self, ctx: &Context) -> Result<(u8, u8, u8), CgmError> {
		let precision = ctx.colour_precision;
		match ctx.colour_model {
			ColourModel::Rgb => {
				let r = self.uint(precision)?;
				let g = self.uint(precision)?;
				let b = self.uint(precision)?;
				Ok(scale_rgb(
					[r, g, b],
					ctx.colour_value_extent_min,
					ctx.colour_value_extent_max,
				))
			}
			ColourModel::Cmyk => {
				let c = f64::from(self.uint(precision)?);
				let m = f64::from(self.uint(precision)?);
				let y = f64::from(self.uint(precision)?);
				let k = f64::from(self.uint(precision)?);
				let component = |v: f64| {
					(255.0 * (1.0 - v / 255.0) * (1.0 - k / 255.0)).clamp(0.0, 255.0) as u8
				};
				Ok((component(c), component(m), component(y)))
			}
			model => {
				self.unsupported(format!("unsupported colour model {model:?}"));
				self.uint(precision)?;
				self.uint(precision)?;
				self.uint(precision)?;
				Ok((0, 255, 255))
			}
		}
	}

	/// Reads a colour under the current selection mode.
	pub(crate) fn colour(
		&mut self,
		ctx: &Context,
		local_precision: Option<i32>,
	) -> Result<Colour, CgmError> {
		match ctx.colour_selection_mode {
			ColourSelectionMode::Direct => {
				let (r, g, b) = self.direct_colour(ctx)?;
				Ok(Colour::Direct { r, g, b })
			}
			ColourSelectionMode::Indexed => {
				Ok(Colour::Indexed(self.colour_index(ctx, local_precision)?))
			}
		}
	}

	/// Reads a viewport coordinate under the device viewport mode.
	pub(crate) fn vc(&mut self, ctx: &Context) -> Result<Vc, CgmError> {
		match ctx.device_viewport_mode {
			DeviceViewportMode::Millimetres | DeviceViewportMode::PhysicalDeviceCoordinates => {
				Ok(Vc::Integer(self.int(ctx)?))
			}
			DeviceViewportMode::Fraction => Ok(Vc::Real(self.real(ctx)?)),
		}
	}

	/// Reads a width or size under the given specification mode.
	pub(crate) fn size_specification(
		&mut self,
		ctx: &Context,
		mode: SpecificationMode,
	) -> Result<f64, CgmError> {
		match mode {
			SpecificationMode::Absolute => self.vdc(ctx),
			SpecificationMode::Scaled => self.real(ctx),
		}
	}

	/// Reads a length-prefixed structured data record; nested records
	/// recurse.
	pub(crate) fn sdr(&mut self, ctx: &Context) -> Result<StructuredDataRecord, CgmError> {
		let length = self.string_length()?;
		let mut record = StructuredDataRecord::new();
		let end = self.byte + length;

		while self.byte < end {
			let type_index = self.index(ctx)?;
			let kind = SdrType::from_index(type_index).ok_or_else(|| {
				CgmError::Unimplemented(format!("SDR data type {type_index}"))
			})?;
			let count = self.int(ctx)?;

			let mut values = Vec::new();
			for _ in 0..count {
				values.push(self.sdr_value(ctx, kind)?);
			}
			record.add(kind, count, values);
		}
		Ok(record)
	}

	fn sdr_value(&mut self, ctx: &Context, kind: SdrType) -> Result<SdrValue, CgmError> {
		Ok(match kind {
			SdrType::Record => SdrValue::Record(self.sdr(ctx)?),
			SdrType::ColourIndex => SdrValue::ColourIndex(self.colour_index(ctx, None)?),
			SdrType::DirectColour => {
				let (r, g, b) = self.direct_colour(ctx)?;
				SdrValue::Colour { r, g, b }
			}
			SdrType::Name => SdrValue::Name(self.name(ctx)?),
			SdrType::Enumerated => SdrValue::Enumerated(self.enum_value()?),
			SdrType::Integer => SdrValue::Integer(self.int(ctx)?),
			SdrType::Int8 => SdrValue::Integer(self.signed8()?),
			SdrType::Int16 => SdrValue::Integer(self.signed16()?),
			SdrType::Int32 => SdrValue::Integer(self.signed32()?),
			SdrType::Index => SdrValue::Index(self.index(ctx)?),
			SdrType::Real => SdrValue::Real(self.real(ctx)?),
			SdrType::String | SdrType::StringFixed => SdrValue::Text(self.string()?),
			SdrType::ViewportCoordinate => SdrValue::Viewport(self.vc(ctx)?),
			SdrType::Vdc => SdrValue::Vdc(self.vdc(ctx)?),
			SdrType::Unsigned8 => SdrValue::Unsigned(u32::from(self.byte()?)),
			SdrType::Unsigned16 => SdrValue::Unsigned(self.u16be()?),
			SdrType::Unsigned32 => SdrValue::Unsigned(self.u32be()?),
			SdrType::Reserved
			| SdrType::ColourComponent
			| SdrType::BitStream
			| SdrType::ColourList => {
				return Err(CgmError::Unimplemented(format!("SDR data type {kind:?}")));
			}
		})
	}
}

/// Clamps raw components into the declared extent and scales to 0–255.
fn scale_rgb(raw: [u32; 3], min: [u32; 3], max: [u32; 3]) -> (u8, u8, u8) {
	let scale = |value: u32, lo: u32, hi: u32| -> u8 {
		if lo >= hi {
			return 0;
		}
		let clamped = value.clamp(lo, hi);
		(255 * u64::from(clamped - lo) / u64::from(hi - lo)) as u8
	};
	(
		scale(raw[0], min[0], max[0]),
		scale(raw[1], min[1], max[1]),
		scale(raw[2], min[2], max[2]),
	)
}
