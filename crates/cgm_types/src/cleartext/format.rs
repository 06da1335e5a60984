//! Token formatting for the clear-text encoding.

use crate::context::{Context, SpecificationMode, VdcType};
use crate::values::Point;

/// Formats a real with the four decimal places the clear-text encoding uses.
pub(crate) fn real(value: f64) -> String {
	format!("{value:.4}")
}

/// Formats a VDC value: decimal integer under integer VDCs, four-decimal
/// fixed notation under real VDCs.
pub(crate) fn vdc(value: f64, ctx: &Context) -> String {
	match ctx.vdc_type {
		VdcType::Real => real(value),
		VdcType::Integer => format!("{}", value as i64),
	}
}

/// Formats a point as `(x,y)`.
///
/// When `y` formats to exactly zero and `x` is negative, an explicit minus
/// is inserted on the `y` field so consumers that parse signed zero keep
/// the sign information of the pair.
pub(crate) fn point(p: Point, ctx: &Context) -> String {
	let x = vdc(p.x, ctx);
	let y = vdc(p.y, ctx);
	let sign = if y == vdc(0.0, ctx) && p.x < 0.0 { "-" } else { "" };
	format!("({x},{sign}{y})")
}

/// Formats a width or size under its specification mode: a VDC quantity
/// when absolute, an abstract real factor when scaled.
pub(crate) fn size(value: f64, ctx: &Context, mode: SpecificationMode) -> String {
	match mode {
		SpecificationMode::Absolute => vdc(value, ctx),
		SpecificationMode::Scaled => real(value),
	}
}

/// Quotes a string, dropping everything outside 0x20–0x7E except TAB, CR
/// and LF.
pub(crate) fn quoted(text: &str) -> String {
	let filtered: String = text
		.chars()
		.filter(|&c| ('\u{20}'..='\u{7E}').contains(&c) || matches!(c, '\t' | '\r' | '\n'))
		.collect();
	format!("'{filtered}'")
}

/// Quotes a string without the sanitisation pass (structured data records
/// are passed through for downstream consumers to interpret).
pub(crate) fn quoted_raw(text: &str) -> String {
	format!("'{text}'")
}

/// Formats a boolean as the `on`/`off` keyword pair.
pub(crate) fn on_off(value: bool) -> &'static str {
	if value { "on" } else { "off" }
}

/// Two's-complement value range of a signed integer of `bits` width.
pub(crate) fn signed_range(bits: i32) -> (i64, i64) {
	let bits = bits.clamp(1, 63) as u32;
	(-(1i64 << (bits - 1)), (1i64 << (bits - 1)) - 1)
}

/// Largest unsigned value of `bits` width.
pub(crate) fn unsigned_max(bits: i32) -> u64 {
	let bits = bits.clamp(1, 63) as u32;
	(1u64 << bits) - 1
}
