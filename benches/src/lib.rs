//! Benchmark helper utilities for `cgm-rs`.
//!
//! Provides builders for synthetic binary CGM streams so the decode and
//! emit benchmarks run against predictable, self-contained workloads
//! instead of checked-in sample files.

/// Appends one short-form command to `out`.
///
/// Panics when `args` exceeds the 30-byte short-form limit.
pub fn push_command(out: &mut Vec<u8>, class: u8, id: u8, args: &[u8]) {
	assert!(args.len() <= 30, "short form carries at most 30 argument bytes");
	let header = (u16::from(class) << 12) | (u16::from(id) << 5) | args.len() as u16;
	out.extend_from_slice(&header.to_be_bytes());
	out.extend_from_slice(args);
	if args.len() % 2 == 1 {
		out.push(0);
	}
}

/// Appends one long-form command split into `partition_size`-byte chunks.
pub fn push_long_command(
	out: &mut Vec<u8>,
	class: u8,
	id: u8,
	args: &[u8],
	partition_size: usize,
) {
	let header = (u16::from(class) << 12) | (u16::from(id) << 5) | 31;
	out.extend_from_slice(&header.to_be_bytes());

	let mut chunks = args.chunks(partition_size.max(1)).peekable();
	while let Some(chunk) = chunks.next() {
		let mut word = chunk.len() as u16;
		if chunks.peek().is_some() {
			word |= 1 << 15;
		}
		out.extend_from_slice(&word.to_be_bytes());
		out.extend_from_slice(chunk);
		if chunk.len() % 2 == 1 {
			out.push(0);
		}
	}
}

/// Builds a metafile with `pictures` pictures of `lines` polylines each.
///
/// Every polyline carries `points` vertices under the default integer-16
/// VDCs, which makes the stream size easy to reason about when setting
/// throughput units.
pub fn generate_polyline_stream(pictures: usize, lines: usize, points: usize) -> Vec<u8> {
	let mut data = Vec::new();
	push_command(&mut data, 0, 1, &[0]); // BEGMF ''

	for picture in 0..pictures {
		let name = format!("p{picture}");
		let mut args = vec![name.len() as u8];
		args.extend_from_slice(name.as_bytes());
		push_command(&mut data, 0, 3, &args);
		push_command(&mut data, 0, 4, &[]);

		for line in 0..lines {
			let mut coords = Vec::with_capacity(points * 4);
			for point in 0..points {
				let x = (point as i16).wrapping_mul(7);
				let y = (line as i16).wrapping_sub(point as i16);
				coords.extend_from_slice(&x.to_be_bytes());
				coords.extend_from_slice(&y.to_be_bytes());
			}
			push_long_command(&mut data, 4, 1, &coords, 100);
		}

		push_command(&mut data, 0, 5, &[]);
	}

	push_command(&mut data, 0, 2, &[]); // ENDMF
	data
}

/// Builds a descriptor-heavy metafile that reconfigures precisions and
/// colour state between primitives, exercising the context plumbing.
pub fn generate_descriptor_stream(repeats: usize) -> Vec<u8> {
	let mut data = Vec::new();
	push_command(&mut data, 0, 1, &[0]);
	push_command(&mut data, 1, 4, &32i16.to_be_bytes()); // integerprec 32
	push_command(&mut data, 1, 3, &1i16.to_be_bytes()); // vdctype real
	push_command(&mut data, 2, 2, &1i16.to_be_bytes()); // colrmode direct

	for _ in 0..repeats {
		push_command(&mut data, 5, 4, &[200, 100, 50]); // linecolr
		let mut point = Vec::new();
		point.extend_from_slice(&1i16.to_be_bytes());
		point.extend_from_slice(&0x8000u16.to_be_bytes());
		point.extend_from_slice(&2i16.to_be_bytes());
		point.extend_from_slice(&0u16.to_be_bytes());
		push_command(&mut data, 4, 1, &point);
	}

	push_command(&mut data, 0, 2, &[]);
	data
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generated_stream_decodes_cleanly() {
		let data = generate_polyline_stream(2, 3, 50);
		let metafile = cgm_types::Metafile::from_bytes(&data, "bench");

		// BEGMF + 2 * (BEGPIC + BEGPICBODY + 3 lines + ENDPIC) + ENDMF
		assert_eq!(metafile.commands().len(), 14);
		assert!(metafile.diagnostics().is_empty());
	}

	#[test]
	fn test_descriptor_stream_decodes_cleanly() {
		let data = generate_descriptor_stream(4);
		let metafile = cgm_types::Metafile::from_bytes(&data, "bench");
		assert!(metafile.diagnostics().is_empty());
	}
}
