//! End-to-end conversion tests over hand-assembled binary streams.

mod stream;

use cgm_rs::{Command, Metafile, Severity, decode_and_emit};
use stream::StreamBuilder;

#[test]
fn test_minimum_viable_stream() {
	// class 0 id 1 length 0, then class 0 id 2 length 0
	let (text, diagnostics) = decode_and_emit(&[0x00, 0x20, 0x00, 0x40]);
	assert_eq!(text, "BEGMF '';\nENDMF;\n");
	assert!(diagnostics.is_empty());
}

#[test]
fn test_integer_precision_override() {
	let data = StreamBuilder::new()
		.begin_metafile("t")
		.command(1, 4, &32i16.to_be_bytes())
		.command(1, 1, &3i32.to_be_bytes())
		.end_metafile()
		.into_bytes();

	let metafile = Metafile::from_bytes(&data, "t");
	assert!(metafile.diagnostics().is_empty());
	assert_eq!(metafile.context().integer_precision, 32);

	let (text, _) = metafile.to_clear_text();
	assert!(text.contains("integerprec -2147483648, 2147483647 % 32 binary bits %;\n"));
	// The version argument was read as a 32-bit big-endian integer
	assert!(text.contains("mfversion 3;\n"));
}

#[test]
fn test_vdc_type_divergence() {
	let mut points = Vec::new();
	for v in [5i16, -7] {
		points.extend_from_slice(&v.to_be_bytes());
	}
	let data = StreamBuilder::new()
		.begin_metafile("t")
		.command(1, 3, &0i16.to_be_bytes()) // vdctype integer
		.command(4, 1, &points)
		.end_metafile()
		.into_bytes();

	let (text, diagnostics) = decode_and_emit(&data);
	assert!(text.contains("vdctype real;\n"));
	// The declared integer VDCs still decoded the point bytes as 16-bit
	// integers, but formatting switched to real form
	assert!(text.contains("  LINE (5.0000,-7.0000);\n"));
	assert!(
		diagnostics
			.iter()
			.any(|d| d.severity == Severity::Info && !d.message.is_empty())
	);
}

#[test]
fn test_polyline_under_integer_vdc() {
	let mut points = Vec::new();
	for v in [0i16, 0, 10, 10, 20, 0, 30, -10] {
		points.extend_from_slice(&v.to_be_bytes());
	}
	let data = StreamBuilder::new().command(4, 1, &points).into_bytes();

	let (text, diagnostics) = decode_and_emit(&data);
	assert_eq!(text, "  LINE (0,0) (10,10) (20,0) (30,-10);\n");
	assert!(diagnostics.is_empty());
}

#[test]
fn test_unknown_command_passthrough() {
	let data = StreamBuilder::new()
		.command(6, 1, &[0x01, 0x02]) // escape
		.command(0, 2, &[])
		.into_bytes();

	let metafile = Metafile::from_bytes(&data, "t");
	assert_eq!(metafile.commands().len(), 2);
	assert!(matches!(metafile.commands()[0], Command::Unknown(_)));

	let (text, _) = metafile.to_clear_text();
	let first_line = text.lines().next().unwrap();
	assert!(first_line.starts_with('%'));
	assert!(text.contains("ENDMF;\n"));
}

#[test]
fn test_partitioned_long_form() {
	// 400 bytes of 16-bit integer VDC points in two 200-byte partitions
	let mut points = Vec::new();
	for i in 0..100i16 {
		points.extend_from_slice(&i.to_be_bytes());
		points.extend_from_slice(&(-i).to_be_bytes());
	}
	let data = StreamBuilder::new().long_command(4, 1, &points, 200).into_bytes();

	let metafile = Metafile::from_bytes(&data, "t");
	assert!(metafile.diagnostics().is_empty());
	match &metafile.commands()[0] {
		Command::Unknown(unknown) => panic!("decoded as unknown: {unknown:?}"),
		Command::GraphicalPrimitive(cgm_rs::GraphicalPrimitive::Polyline { points }) => {
			assert_eq!(points.len(), 100);
			assert_eq!(points[99].x, 99.0);
			assert_eq!(points[99].y, -99.0);
		}
		other => panic!("unexpected {other:?}"),
	}
}

#[test]
fn test_partitioned_long_form_with_odd_partitions() {
	// Odd-length partitions each take a pad byte that must not leak into
	// the argument buffer
	let mut points = Vec::new();
	for v in [1i16, 2, 3, 4] {
		points.extend_from_slice(&v.to_be_bytes());
	}
	let data = StreamBuilder::new().long_command(4, 1, &points, 3).into_bytes();

	let metafile = Metafile::from_bytes(&data, "t");
	match &metafile.commands()[0] {
		Command::GraphicalPrimitive(cgm_rs::GraphicalPrimitive::Polyline { points }) => {
			assert_eq!(points.len(), 2);
		}
		other => panic!("unexpected {other:?}"),
	}
}

#[test]
fn test_string_length_boundary() {
	// 254 fits the single-octet form
	let mut args = vec![254u8];
	args.extend(vec![b'a'; 254]);
	let data = StreamBuilder::new().long_command(0, 1, &args, 100).into_bytes();
	let metafile = Metafile::from_bytes(&data, "t");
	match &metafile.commands()[0] {
		Command::Delimiter(cgm_rs::Delimiter::BeginMetafile { name }) => {
			assert_eq!(name.len(), 254);
		}
		other => panic!("unexpected {other:?}"),
	}

	// 255 selects the two-octet form
	let mut args = vec![255u8, 0x01, 0x04];
	args.extend(vec![b'b'; 260]);
	let data = StreamBuilder::new().long_command(0, 1, &args, 100).into_bytes();
	let metafile = Metafile::from_bytes(&data, "t");
	match &metafile.commands()[0] {
		Command::Delimiter(cgm_rs::Delimiter::BeginMetafile { name }) => {
			assert_eq!(name.len(), 260);
		}
		other => panic!("unexpected {other:?}"),
	}
	assert!(metafile.diagnostics().is_empty());
}

#[test]
fn test_sub_byte_colour_indices_repack() {
	// colrindexprec 2, then a colour table starting at index 1 with
	// 8-bit-per-component entries
	let data = StreamBuilder::new()
		.begin_metafile("t")
		.command(1, 8, &2i16.to_be_bytes())
		.command(5, 34, &[0b0100_0000, 1, 2, 3, 4, 5, 6])
		.end_metafile()
		.into_bytes();

	let metafile = Metafile::from_bytes(&data, "t");
	match &metafile.commands()[2] {
		Command::Attribute(cgm_rs::Attribute::ColourTable { start_index, entries }) => {
			assert_eq!(*start_index, 1);
			// After the 2-bit index the reader re-aligns, so entries start
			// on the next whole byte
			assert_eq!(entries[0], (1, 2, 3));
			assert_eq!(entries.len(), 2);
		}
		other => panic!("unexpected {other:?}"),
	}
}

#[test]
fn test_emitted_count_matches_framed_count() {
	let data = StreamBuilder::new()
		.begin_metafile("t")
		.command(6, 3, &[]) // escape -> unknown
		.command(11, 5, &[0xAA, 0xBB]) // reserved class -> unknown
		.command(4, 7, &[0, 1, 0, 2, 0, 3, 0, 4]) // polygon
		.end_metafile()
		.into_bytes();

	let metafile = Metafile::from_bytes(&data, "t");
	assert_eq!(metafile.commands().len(), 5);
	let unknowns = metafile
		.commands()
		.iter()
		.filter(|c| matches!(c, Command::Unknown(_)))
		.count();
	assert_eq!(unknowns, 2);

	let (text, _) = metafile.to_clear_text();
	assert_eq!(text.lines().count(), 5);
}

#[test]
fn test_vdc_flip_mid_picture() {
	let mut early = Vec::new();
	for v in [1i16, 2] {
		early.extend_from_slice(&v.to_be_bytes());
	}
	// After the flip the same-size buffer holds one fixed-32 coordinate pair
	let mut late = Vec::new();
	late.extend_from_slice(&6i16.to_be_bytes());
	late.extend_from_slice(&0x8000u16.to_be_bytes());
	late.extend_from_slice(&7i16.to_be_bytes());
	late.extend_from_slice(&0u16.to_be_bytes());

	let data = StreamBuilder::new()
		.begin_metafile("t")
		.command(4, 1, &early)
		.command(1, 3, &1i16.to_be_bytes()) // vdctype real
		.command(4, 1, &late)
		.end_metafile()
		.into_bytes();

	let metafile = Metafile::from_bytes(&data, "t");
	let lines: Vec<&Command> = metafile
		.commands()
		.iter()
		.filter(|c| matches!(c, Command::GraphicalPrimitive(_)))
		.collect();

	match (lines[0], lines[1]) {
		(
			Command::GraphicalPrimitive(cgm_rs::GraphicalPrimitive::Polyline { points: a }),
			Command::GraphicalPrimitive(cgm_rs::GraphicalPrimitive::Polyline { points: b }),
		) => {
			assert_eq!((a[0].x, a[0].y), (1.0, 2.0));
			assert!((b[0].x - 6.5).abs() < 1e-9);
			assert_eq!(b[0].y, 7.0);
		}
		other => panic!("unexpected {other:?}"),
	}
}

#[test]
fn test_diagnostics_serialise_for_reporting() {
	let data = StreamBuilder::new()
		.begin_metafile("t")
		.command(6, 1, &[])
		.end_metafile()
		.into_bytes();

	let (_, diagnostics) = decode_and_emit(&data);
	let json = serde_json::to_string(&diagnostics).unwrap();
	assert!(json.contains("\"severity\":\"unsupported\""));
	assert!(json.contains("\"element_class\":6"));
}
