//! Binary CGM (ISO/IEC 8632-3) stream decoding.
//!
//! ## Overview
//!
//! A binary metafile is a sequence of framed commands. Everything is
//! big-endian. Each command starts with a 16-bit header:
//!
//! | Bits  | Field           | Description                                |
//! |-------|-----------------|--------------------------------------------|
//! | 15–12 | `element_class` | Element class, 0–9 assigned, 10–15 reserved |
//! | 11–5  | `element_id`    | Element id within the class                |
//! | 4–0   | `length`        | Argument length 0–30, or 31 for long form  |
//!
//! Short form carries `length` argument bytes directly. Long form carries a
//! chain of partitions, each prefixed with a 16-bit word whose top bit says
//! "more partitions follow" and whose low 15 bits give the partition length.
//! Arguments and partitions are padded to word (two-byte) boundaries.
//!
//! The argument bytes themselves cannot be interpreted without the
//! [`Context`](crate::context::Context): integer widths, real
//! representations, VDC type and colour handling are all declared by
//! descriptor elements earlier in the same stream. [`frame`] splits the
//! stream into `(class, id, arguments)` triples, [`primitives`] extracts
//! typed values from one argument buffer, and [`decode`] maps each triple
//! to a [`Command`](crate::commands::Command) while keeping the context up
//! to date.

pub(crate) mod decode;
pub(crate) mod frame;
pub(crate) mod primitives;

pub(crate) use primitives::PrimitiveReader;
