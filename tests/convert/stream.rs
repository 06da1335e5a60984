//! Binary stream builder shared by the conversion tests.

/// Assembles framed commands into a binary CGM stream.
#[derive(Debug, Default)]
pub struct StreamBuilder {
	data: Vec<u8>,
}

impl StreamBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a short-form command (at most 30 argument bytes).
	pub fn command(mut self, class: u8, id: u8, args: &[u8]) -> Self {
		assert!(args.len() <= 30, "short form carries at most 30 argument bytes");
		let header = (u16::from(class) << 12) | (u16::from(id) << 5) | args.len() as u16;
		self.data.extend_from_slice(&header.to_be_bytes());
		self.data.extend_from_slice(args);
		if args.len() % 2 == 1 {
			self.data.push(0);
		}
		self
	}

	/// Appends a long-form command split into `partition_size`-byte
	/// partitions.
	pub fn long_command(
		mut self,
		class: u8,
		id: u8,
		args: &[u8],
		partition_size: usize,
	) -> Self {
		let header = (u16::from(class) << 12) | (u16::from(id) << 5) | 31;
		self.data.extend_from_slice(&header.to_be_bytes());

		let mut chunks = args.chunks(partition_size.max(1)).peekable();
		while let Some(chunk) = chunks.next() {
			let mut word = chunk.len() as u16;
			if chunks.peek().is_some() {
				word |= 1 << 15;
			}
			self.data.extend_from_slice(&word.to_be_bytes());
			self.data.extend_from_slice(chunk);
			if chunk.len() % 2 == 1 {
				self.data.push(0);
			}
		}
		self
	}

	/// Appends BEGIN METAFILE with the given name.
	pub fn begin_metafile(self, name: &str) -> Self {
		let mut args = vec![name.len() as u8];
		args.extend_from_slice(name.as_bytes());
		self.command(0, 1, &args)
	}

	/// Appends END METAFILE.
	pub fn end_metafile(self) -> Self {
		self.command(0, 2, &[])
	}

	/// Returns the assembled stream.
	pub fn into_bytes(self) -> Vec<u8> {
		self.data
	}
}
