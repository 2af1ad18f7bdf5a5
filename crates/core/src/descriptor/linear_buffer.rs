/// Description of a linear buffer, like a vertex, index, constant or structured buffer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct LinearBufferDesc {
	/// The total size of this buffer in bytes. A size of 0 describes a degenerate, empty buffer.
	pub size_in_bytes: u32,
	/// The size of a single element if this is a structured buffer, otherwise 0.
	pub structure_byte_size: u32,
}

impl LinearBufferDesc {
	/// Creates a buffer description without validating it, see [`ResourceDesc::validate`].
	///
	/// [`ResourceDesc::validate`]: crate::descriptor::ResourceDesc::validate
	#[inline]
	pub const fn create(size_in_bytes: u32, structure_byte_size: u32) -> Self {
		Self {
			size_in_bytes,
			structure_byte_size,
		}
	}

	/// A buffer that is not structured
	#[inline]
	pub const fn plain(size_in_bytes: u32) -> Self {
		Self::create(size_in_bytes, 0)
	}

	#[inline]
	pub fn is_structured(&self) -> bool {
		self.structure_byte_size != 0
	}

	/// The number of structures in this buffer, or `None` if it is not structured.
	pub fn element_count(&self) -> Option<u32> {
		self.is_structured()
			.then(|| self.size_in_bytes / self.structure_byte_size)
	}
}
