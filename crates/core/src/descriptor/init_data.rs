use bytemuck::Pod;

/// Initial contents of a resource, handed to the allocator when the resource is created.
///
/// For textures `row_pitch` is the distance between rows and `slice_pitch` the distance between depth slices or array
/// layers, both in bytes. Linear buffers leave both at 0.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SubResourceInitData<'a> {
	pub data: &'a [u8],
	pub row_pitch: usize,
	pub slice_pitch: usize,
}

impl<'a> SubResourceInitData<'a> {
	#[inline]
	pub fn new(data: &'a [u8]) -> Self {
		Self {
			data,
			row_pitch: 0,
			slice_pitch: 0,
		}
	}

	#[inline]
	pub fn with_pitches(data: &'a [u8], row_pitch: usize, slice_pitch: usize) -> Self {
		Self {
			data,
			row_pitch,
			slice_pitch,
		}
	}

	/// Reinterprets a slice of plain data, like vertices or indices, as bytes.
	#[inline]
	pub fn from_pod<T: Pod>(data: &'a [T]) -> Self {
		Self::new(bytemuck::cast_slice(data))
	}

	#[inline]
	pub fn size(&self) -> usize {
		self.data.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}
}
