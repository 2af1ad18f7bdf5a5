/// Pixel or element format of a resource. The enumeration of formats lives with the platform, descriptors only store
/// and forward the identifier.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Format(pub u32);

impl Format {
	pub const UNKNOWN: Self = Format(0);

	#[inline]
	pub fn is_unknown(&self) -> bool {
		*self == Self::UNKNOWN
	}
}

impl From<u32> for Format {
	fn from(value: u32) -> Self {
		Format(value)
	}
}

impl From<Format> for u32 {
	fn from(value: Format) -> Self {
		value.0
	}
}
