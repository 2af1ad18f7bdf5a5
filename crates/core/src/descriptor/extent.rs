/// Width, height and depth of a texture or one of its mip levels.
#[repr(C)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[must_use]
pub struct Extent {
	pub width: u32,
	pub height: u32,
	pub depth: u32,
}

impl Extent {
	pub const ZERO: Self = Extent {
		width: 0,
		height: 0,
		depth: 0,
	};

	#[inline]
	pub const fn new(width: u32, height: u32, depth: u32) -> Self {
		Self { width, height, depth }
	}

	#[inline]
	pub fn is_zero(&self) -> bool {
		*self == Self::ZERO
	}

	/// The extent of mip `level`, each component halved per level but never below 1. Zero components stay zero.
	pub fn mip(&self, level: u8) -> Self {
		let shrink = |v: u32| if v == 0 { 0 } else { v.checked_shr(level as u32).unwrap_or(0).max(1) };
		Extent {
			width: shrink(self.width),
			height: shrink(self.height),
			depth: shrink(self.depth),
		}
	}

	/// The amount of texels, or `None` if it does not fit into a `u64`.
	#[inline]
	pub fn texel_count(&self) -> Option<u64> {
		(self.width as u64)
			.checked_mul(self.height as u64)?
			.checked_mul(self.depth as u64)
	}
}
