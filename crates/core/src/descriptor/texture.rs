use crate::descriptor::{Extent, Format};

/// The multisampling of a texture. A sample count of 1 with quality 0 means the texture is not multisampled.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TextureSamples {
	pub sample_count: u8,
	pub sampling_quality: u8,
}

impl TextureSamples {
	pub const NONE: Self = TextureSamples {
		sample_count: 1,
		sampling_quality: 0,
	};

	#[inline]
	pub const fn create(sample_count: u8, sampling_quality: u8) -> Self {
		Self {
			sample_count,
			sampling_quality,
		}
	}

	#[inline]
	pub fn is_multisampled(&self) -> bool {
		self.sample_count > 1
	}
}

impl Default for TextureSamples {
	fn default() -> Self {
		Self::NONE
	}
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Dimensionality {
	#[default]
	T1D,
	T2D,
	T3D,
	CubeMap,
}

impl Dimensionality {
	/// How many of width, height and depth carry meaning for this dimensionality.
	pub fn meaningful_axes(&self) -> usize {
		match self {
			Dimensionality::T1D => 1,
			Dimensionality::T2D | Dimensionality::CubeMap => 2,
			Dimensionality::T3D => 3,
		}
	}
}

/// Description of a texture. Use the factory functions to create consistent descriptions, they fill in the axes not
/// meaningful for the dimensionality.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TextureDesc {
	pub width: u32,
	pub height: u32,
	pub depth: u32,
	pub format: Format,
	pub dimensionality: Dimensionality,
	pub mip_count: u8,
	/// The amount of array layers, `0` if the texture is not arrayed.
	pub array_count: u16,
	pub samples: TextureSamples,
}

impl TextureDesc {
	pub fn plain_1d(width: u32, format: Format, mip_count: u8, array_count: u16) -> Self {
		Self {
			width,
			height: 1,
			depth: 1,
			format,
			dimensionality: Dimensionality::T1D,
			mip_count,
			array_count,
			samples: TextureSamples::default(),
		}
	}

	/// [`Self::plain_1d`] with a single mip and no array layers
	pub fn plain_1d_simple(width: u32, format: Format) -> Self {
		Self::plain_1d(width, format, 1, 0)
	}

	pub fn plain_2d(
		width: u32,
		height: u32,
		format: Format,
		mip_count: u8,
		array_count: u16,
		samples: TextureSamples,
	) -> Self {
		Self {
			width,
			height,
			depth: 1,
			format,
			dimensionality: Dimensionality::T2D,
			mip_count,
			array_count,
			samples,
		}
	}

	/// [`Self::plain_2d`] with a single mip, no array layers and no multisampling
	pub fn plain_2d_simple(width: u32, height: u32, format: Format) -> Self {
		Self::plain_2d(width, height, format, 1, 0, TextureSamples::default())
	}

	/// 3D textures can neither be arrayed nor multisampled.
	pub fn plain_3d(width: u32, height: u32, depth: u32, format: Format, mip_count: u8) -> Self {
		Self {
			width,
			height,
			depth,
			format,
			dimensionality: Dimensionality::T3D,
			mip_count,
			array_count: 0,
			samples: TextureSamples::default(),
		}
	}

	/// [`Self::plain_3d`] with a single mip
	pub fn plain_3d_simple(width: u32, height: u32, depth: u32, format: Format) -> Self {
		Self::plain_3d(width, height, depth, format, 1)
	}

	/// A cube map with six square faces of `edge` texels each.
	pub fn cube_map(edge: u32, format: Format, mip_count: u8) -> Self {
		Self {
			width: edge,
			height: edge,
			depth: 1,
			format,
			dimensionality: Dimensionality::CubeMap,
			mip_count,
			array_count: 0,
			samples: TextureSamples::default(),
		}
	}

	/// The "no texture" sentinel. All extents are zero, which consumers must check for before use.
	pub fn empty() -> Self {
		Self {
			width: 0,
			height: 0,
			depth: 0,
			format: Format::UNKNOWN,
			dimensionality: Dimensionality::T1D,
			mip_count: 0,
			array_count: 0,
			samples: TextureSamples::default(),
		}
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.width == 0 && self.height == 0 && self.depth == 0
	}

	#[inline]
	pub fn extent(&self) -> Extent {
		Extent::new(self.width, self.height, self.depth)
	}

	#[inline]
	pub fn mip_extent(&self, level: u8) -> Extent {
		self.extent().mip(level)
	}

	/// The array layers actually stored, cube maps store 6 faces per array layer.
	pub fn layer_count(&self) -> u32 {
		let layers = (self.array_count as u32).max(1);
		match self.dimensionality {
			Dimensionality::CubeMap => layers * 6,
			_ => layers,
		}
	}

	/// Texels of all mips, layers and samples combined, or `None` if the count does not fit into a `u64`.
	pub fn texel_count(&self) -> Option<u64> {
		let per_layer = (0..self.mip_count).try_fold(0u64, |sum, level| {
			sum.checked_add(self.mip_extent(level).texel_count()?)
		})?;
		per_layer
			.checked_mul(self.layer_count() as u64)?
			.checked_mul(self.samples.sample_count.max(1) as u64)
	}
}

impl Default for TextureDesc {
	fn default() -> Self {
		Self::empty()
	}
}
