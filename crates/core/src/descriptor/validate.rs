use crate::descriptor::{
	AllocationRules, BindFlags, CpuAccess, Dimensionality, LinearBufferDesc, ResourceDesc, ResourceKind, TextureDesc,
};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum DescError {
	#[error("Resource kind is unknown")]
	UnknownKind,
	#[error("Buffer size {size} is not a multiple of its structure size {structure}")]
	StructureSizeMismatch { size: u32, structure: u32 },
	#[error("Texture is the empty sentinel")]
	EmptyTexture,
	#[error("Texture of dimensionality {dimensionality:?} has a zero extent")]
	ZeroExtent { dimensionality: Dimensionality },
	#[error("Cube map faces must be square, got {width}x{height}")]
	CubeMapNotSquare { width: u32, height: u32 },
	#[error("Texture must have at least one mip")]
	ZeroMipCount,
	#[error("Sample count {0} is not a power of two between 1 and 64")]
	InvalidSampleCount(u8),
	#[error("Only 2D textures may be multisampled, got {dimensionality:?}")]
	MultisampledNonTexture2D { dimensionality: Dimensionality },
	#[error("{:?} cannot be combined with {:?}", CpuAccess::READ, CpuAccess::WRITE_DYNAMIC)]
	ReadWriteDynamic,
	#[error("Staging resources are never bound to the pipeline, but have {0:?}")]
	StagingWithBindFlags(BindFlags),
}

impl LinearBufferDesc {
	pub fn validate(&self) -> Result<(), DescError> {
		if self.is_structured() && self.size_in_bytes % self.structure_byte_size != 0 {
			Err(DescError::StructureSizeMismatch {
				size: self.size_in_bytes,
				structure: self.structure_byte_size,
			})
		} else {
			Ok(())
		}
	}
}

impl TextureDesc {
	pub fn validate(&self) -> Result<(), DescError> {
		if self.is_empty() {
			return Err(DescError::EmptyTexture);
		}

		let axes = [self.width, self.height, self.depth];
		if axes[..self.dimensionality.meaningful_axes()].contains(&0) {
			return Err(DescError::ZeroExtent {
				dimensionality: self.dimensionality,
			});
		}
		if self.dimensionality == Dimensionality::CubeMap && self.width != self.height {
			return Err(DescError::CubeMapNotSquare {
				width: self.width,
				height: self.height,
			});
		}
		if self.mip_count == 0 {
			return Err(DescError::ZeroMipCount);
		}

		let samples = self.samples.sample_count;
		if !samples.is_power_of_two() || samples > 64 {
			return Err(DescError::InvalidSampleCount(samples));
		}
		if self.samples.is_multisampled() && self.dimensionality != Dimensionality::T2D {
			return Err(DescError::MultisampledNonTexture2D {
				dimensionality: self.dimensionality,
			});
		}
		Ok(())
	}
}

impl ResourceDesc {
	/// Checks the description for inconsistencies the builders let through. Builders and factories never validate,
	/// allocation managers call this before acting on a description.
	pub fn validate(&self) -> Result<(), DescError> {
		match &self.kind {
			ResourceKind::LinearBuffer(buffer) => buffer.validate()?,
			ResourceKind::Texture(texture) => texture.validate()?,
			ResourceKind::Unknown => return Err(DescError::UnknownKind),
		}

		if self.cpu_access.contains(CpuAccess::READ) && self.cpu_access.is_dynamic() {
			return Err(DescError::ReadWriteDynamic);
		}
		if self.allocation_rules.contains(AllocationRules::STAGING) && !self.bind_flags.is_empty() {
			return Err(DescError::StagingWithBindFlags(self.bind_flags));
		}
		Ok(())
	}
}
