use render_core::descriptor::{Format, ResourceDesc, ResourceKind, SubResourceInitData};
use std::error::Error;
use std::sync::Arc;

/// Interface to the graphics API that actually creates resources. [`BufferUploads`] decides *how* a resource is
/// backed: pooled, batched, staged. The platform only performs the low level operations.
///
/// [`BufferUploads`]: crate::uploads::BufferUploads
pub trait UploadPlatform: Sized + Send + Sync + 'static {
	type Resource: 'static + Send + Sync;
	type AllocationError: 'static + Error + Send + Sync;

	/// Create a resource of `byte_size` bytes as described by `desc`, with all bytes zeroed. `desc` has already been
	/// validated.
	fn create_resource(&self, desc: &ResourceDesc, byte_size: u64) -> Result<Self::Resource, Self::AllocationError>;

	/// Write `init` into `resource` starting at `offset` bytes.
	fn write(
		&self,
		resource: &Self::Resource,
		offset: u64,
		init: &SubResourceInitData,
	) -> Result<(), Self::AllocationError>;

	/// Read back `out.len()` bytes of `resource` starting at `offset` bytes.
	fn read(&self, resource: &Self::Resource, offset: u64, out: &mut [u8]) -> Result<(), Self::AllocationError>;

	/// Destroy resources. They have been released and are no longer used by any frame in flight.
	fn destroy_resources(&self, resources: impl Iterator<Item = Self::Resource>);

	/// Size of a single texel of `format` in bytes.
	fn bytes_per_texel(&self, _format: Format) -> u32 {
		4
	}

	/// The amount of memory a resource of `desc` occupies, or `None` if it does not fit into a `u64`.
	fn byte_size(&self, desc: &ResourceDesc) -> Option<u64> {
		match &desc.kind {
			ResourceKind::LinearBuffer(buffer) => Some(buffer.size_in_bytes as u64),
			ResourceKind::Texture(texture) => texture
				.texel_count()?
				.checked_mul(self.bytes_per_texel(texture.format) as u64),
			ResourceKind::Unknown => Some(0),
		}
	}
}

impl<P: UploadPlatform> UploadPlatform for Arc<P> {
	type Resource = P::Resource;
	type AllocationError = P::AllocationError;

	fn create_resource(&self, desc: &ResourceDesc, byte_size: u64) -> Result<Self::Resource, Self::AllocationError> {
		P::create_resource(self, desc, byte_size)
	}

	fn write(
		&self,
		resource: &Self::Resource,
		offset: u64,
		init: &SubResourceInitData,
	) -> Result<(), Self::AllocationError> {
		P::write(self, resource, offset, init)
	}

	fn read(&self, resource: &Self::Resource, offset: u64, out: &mut [u8]) -> Result<(), Self::AllocationError> {
		P::read(self, resource, offset, out)
	}

	fn destroy_resources(&self, resources: impl Iterator<Item = Self::Resource>) {
		P::destroy_resources(self, resources)
	}

	fn bytes_per_texel(&self, format: Format) -> u32 {
		P::bytes_per_texel(self, format)
	}

	fn byte_size(&self, desc: &ResourceDesc) -> Option<u64> {
		P::byte_size(self, desc)
	}
}
