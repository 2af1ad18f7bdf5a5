use crate::platform::UploadPlatform;
use render_core::descriptor::{DescError, ResourceName};
use std::fmt::{Debug, Display, Formatter};
use thiserror::Error;

#[derive(Error)]
pub enum UploadError<P: UploadPlatform> {
	#[error("Platform Error: {0}")]
	Platform(#[source] P::AllocationError),
	#[error("Invalid Description: {0}")]
	Desc(#[from] DescError),
	#[error("Resource {name} was not created with CPU read access and is not a staging resource")]
	NotReadable { name: ResourceName },
	#[error("Resource {name} was not created with CPU write access and is not a staging resource")]
	NotWritable { name: ResourceName },
	#[error("Resource {name} was lost in a device reset")]
	Lost { name: ResourceName },
	#[error("Size in bytes of resource {name} does not fit into a u64")]
	SizeOverflow { name: ResourceName },
	#[error("Access of {len} bytes exceeds resource {name} of {size} bytes")]
	OutOfRange { name: ResourceName, len: u64, size: u64 },
}

impl<P: UploadPlatform> Debug for UploadError<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self, f)
	}
}
