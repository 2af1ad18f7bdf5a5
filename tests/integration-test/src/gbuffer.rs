#![cfg(test)]

use crate::init_logger;
use buffer_uploads::platform::MemoryPlatform;
use buffer_uploads::uploads::{BufferUploads, BufferUploadsCreateInfo, ResourceLocator, UploadError};
use render_core::descriptor::{
	AllocationRules, BindFlags, CpuAccess, DescError, Dimensionality, Format, GpuAccess, ResourceDesc, TextureDesc,
	TextureSamples,
};
use std::sync::Arc;

const DIFFUSE: Format = Format(28);
const NORMALS: Format = Format(24);
const PARAMETERS: Format = Format(87);
const DEPTH: Format = Format(45);

fn target(name: &str, bind_flags: BindFlags, format: Format, width: u32, height: u32) -> ResourceDesc {
	ResourceDesc::texture(
		bind_flags | BindFlags::SHADER_RESOURCE,
		CpuAccess::empty(),
		GpuAccess::READ | GpuAccess::WRITE,
		TextureDesc::plain_2d_simple(width, height, format),
		name,
	)
	.with_allocation_rules(AllocationRules::POOLED)
}

fn gbuffer(width: u32, height: u32) -> [ResourceDesc; 4] {
	[
		target("GBuffer diffuse", BindFlags::RENDER_TARGET, DIFFUSE, width, height),
		target("GBuffer normals", BindFlags::RENDER_TARGET, NORMALS, width, height),
		target("GBuffer parameters", BindFlags::RENDER_TARGET, PARAMETERS, width, height),
		target("GBuffer depth", BindFlags::DEPTH_STENCIL, DEPTH, width, height),
	]
}

fn allocate(
	uploads: &Arc<BufferUploads<MemoryPlatform>>,
	descs: &[ResourceDesc],
) -> Result<Vec<ResourceLocator<MemoryPlatform>>, UploadError<MemoryPlatform>> {
	descs.iter().map(|desc| uploads.transaction(desc, None)).collect()
}

#[test]
fn test_gbuffer_descriptions() -> anyhow::Result<()> {
	for desc in gbuffer(1920, 1080) {
		desc.validate()?;
		assert!(desc.bind_flags.is_pipeline_output());
		let texture = desc.as_texture().unwrap();
		assert_eq!(texture.dimensionality, Dimensionality::T2D);
		assert_eq!((texture.width, texture.height, texture.depth), (1920, 1080, 1));
	}
	Ok(())
}

#[test]
fn test_gbuffer_resize() -> anyhow::Result<()> {
	init_logger();
	let uploads = BufferUploads::new(MemoryPlatform::new(), BufferUploadsCreateInfo::default())?;

	let frame = uploads.frame();
	let targets = allocate(&uploads, &gbuffer(1280, 720))?;
	assert_eq!(targets[0].size(), 1280 * 720 * 4);
	assert_eq!(targets[3].desc().name, "GBuffer depth");
	drop(targets);
	drop(frame);

	// released targets become reusable once the frame ended
	drop(uploads.frame());
	assert_eq!(uploads.pooled_count(), 4);

	let resized = allocate(&uploads, &gbuffer(1920, 1080))?;
	assert_eq!(uploads.statistics().created, 8);
	assert_eq!(uploads.pooled_count(), 4);

	let restored = allocate(&uploads, &gbuffer(1280, 720))?;
	let stats = uploads.statistics();
	assert_eq!(stats.created, 8);
	assert_eq!(stats.reused_from_pool, 4);
	assert_eq!(uploads.pooled_count(), 0);
	assert_eq!(uploads.platform().stats().alive(), 8);
	drop((resized, restored));
	Ok(())
}

#[test]
fn test_multisampled_targets() -> anyhow::Result<()> {
	let uploads = BufferUploads::new(MemoryPlatform::new(), BufferUploadsCreateInfo::default())?;
	let msaa = TextureSamples::create(4, 0);
	let desc = ResourceDesc::texture(
		BindFlags::RENDER_TARGET,
		CpuAccess::empty(),
		GpuAccess::WRITE,
		TextureDesc::plain_2d(1280, 720, DIFFUSE, 1, 0, msaa),
		"MSAA color",
	);
	let locator = uploads.transaction(&desc, None)?;
	assert_eq!(locator.size(), 1280 * 720 * 4 * 4);

	let volume = TextureDesc {
		samples: msaa,
		..TextureDesc::plain_3d_simple(64, 64, 64, DIFFUSE)
	};
	let err = uploads
		.transaction(&ResourceDesc { kind: volume.into(), ..desc }, None)
		.unwrap_err();
	assert!(matches!(
		err,
		UploadError::Desc(DescError::MultisampledNonTexture2D {
			dimensionality: Dimensionality::T3D
		})
	));
	Ok(())
}
