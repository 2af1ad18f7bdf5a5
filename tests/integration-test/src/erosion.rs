#![cfg(test)]

use crate::init_logger;
use buffer_uploads::platform::{MemoryPlatform, UploadPlatform};
use buffer_uploads::uploads::{BufferUploads, BufferUploadsCreateInfo, UploadError};
use render_core::descriptor::{
	AllocationRules, BindFlags, CpuAccess, Format, GpuAccess, LinearBufferDesc, ResourceDesc, SubResourceInitData,
	TextureDesc,
};
use std::sync::Arc;

const R32_FLOAT: Format = Format(41);
const GRID: u32 = 64;

fn simulation_texture(name: &str) -> ResourceDesc {
	ResourceDesc::texture(
		BindFlags::UNORDERED_ACCESS | BindFlags::SHADER_RESOURCE,
		CpuAccess::empty(),
		GpuAccess::READ | GpuAccess::WRITE,
		TextureDesc::plain_2d_simple(GRID, GRID, R32_FLOAT),
		name,
	)
	.with_allocation_rules(AllocationRules::NON_VOLATILE)
}

fn readback_texture() -> ResourceDesc {
	ResourceDesc::texture(
		BindFlags::empty(),
		CpuAccess::empty(),
		GpuAccess::WRITE,
		TextureDesc::plain_2d_simple(GRID, GRID, R32_FLOAT),
		"Erosion readback",
	)
	.with_allocation_rules(AllocationRules::STAGING)
}

#[test]
fn test_ping_pong_readback() -> anyhow::Result<()> {
	init_logger();
	let uploads = BufferUploads::new(MemoryPlatform::new(), BufferUploadsCreateInfo::default())?;
	let initial: Vec<f32> = (0..GRID * GRID).map(|i| i as f32 * 0.5).collect();
	let water = [
		uploads.transaction(&simulation_texture("Erosion water A"), Some(SubResourceInitData::from_pod(&initial)))?,
		uploads.transaction(&simulation_texture("Erosion water B"), None)?,
	];
	let readback = uploads.transaction(&readback_texture(), None)?;

	// simulation textures are only accessible by the GPU
	assert!(matches!(
		uploads.read_back(&water[0], &mut [0; 4]),
		Err(UploadError::NotReadable { .. })
	));

	// a few simulation steps, each "dispatch" reads one texture and writes the other
	let platform = uploads.platform();
	for step in 0..4 {
		let (src, dst) = (&water[step % 2], &water[(step + 1) % 2]);
		let mut cells = vec![0u8; src.size() as usize];
		platform.read(src.resource(), 0, &mut cells)?;
		platform.write(dst.resource(), 0, &SubResourceInitData::new(&cells))?;
	}

	// copy the result into the staging texture and read it back on the CPU
	let result = water[0].resource().contents();
	uploads.update(&readback, &SubResourceInitData::new(&result))?;
	let mut out = vec![0u8; readback.size() as usize];
	uploads.read_back(&readback, &mut out)?;
	assert_eq!(out, SubResourceInitData::from_pod(&initial).data);
	Ok(())
}

#[test]
fn test_device_reset_keeps_simulation_state() -> anyhow::Result<()> {
	init_logger();
	let uploads = BufferUploads::new(MemoryPlatform::new(), BufferUploadsCreateInfo::default())?;
	let heights = uploads.transaction(
		&simulation_texture("Erosion heights"),
		Some(SubResourceInitData::new(&[3; 16])),
	)?;
	let readback = uploads.transaction(&readback_texture(), None)?;

	uploads.device_reset();
	assert!(!heights.is_lost());
	assert!(readback.is_lost());
	assert!(matches!(
		uploads.read_back(&readback, &mut [0; 16]),
		Err(UploadError::Lost { .. })
	));
	assert_eq!(&heights.resource().contents()[..16], [3u8; 16]);

	// readback textures are simply recreated after the reset
	let readback = uploads.transaction(&readback_texture(), None)?;
	assert!(!readback.is_lost());
	uploads.read_back(&readback, &mut [0; 16])?;
	assert_eq!(uploads.statistics().device_resets, 1);
	Ok(())
}

#[test]
fn test_concurrent_transactions() -> anyhow::Result<()> {
	init_logger();
	let uploads = BufferUploads::new(Arc::new(MemoryPlatform::new()), BufferUploadsCreateInfo::default())?;
	let desc = ResourceDesc::linear_buffer(
		BindFlags::STRUCTURED_BUFFER | BindFlags::UNORDERED_ACCESS,
		CpuAccess::READ | CpuAccess::WRITE,
		GpuAccess::READ | GpuAccess::WRITE,
		LinearBufferDesc::create(64, 16),
		"Erosion particles",
	)
	.with_allocation_rules(AllocationRules::POOLED);

	std::thread::scope(|scope| {
		let threads: Vec<_> = (0..4u8)
			.map(|thread| {
				let uploads = &uploads;
				let desc = &desc;
				scope.spawn(move || -> anyhow::Result<()> {
					for i in 0..100u8 {
						let _frame = uploads.frame();
						let fill = [thread.wrapping_mul(100).wrapping_add(i); 64];
						let particles = uploads.transaction(desc, Some(SubResourceInitData::new(&fill)))?;
						let mut out = [0; 64];
						uploads.read_back(&particles, &mut out)?;
						assert_eq!(out, fill);
					}
					Ok(())
				})
			})
			.collect();
		threads
			.into_iter()
			.try_for_each(|thread| thread.join().unwrap())
	})?;

	drop(uploads.frame());
	let stats = uploads.statistics();
	assert_eq!(stats.created + stats.reused_from_pool, 400);
	assert!(uploads.pooled_count() <= BufferUploadsCreateInfo::default().max_pooled_per_key);
	assert_eq!(uploads.platform().stats().alive(), uploads.pooled_count() as u64);
	log::info!("{stats:?}");
	Ok(())
}
