#![cfg(test)]

use crate::init_logger;
use buffer_uploads::platform::MemoryPlatform;
use buffer_uploads::uploads::{BufferUploads, BufferUploadsCreateInfo};
use render_core::descriptor::{
	AllocationRules, BindFlags, CpuAccess, Format, GpuAccess, LinearBufferDesc, ResourceDesc, SubResourceInitData,
	TextureDesc,
};
use std::collections::VecDeque;

const TILE_EDGE: u32 = 65;
const R16_UINT: Format = Format(57);

fn height_tile(x: u32, y: u32) -> ResourceDesc {
	ResourceDesc::texture(
		BindFlags::SHADER_RESOURCE,
		CpuAccess::WRITE,
		GpuAccess::READ,
		TextureDesc::plain_2d_simple(TILE_EDGE, TILE_EDGE, R16_UINT),
		&format!("Terrain heights [{x}, {y}]"),
	)
	.with_allocation_rules(AllocationRules::POOLED)
}

fn heights(seed: u16) -> Vec<u16> {
	(0..TILE_EDGE * TILE_EDGE).map(|i| seed.wrapping_mul(31).wrapping_add(i as u16)).collect()
}

#[test]
fn test_streaming_height_tiles() -> anyhow::Result<()> {
	init_logger();
	let mut platform = MemoryPlatform::default();
	platform.texel_size = Some(2);
	let uploads = BufferUploads::new(platform, BufferUploadsCreateInfo::default())?;

	let mut visible = VecDeque::new();
	for i in 0..8 {
		let frame = uploads.frame();
		if visible.len() == 4 {
			visible.pop_front();
		}
		let data = heights(i as u16);
		let tile = uploads.transaction(&height_tile(i, 0), Some(SubResourceInitData::from_pod(&data)))?;
		assert_eq!(tile.size(), (TILE_EDGE * TILE_EDGE * 2) as u64);
		// reused tiles must not show stale heights
		assert_eq!(tile.resource().contents(), SubResourceInitData::from_pod(&data).data);
		visible.push_back(tile);
		drop(frame);
	}

	// an evicted tile is reusable by the frame after its eviction
	let stats = uploads.statistics();
	assert_eq!(stats.created, 5);
	assert_eq!(stats.reused_from_pool, 3);
	assert_eq!(uploads.platform().stats().alive(), 5);
	Ok(())
}

#[test]
fn test_update_height_tile() -> anyhow::Result<()> {
	let uploads = BufferUploads::new(MemoryPlatform::new(), BufferUploadsCreateInfo::default())?;
	let tile = uploads.transaction(&height_tile(3, 7), None)?;
	assert_eq!(tile.desc().name, "Terrain heights [3, 7]");

	let row = [1u8; TILE_EDGE as usize * 4];
	uploads.update(&tile, &SubResourceInitData::with_pitches(&row, row.len(), 0))?;
	assert_eq!(&tile.resource().contents()[..row.len()], row);
	Ok(())
}

fn patch_desc(vertices: u32) -> ResourceDesc {
	ResourceDesc::linear_buffer(
		BindFlags::VERTEX_BUFFER,
		CpuAccess::READ,
		GpuAccess::READ,
		LinearBufferDesc::create(vertices * 12, 12),
		"Terrain patch vertices",
	)
	.with_allocation_rules(AllocationRules::BATCHED)
}

fn patch_vertices(patch: u32, vertices: u32) -> Vec<f32> {
	(0..vertices * 3).map(|i| (patch * 1000 + i) as f32).collect()
}

#[test]
fn test_batched_patch_vertices() -> anyhow::Result<()> {
	init_logger();
	let uploads = BufferUploads::new(MemoryPlatform::new(), BufferUploadsCreateInfo::default())?;

	let frame = uploads.frame();
	let patches = (0..32)
		.map(|patch| {
			let vertices = patch_vertices(patch, 16);
			uploads.transaction(&patch_desc(16), Some(SubResourceInitData::from_pod(&vertices)))
		})
		.collect::<Result<Vec<_>, _>>()?;
	drop(frame);

	assert!(patches.iter().all(|patch| patch.is_batched() && patch.is_pending()));
	assert!(patches.iter().all(|patch| patch.shares_resource_with(&patches[0])));
	for (i, patch) in patches.iter().enumerate() {
		// aligned to both the page alignment and the vertex stride
		assert_eq!(patch.offset(), i as u64 * 768);
		assert_eq!(patch.size(), 16 * 12);
	}
	assert_eq!(uploads.platform().stats().writes, 0);

	// the next frame writes the whole page at once
	let frame = uploads.frame();
	assert_eq!(uploads.platform().stats().writes, 1);
	assert!(!patches[0].is_pending());
	let stats = uploads.statistics();
	assert_eq!(stats.created, 1);
	assert_eq!(stats.batched_allocations, 32);
	assert_eq!(stats.batch_pages_flushed, 1);

	let mut out = vec![0u8; 16 * 12];
	uploads.read_back(&patches[7], &mut out)?;
	assert_eq!(out, SubResourceInitData::from_pod(&patch_vertices(7, 16)).data);

	// the page is destroyed only after its last patch is gone and the frame ended
	let last = patches[7].clone();
	drop(patches);
	drop(frame);
	drop(uploads.frame());
	assert_eq!(uploads.platform().stats().destroyed, 0);

	drop(last);
	drop(uploads.frame());
	assert_eq!(uploads.platform().stats().destroyed, 1);
	assert_eq!(uploads.platform().stats().alive(), 0);
	Ok(())
}
