//! Small indices filled from closed-form fields, shared by the unit tests.

use crate::block::{BlockStorage, BLOCK_VOLUME};
use crate::builder::HashTableBuilder;
use crate::config::{HashLayout, PlainArrayLayout};
use crate::coordinates::voxel_of;
use crate::core::glam::{IVec3, Vec3A};
use crate::hash::EntryState;
use crate::units::*;
use crate::{PlainVoxelArray, VoxelBlockHHash, VoxelBlockHash, VoxelF};

pub fn test_layout(num_levels: u8) -> HashLayout {
    HashLayout {
        num_buckets: 64,
        entries_per_bucket: 2,
        excess_list_size: 32,
        num_levels,
    }
}

pub fn plain_array(origin: IVec3, size: IVec3, field: impl Fn(Vec3A) -> f32) -> PlainVoxelArray<VoxelF> {
    let layout = PlainArrayLayout { origin, size };
    let mut voxels = Vec::with_capacity(layout.volume());
    for z in 0..size.z {
        for y in 0..size.y {
            for x in 0..size.x {
                let p = origin + IVec3::new(x, y, z);
                voxels.push(VoxelF::new(field(p.as_vec3a()), 1));
            }
        }
    }
    PlainVoxelArray::from_raw_parts(layout, voxels).unwrap()
}

/// Samples `field` at the finest-level position of every voxel of each `(level, block)`.
fn fill_blocks(blocks: &[(u8, IVec3)], field: impl Fn(Vec3A) -> f32) -> (HashTableBuilder, Vec<VoxelF>) {
    let num_levels = blocks.iter().map(|(l, _)| l + 1).max().unwrap_or(1);
    let mut builder = HashTableBuilder::new(test_layout(num_levels)).unwrap();
    let mut voxels = Vec::with_capacity(blocks.len() * BLOCK_VOLUME);
    for (i, &(level, block)) in blocks.iter().enumerate() {
        builder.insert(level, block, EntryState::Occupied(i as u32)).unwrap();
        for offset in 0..BLOCK_VOLUME {
            let p = voxel_of(BlockUnits(block), offset).0 * (1i32 << level);
            voxels.push(VoxelF::new(field(p.as_vec3a()), 1));
        }
    }
    (builder, voxels)
}

pub fn flat_hash(blocks: &[IVec3], field: impl Fn(Vec3A) -> f32) -> VoxelBlockHash<VoxelF> {
    let levelled: Vec<_> = blocks.iter().map(|b| (0, *b)).collect();
    let (builder, voxels) = fill_blocks(&levelled, field);
    let layout = *builder.layout();
    VoxelBlockHash::from_raw_parts(layout, builder.finish(), BlockStorage::from_voxels(voxels).unwrap()).unwrap()
}

pub fn hierarchy(blocks: &[(u8, IVec3)], field: impl Fn(Vec3A) -> f32) -> VoxelBlockHHash<VoxelF> {
    let (builder, voxels) = fill_blocks(blocks, field);
    let layout = *builder.layout();
    VoxelBlockHHash::from_raw_parts(layout, builder.finish(), BlockStorage::from_voxels(voxels).unwrap()).unwrap()
}
