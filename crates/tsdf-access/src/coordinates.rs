use crate::block::{BlockShape, BLOCK_EDGE, BLOCK_SHAPE_IVEC3, BLOCK_SHAPE_LOG2_IVEC3};
use crate::core::glam::IVec3;
use crate::units::*;

use ndshape::ConstShape;

/// Returns the [`BlockUnits`] coordinates of the block that contains `p`.
///
/// Rounds toward negative infinity, so `-1` lands in block `-1` rather than block `0`.
#[inline]
pub fn block_of(p: VoxelUnits<IVec3>) -> BlockUnits<IVec3> {
    BlockUnits(p.0 >> BLOCK_SHAPE_LOG2_IVEC3)
}

/// Like [`block_of`], for blocks whose edge length is `BLOCK_EDGE * multiplier` voxels.
#[inline]
pub fn block_of_scaled(p: VoxelUnits<IVec3>, multiplier: i32) -> BlockUnits<IVec3> {
    BlockUnits(p.0.div_euclid(IVec3::splat(BLOCK_EDGE * multiplier)))
}

/// The minimum voxel of the block at `coordinates`.
#[inline]
pub fn block_min(coordinates: BlockUnits<IVec3>) -> VoxelUnits<IVec3> {
    VoxelUnits(coordinates.0 << BLOCK_SHAPE_LOG2_IVEC3)
}

/// Linear index of `p` inside `block`. `p` must lie inside `block`.
#[inline]
pub fn offset_of(p: VoxelUnits<IVec3>, block: BlockUnits<IVec3>) -> usize {
    let local = p.0 - block.0 * BLOCK_SHAPE_IVEC3;
    BlockShape::linearize(local.to_array()) as usize
}

/// Splits `p` into its owning block and the linear offset inside that block.
#[inline]
pub fn parse_voxel(p: VoxelUnits<IVec3>) -> (BlockUnits<IVec3>, usize) {
    let block = block_of(p);
    (block, offset_of(p, block))
}

/// Inverse of [`parse_voxel`].
#[inline]
pub fn voxel_of(block: BlockUnits<IVec3>, offset: usize) -> VoxelUnits<IVec3> {
    let local = IVec3::from_array(BlockShape::delinearize(offset as i32));
    VoxelUnits(block_min(block).0 + local)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
