use crate::core::glam::IVec3;
use crate::core::static_assertions::const_assert_eq;
use crate::{LayoutError, Voxel};

use bytemuck::allocation::pod_collect_to_vec;
use bytemuck::{Pod, PodCastError};
use ndshape::{ConstShape, ConstShape3i32};
use std::mem;

/// The 3D array shape of every voxel block, linearized as `x + y * B + z * B^2`.
pub type BlockShape = ConstShape3i32<8, 8, 8>;
pub const BLOCK_EDGE: i32 = 8;
pub const BLOCK_EDGE_LOG2: i32 = 3;
pub const BLOCK_VOLUME: usize = BlockShape::USIZE;
pub const BLOCK_SHAPE_IVEC3: IVec3 = IVec3::splat(BLOCK_EDGE);
pub const BLOCK_SHAPE_LOG2_IVEC3: IVec3 = IVec3::splat(BLOCK_EDGE_LOG2);

const_assert_eq!(BLOCK_VOLUME, 512);
const_assert_eq!(1 << BLOCK_EDGE_LOG2, BLOCK_EDGE);

/// Contiguous storage of voxel blocks. Block `i` occupies `voxels[i * BLOCK_VOLUME..(i + 1) * BLOCK_VOLUME]`.
///
/// The allocator that fills this storage is external; readers only ever index into it.
#[derive(Clone, Debug)]
pub struct BlockStorage<V> {
    voxels: Box<[V]>,
}

impl<V: Voxel> BlockStorage<V> {
    pub fn from_voxels(voxels: Vec<V>) -> Result<Self, LayoutError> {
        if voxels.len() % BLOCK_VOLUME != 0 {
            return Err(LayoutError::StorageNotBlockAligned { len: voxels.len() });
        }
        Ok(Self {
            voxels: voxels.into_boxed_slice(),
        })
    }

    /// Copies voxels out of a byte buffer in the allocator's persisted layout. The buffer may have any alignment.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LayoutError>
    where
        V: Pod,
    {
        if bytes.len() % mem::size_of::<V>() != 0 {
            return Err(LayoutError::Cast(PodCastError::OutputSliceWouldHaveSlop));
        }
        Self::from_voxels(pod_collect_to_vec::<u8, V>(bytes))
    }

    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.voxels.len() / BLOCK_VOLUME
    }

    #[inline]
    pub fn voxels(&self) -> &[V] {
        &self.voxels
    }

    /// `base` must come from an occupied entry validated against [`Self::num_blocks`], and `offset < BLOCK_VOLUME`.
    #[inline]
    pub(crate) fn voxel(&self, base: usize, offset: usize) -> V {
        self.voxels[base + offset]
    }
}

/// Offset of block `index` in a [`BlockStorage`].
#[inline]
pub fn block_base(index: u32) -> usize {
    index as usize * BLOCK_VOLUME
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
