//! The three index variants and the read protocol they share.

mod block_hash;
mod hierarchy;
mod plain;

pub use block_hash::VoxelBlockHash;
pub use hierarchy::VoxelBlockHHash;
pub use plain::PlainVoxelArray;

use crate::core::glam::{IVec3, Vec3A};
use crate::gradient::regular_stencil_normal;
use crate::rounding::Rounding;
use crate::Voxel;

/// Memo of the most recently resolved block.
///
/// Created fresh for each logical query and threaded through consecutive reads by value; it is never shared between
/// queries. A default cache never hits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BlockCache {
    block: Option<CachedBlock>,
    voxel_size: i32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct CachedBlock {
    coords: IVec3,
    base: usize,
}

impl Default for BlockCache {
    fn default() -> Self {
        Self {
            block: None,
            voxel_size: 1,
        }
    }
}

impl BlockCache {
    #[inline]
    pub(crate) fn remember(coords: IVec3, base: usize, voxel_size: i32) -> Self {
        Self {
            block: Some(CachedBlock { coords, base }),
            voxel_size,
        }
    }

    /// The storage base offset of `coords` if it is the cached block.
    #[inline]
    pub(crate) fn hit(&self, coords: IVec3) -> Option<usize> {
        self.block.filter(|b| b.coords == coords).map(|b| b.base)
    }

    /// Edge length, in finest-level voxels, of the voxels in the most recently resolved block.
    ///
    /// Reads that find nothing leave it unchanged.
    #[inline]
    pub fn voxel_size(&self) -> i32 {
        self.voxel_size
    }

    #[inline]
    pub fn is_warm(&self) -> bool {
        self.block.is_some()
    }
}

/// The outcome of a read. Reads never fail; when nothing is stored the substitute for unobserved space is carried
/// along instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound(T),
}

impl<T> Lookup<T> {
    #[inline]
    pub fn not_found() -> Self
    where
        T: Default,
    {
        Lookup::NotFound(T::default())
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// The found value, or the default that stands in for it.
    #[inline]
    pub fn value_or_default(self) -> T {
        match self {
            Lookup::Found(v) | Lookup::NotFound(v) => v,
        }
    }

    #[inline]
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::NotFound(_) => None,
        }
    }

    #[inline]
    pub fn map<S>(self, f: impl FnOnce(T) -> S) -> Lookup<S> {
        match self {
            Lookup::Found(v) => Lookup::Found(f(v)),
            Lookup::NotFound(v) => Lookup::NotFound(f(v)),
        }
    }
}

/// Read access to a frozen snapshot of voxel storage.
///
/// Every method is a pure function of the snapshot, the arguments, and the cache passed in. The returned cache may be
/// passed to the next read to skip the hash scan for nearby points.
pub trait VoxelIndex<V: Voxel>: Sync {
    /// Reads the voxel at integer coordinates `voxel` (finest-level units).
    fn read_voxel(&self, voxel: IVec3, cache: BlockCache) -> (Lookup<V>, BlockCache);

    /// Reads the voxel that `point` rounds to under `rounding`. The returned cache reports the voxel size the read
    /// resolved at.
    fn read_rounded(&self, point: Vec3A, rounding: Rounding, cache: BlockCache) -> (Lookup<V>, BlockCache);

    /// Estimates the (unnormalized) SDF gradient at `point`.
    fn compute_normal(&self, point: Vec3A) -> Vec3A {
        regular_stencil_normal::<V, Self>(self, point)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
