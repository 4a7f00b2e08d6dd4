use super::{BlockCache, Lookup, VoxelIndex};
use crate::config::PlainArrayLayout;
use crate::core::glam::{IVec3, Vec3A};
use crate::rounding::Rounding;
use crate::{LayoutError, Voxel};

/// A dense array covering a bounded box of voxels. No hashing, no caching.
#[derive(Clone, Debug)]
pub struct PlainVoxelArray<V> {
    layout: PlainArrayLayout,
    voxels: Box<[V]>,
}

impl<V: Voxel> PlainVoxelArray<V> {
    pub fn from_raw_parts(layout: PlainArrayLayout, voxels: Vec<V>) -> Result<Self, LayoutError> {
        let checked = layout.validate().and_then(|()| {
            if voxels.len() == layout.volume() {
                Ok(())
            } else {
                Err(LayoutError::VoxelCount {
                    expected: layout.volume(),
                    actual: voxels.len(),
                })
            }
        });
        if let Err(e) = checked {
            log::warn!("Rejected plain voxel array with {:?}: {}", layout, e);
            return Err(e);
        }
        log::debug!(
            "Plain voxel array at {} with size {}",
            layout.origin,
            layout.size
        );
        Ok(Self {
            layout,
            voxels: voxels.into_boxed_slice(),
        })
    }

    pub fn layout(&self) -> &PlainArrayLayout {
        &self.layout
    }

    /// Out-of-bounds coordinates are simply not found.
    #[inline]
    pub fn get(&self, voxel: IVec3) -> Option<V> {
        self.layout.linearize(voxel).map(|i| self.voxels[i])
    }
}

impl<V: Voxel> VoxelIndex<V> for PlainVoxelArray<V> {
    #[inline]
    fn read_voxel(&self, voxel: IVec3, cache: BlockCache) -> (Lookup<V>, BlockCache) {
        (lookup(self.get(voxel)), cache)
    }

    #[inline]
    fn read_rounded(&self, point: Vec3A, rounding: Rounding, cache: BlockCache) -> (Lookup<V>, BlockCache) {
        (lookup(self.get(rounding.voxel_at(point, 1))), cache)
    }
}

#[inline]
fn lookup<V: Voxel>(voxel: Option<V>) -> Lookup<V> {
    voxel.map_or_else(Lookup::not_found, Lookup::Found)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
