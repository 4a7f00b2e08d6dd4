use crate::core::glam::{Vec3A, Vec4};
use crate::index::{BlockCache, VoxelIndex};
use crate::interpolate::interpolate_color;
use crate::{Voxel, VoxelF, VoxelFRgb, VoxelS, VoxelSRgb};

/// Color reads for any voxel type. Types without color read as transparent black.
pub trait ColorReader: Voxel {
    fn read_color<I: VoxelIndex<Self> + ?Sized>(index: &I, point: Vec3A, cache: BlockCache) -> (Vec4, BlockCache);
}

macro_rules! impl_color_reader {
    (without_color: $($t:ty),*) => {
        $(
            impl ColorReader for $t {
                #[inline]
                fn read_color<I: VoxelIndex<Self> + ?Sized>(
                    _index: &I,
                    _point: Vec3A,
                    cache: BlockCache,
                ) -> (Vec4, BlockCache) {
                    (Vec4::ZERO, cache)
                }
            }
        )*
    };
    (with_color: $($t:ty),*) => {
        $(
            impl ColorReader for $t {
                #[inline]
                fn read_color<I: VoxelIndex<Self> + ?Sized>(
                    index: &I,
                    point: Vec3A,
                    cache: BlockCache,
                ) -> (Vec4, BlockCache) {
                    interpolate_color::<Self, I>(index, point, cache)
                }
            }
        )*
    };
}

impl_color_reader!(without_color: VoxelS, VoxelF);
impl_color_reader!(with_color: VoxelSRgb, VoxelFRgb);

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;
    use crate::block::{BlockStorage, BLOCK_VOLUME};
    use crate::builder::HashTableBuilder;
    use crate::core::approx::assert_relative_eq;
    use crate::core::glam::IVec3;
    use crate::fixtures;
    use crate::hash::EntryState;
    use crate::VoxelBlockHash;

    #[test]
    fn colorless_voxels_read_transparent_black() {
        let hash = fixtures::flat_hash(&[IVec3::ZERO], |_| 0.0);
        let (rgba, _) = VoxelF::read_color(&hash, Vec3A::new(2.5, 2.5, 2.5), BlockCache::default());
        assert_eq!(rgba, Vec4::ZERO);
    }

    #[test]
    fn quantized_color_voxels_interpolate_color() {
        let layout = fixtures::test_layout(1);
        let mut builder = HashTableBuilder::new(layout).unwrap();
        builder.insert(0, IVec3::ZERO, EntryState::Occupied(0)).unwrap();
        let voxels = vec![VoxelSRgb::new(-0.5, [0, 102, 255]); BLOCK_VOLUME];
        let storage = BlockStorage::from_voxels(voxels).unwrap();
        let hash = VoxelBlockHash::from_raw_parts(layout, builder.finish(), storage).unwrap();

        let (rgba, cache) = VoxelSRgb::read_color(&hash, Vec3A::new(3.5, 1.5, 6.25), BlockCache::default());
        assert_relative_eq!(rgba, Vec4::new(0.0, 0.4, 1.0, 1.0), epsilon = 1e-5);
        assert!(cache.is_warm());
    }
}
