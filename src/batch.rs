//! Many independent point queries against one snapshot.
//!
//! The parallel variants give every point its own fresh [`BlockCache`]. The sequential variants thread one cache through
//! the whole slice, which pays off when consecutive points are spatially coherent (e.g. samples along a ray).

use tsdf_access::core::glam::{IVec3, Vec3A};
use tsdf_access::{interpolate_sdf, BlockCache, Lookup, Voxel, VoxelIndex};

use rayon::prelude::*;

pub fn interpolate_sdf_batch<V, I>(index: &I, points: &[Vec3A]) -> Vec<Lookup<f32>>
where
    V: Voxel,
    I: VoxelIndex<V> + ?Sized,
{
    points
        .par_iter()
        .map(|&p| interpolate_sdf::<V, I>(index, p, BlockCache::default()).0)
        .collect()
}

pub fn compute_normals_batch<V, I>(index: &I, points: &[Vec3A]) -> Vec<Vec3A>
where
    V: Voxel,
    I: VoxelIndex<V> + ?Sized,
{
    points.par_iter().map(|&p| index.compute_normal(p)).collect()
}

pub fn read_voxels_batch<V, I>(index: &I, voxels: &[IVec3]) -> Vec<Lookup<V>>
where
    V: Voxel,
    I: VoxelIndex<V> + ?Sized,
{
    voxels
        .par_iter()
        .map(|&v| index.read_voxel(v, BlockCache::default()).0)
        .collect()
}

pub fn interpolate_sdf_sequential<V, I>(index: &I, points: &[Vec3A]) -> Vec<Lookup<f32>>
where
    V: Voxel,
    I: VoxelIndex<V> + ?Sized,
{
    let mut cache = BlockCache::default();
    points
        .iter()
        .map(|&p| {
            let (sample, next) = interpolate_sdf::<V, I>(index, p, cache);
            cache = next;
            sample
        })
        .collect()
}

pub fn read_voxels_sequential<V, I>(index: &I, voxels: &[IVec3]) -> Vec<Lookup<V>>
where
    V: Voxel,
    I: VoxelIndex<V> + ?Sized,
{
    let mut cache = BlockCache::default();
    voxels
        .iter()
        .map(|&v| {
            let (voxel, next) = index.read_voxel(v, cache);
            cache = next;
            voxel
        })
        .collect()
}
