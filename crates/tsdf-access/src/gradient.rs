//! Finite-difference gradients of the distance field. The results are not normalized.

use crate::core::glam::{IVec3, Vec3A};
use crate::index::{BlockCache, VoxelIndex};
use crate::interpolate::{interpolate_sdf, lerp};
use crate::rounding::Rounding;
use crate::Voxel;

/// Central difference `f(p + e) - f(p - e)` per axis on a unit grid.
///
/// Reads the 8 corners of the cell containing `point` once, plus the 4-voxel faces one step behind and two steps ahead
/// of the cell along each axis. Every face is blended bilinearly with the fractional position of `point`.
pub fn regular_stencil_normal<V, I>(index: &I, point: Vec3A) -> Vec3A
where
    V: Voxel,
    I: VoxelIndex<V> + ?Sized,
{
    let floor = point.floor();
    let c = point - floor;
    // Saturates outside the i32 grid, and so do the stencil offsets below.
    let base = floor.as_ivec3();

    let mut cache = BlockCache::default();
    let mut sdf_at = |voxel: IVec3| {
        let (lookup, next) = index.read_voxel(voxel, cache);
        cache = next;
        lookup.value_or_default().sdf()
    };

    let at = |offset: IVec3| base.saturating_add(offset);
    let cell: [f32; 8] = std::array::from_fn(|i| sdf_at(at(corner_offset(i))));

    let mut gradient = Vec3A::ZERO;
    for axis in 0..3 {
        let (u, w) = ((axis + 1) % 3, (axis + 2) % 3);
        let face = |v: [f32; 4]| lerp(lerp(v[0], v[1], c[u]), lerp(v[2], v[3], c[u]), c[w]);
        let across = |j: usize| IVec3::AXES[u] * (j & 1) as i32 + IVec3::AXES[w] * (j >> 1) as i32;

        let near = face(std::array::from_fn(|j| cell[((j & 1) << u) | ((j >> 1) << w)]));
        let far = face(std::array::from_fn(|j| cell[(1 << axis) | ((j & 1) << u) | ((j >> 1) << w)]));
        let behind = face(std::array::from_fn(|j| sdf_at(at(across(j) - IVec3::AXES[axis]))));
        let ahead = face(std::array::from_fn(|j| sdf_at(at(across(j) + IVec3::AXES[axis] * 2))));

        let t = c[axis];
        gradient[axis] = lerp(far, ahead, t) - lerp(behind, near, t);
    }
    gradient
}

/// Central difference `f(p + s·e) - f(p - s·e)` per axis of the interpolated field, where `s` is the voxel size that
/// `point` resolves to. Coarse regions take proportionally wider steps.
pub fn adaptive_normal<V, I>(index: &I, point: Vec3A) -> Vec3A
where
    V: Voxel,
    I: VoxelIndex<V> + ?Sized,
{
    let (_, mut cache) = index.read_rounded(point, Rounding::FLOOR, BlockCache::default());
    let step = cache.voxel_size() as f32;

    let mut sdf_at = |p: Vec3A| {
        let (sample, next) = interpolate_sdf::<V, I>(index, p, cache);
        cache = next;
        sample.value_or_default()
    };

    let mut gradient = Vec3A::ZERO;
    for (axis, e) in Vec3A::AXES.into_iter().enumerate() {
        gradient[axis] = sdf_at(point + e * step) - sdf_at(point - e * step);
    }
    gradient
}

#[inline]
fn corner_offset(i: usize) -> IVec3 {
    IVec3::new((i & 1) as i32, ((i >> 1) & 1) as i32, ((i >> 2) & 1) as i32)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
