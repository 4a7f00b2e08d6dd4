//! Blending the eight stored samples around a point.
//!
//! Corners are chosen by reading the point with each of the [`Rounding::CORNERS`] strategies. Each read reports the
//! voxel size it resolved at. When all eight agree, the samples form a regular cell and are blended trilinearly.
//! Otherwise (only possible in a [`VoxelBlockHHash`](crate::VoxelBlockHHash) at a resolution seam) the corners are
//! scattered, and an affine model with cross terms is fitted through them instead.

use crate::core::glam::{Vec3A, Vec4};
use crate::core::solve_linear_system;
use crate::index::{BlockCache, Lookup, VoxelIndex};
use crate::rounding::Rounding;
use crate::{ColorVoxel, Voxel};

use std::ops::{Add, Mul, Sub};

/// Coordinates lying exactly on the grid are pushed this far in the positive direction before choosing corners, so
/// that floor and ceiling pick distinct neighbors.
pub const GRID_NUDGE: f32 = 1e-4;

/// A field value that can be blended across a cell: a distance or a color.
pub trait Blend: Copy + Default + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self> {}

impl<T> Blend for T where T: Copy + Default + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T> {}

/// Trilinearly interpolated signed distance at `point`.
///
/// Found when at least one corner was found. Corners that were not found contribute the default voxel's distance.
pub fn interpolate_sdf<V, I>(index: &I, point: Vec3A, cache: BlockCache) -> (Lookup<f32>, BlockCache)
where
    V: Voxel,
    I: VoxelIndex<V> + ?Sized,
{
    interpolate_field(index, point, cache, |v: &V| v.sdf())
}

/// Interpolated color at `point` as normalized RGBA with opaque alpha.
pub fn interpolate_color<V, I>(index: &I, point: Vec3A, cache: BlockCache) -> (Vec4, BlockCache)
where
    V: ColorVoxel,
    I: VoxelIndex<V> + ?Sized,
{
    let (rgb, cache) = interpolate_field(index, point, cache, |v: &V| v.color());
    (rgb.value_or_default().extend(255.0) / 255.0, cache)
}

/// The distance stored at the voxel nearest to `point`, without blending.
pub fn read_sdf_uninterpolated<V, I>(index: &I, point: Vec3A, cache: BlockCache) -> (Lookup<f32>, BlockCache)
where
    V: Voxel,
    I: VoxelIndex<V> + ?Sized,
{
    let (voxel, cache) = index.read_rounded(point, Rounding::NEAREST, cache);
    (voxel.map(|v| v.sdf()), cache)
}

/// Interpolates any per-voxel quantity extracted by `field`.
pub fn interpolate_field<V, I, T>(
    index: &I,
    point: Vec3A,
    mut cache: BlockCache,
    field: impl Fn(&V) -> T,
) -> (Lookup<T>, BlockCache)
where
    V: Voxel,
    I: VoxelIndex<V> + ?Sized,
    T: Blend,
{
    let corner_point = nudge_off_grid(point);

    let mut values = [T::default(); 8];
    let mut sizes = [1; 8];
    let mut found = false;
    for (i, rounding) in Rounding::CORNERS.into_iter().enumerate() {
        let (voxel, next) = index.read_rounded(corner_point, rounding, cache);
        cache = next;
        found |= voxel.is_found();
        values[i] = field(&voxel.value_or_default());
        // A miss leaves the cache alone, so an unfound corner inherits the previous corner's size.
        sizes[i] = cache.voxel_size();
    }

    let value = if sizes.iter().all(|&s| s == sizes[0]) {
        trilinear(&values, point, sizes[0])
    } else {
        fit_irregular(&values, &sizes, corner_point, point).unwrap_or_else(|| {
            log::debug!("Singular corner system at {} with voxel sizes {:?}", point, sizes);
            trilinear(&values, point, sizes[0])
        })
    };

    let lookup = if found {
        Lookup::Found(value)
    } else {
        Lookup::NotFound(value)
    };
    (lookup, cache)
}

/// Blends the corner `values` of the regular cell of edge `voxel_size` containing `point`.
///
/// `values` are ordered like [`Rounding::CORNERS`].
pub fn trilinear<T: Blend>(values: &[T; 8], point: Vec3A, voxel_size: i32) -> T {
    let scaled = point / voxel_size as f32;
    let c = scaled - scaled.floor();

    let x00 = lerp(values[0], values[1], c.x);
    let x10 = lerp(values[2], values[3], c.x);
    let x01 = lerp(values[4], values[5], c.x);
    let x11 = lerp(values[6], values[7], c.x);

    lerp(lerp(x00, x10, c.y), lerp(x01, x11, c.y), c.z)
}

/// Fits `f(d) = c0·xyz + c1·yz + c2·xz + c3·z + c4·xy + c5·y + c6·x + v0` through corners resolved at mixed voxel
/// sizes, then evaluates it at `point`.
///
/// Corner `i` sits at `CORNERS[i]` applied to `corner_point` at `sizes[i]`, and `d` is measured from corner 0. Returns
/// `None` when the corners are too degenerate to determine the model.
pub fn fit_irregular<T: Blend>(values: &[T; 8], sizes: &[i32; 8], corner_point: Vec3A, point: Vec3A) -> Option<T> {
    let anchor = Rounding::CORNERS[0].snap(corner_point, sizes[0]);

    let mut a = [[0.0; 7]; 7];
    let mut b = [T::default(); 7];
    for r in 0..7 {
        let corner = Rounding::CORNERS[r + 1].snap(corner_point, sizes[r + 1]);
        a[r] = cross_terms(corner - anchor);
        b[r] = values[r + 1] - values[0];
    }
    let coeffs = solve_linear_system(a, b)?;

    let terms = cross_terms(point - anchor);
    Some(
        terms
            .into_iter()
            .zip(coeffs)
            .fold(values[0], |acc, (term, coeff)| acc + coeff * term),
    )
}

fn cross_terms(d: Vec3A) -> [f32; 7] {
    [d.x * d.y * d.z, d.y * d.z, d.x * d.z, d.z, d.x * d.y, d.y, d.x]
}

fn nudge_off_grid(point: Vec3A) -> Vec3A {
    Vec3A::select(point.cmpeq(point.round()), point + Vec3A::splat(GRID_NUDGE), point)
}

#[inline]
pub(crate) fn lerp<T: Blend>(a: T, b: T, t: f32) -> T {
    a * (1.0 - t) + b * t
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
