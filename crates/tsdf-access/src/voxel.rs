use crate::core::glam::Vec3A;
use crate::core::static_assertions::const_assert_eq;
use crate::sdf::{Sd16, AMBIENT_SD16};

use bytemuck::{Pod, Zeroable};
use std::mem;

/// A voxel payload stored in block storage.
///
/// [`Default`] must describe unobserved space. Readers substitute it for every sample they cannot resolve, so its
/// distance should be the truncation limit (`1.0`).
pub trait Voxel: Copy + Default + Send + Sync + 'static {
    /// The stored signed distance, converted to `f32`.
    fn sdf(&self) -> f32;
}

/// A [`Voxel`] that also carries color.
pub trait ColorVoxel: Voxel {
    /// RGB channels in `[0.0, 255.0]`.
    fn color(&self) -> Vec3A;
}

/// Quantized distance and an integration weight.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(C)]
pub struct VoxelS {
    pub sdf: Sd16,
    pub w_depth: u8,
    pub _padding: u8,
}

/// Quantized distance plus 8-bit RGB color.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(C)]
pub struct VoxelSRgb {
    pub sdf: Sd16,
    pub w_depth: u8,
    pub w_color: u8,
    pub clr: [u8; 3],
    pub _padding: u8,
}

/// Full-precision distance and an integration weight.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct VoxelF {
    pub sdf: f32,
    pub w_depth: u8,
    pub _padding: [u8; 3],
}

/// Full-precision distance plus 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct VoxelFRgb {
    pub sdf: f32,
    pub w_depth: u8,
    pub w_color: u8,
    pub clr: [u8; 3],
    pub _padding: [u8; 3],
}

const_assert_eq!(mem::size_of::<VoxelS>(), 4);
const_assert_eq!(mem::size_of::<VoxelSRgb>(), 8);
const_assert_eq!(mem::size_of::<VoxelF>(), 8);
const_assert_eq!(mem::size_of::<VoxelFRgb>(), 12);

unsafe impl Zeroable for VoxelS {}
unsafe impl Pod for VoxelS {}
unsafe impl Zeroable for VoxelSRgb {}
unsafe impl Pod for VoxelSRgb {}
unsafe impl Zeroable for VoxelF {}
unsafe impl Pod for VoxelF {}
unsafe impl Zeroable for VoxelFRgb {}
unsafe impl Pod for VoxelFRgb {}

impl Default for VoxelS {
    fn default() -> Self {
        Self {
            sdf: AMBIENT_SD16,
            w_depth: 0,
            _padding: 0,
        }
    }
}

impl Default for VoxelSRgb {
    fn default() -> Self {
        Self {
            sdf: AMBIENT_SD16,
            w_depth: 0,
            w_color: 0,
            clr: [0; 3],
            _padding: 0,
        }
    }
}

impl Default for VoxelF {
    fn default() -> Self {
        Self {
            sdf: 1.0,
            w_depth: 0,
            _padding: [0; 3],
        }
    }
}

impl Default for VoxelFRgb {
    fn default() -> Self {
        Self {
            sdf: 1.0,
            w_depth: 0,
            w_color: 0,
            clr: [0; 3],
            _padding: [0; 3],
        }
    }
}

impl VoxelS {
    pub fn new(sdf: f32, w_depth: u8) -> Self {
        Self {
            sdf: sdf.into(),
            w_depth,
            ..Self::default()
        }
    }
}

impl VoxelSRgb {
    pub fn new(sdf: f32, clr: [u8; 3]) -> Self {
        Self {
            sdf: sdf.into(),
            w_depth: 1,
            w_color: 1,
            clr,
            ..Self::default()
        }
    }
}

impl VoxelF {
    pub fn new(sdf: f32, w_depth: u8) -> Self {
        Self {
            sdf,
            w_depth,
            ..Self::default()
        }
    }
}

impl VoxelFRgb {
    pub fn new(sdf: f32, clr: [u8; 3]) -> Self {
        Self {
            sdf,
            w_depth: 1,
            w_color: 1,
            clr,
            ..Self::default()
        }
    }
}

impl Voxel for VoxelS {
    #[inline]
    fn sdf(&self) -> f32 {
        self.sdf.into()
    }
}

impl Voxel for VoxelSRgb {
    #[inline]
    fn sdf(&self) -> f32 {
        self.sdf.into()
    }
}

impl Voxel for VoxelF {
    #[inline]
    fn sdf(&self) -> f32 {
        self.sdf
    }
}

impl Voxel for VoxelFRgb {
    #[inline]
    fn sdf(&self) -> f32 {
        self.sdf
    }
}

#[inline]
fn rgb_to_vec3a([r, g, b]: [u8; 3]) -> Vec3A {
    Vec3A::new(r as f32, g as f32, b as f32)
}

impl ColorVoxel for VoxelSRgb {
    #[inline]
    fn color(&self) -> Vec3A {
        rgb_to_vec3a(self.clr)
    }
}

impl ColorVoxel for VoxelFRgb {
    #[inline]
    fn color(&self) -> Vec3A {
        rgb_to_vec3a(self.clr)
    }
}
