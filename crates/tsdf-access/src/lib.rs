//! Read access to a sparse truncated signed distance field.
//!
//! Voxels are stored in blocks of `8³`. Three indices resolve points to stored voxels:
//!
//! - [`PlainVoxelArray`]: a dense, bounded array.
//! - [`VoxelBlockHash`]: a spatial hash of blocks with chained overflow.
//! - [`VoxelBlockHHash`]: a stack of spatial hashes with coarser voxels at each level.
//!
//! All of them implement [`VoxelIndex`], on top of which [`interpolate`], [`gradient`] and [`color`] build continuous
//! queries. Every index is an immutable snapshot; any number of threads may query one concurrently, each threading its
//! own [`BlockCache`] through consecutive reads.

pub mod block;
pub mod builder;
pub mod color;
pub mod config;
pub mod coordinates;
pub mod error;
pub mod gradient;
pub mod hash;
pub mod index;
pub mod interpolate;
pub mod rounding;
pub mod sdf;
pub mod units;
pub mod voxel;

#[cfg(test)]
mod fixtures;

pub use block::{BlockStorage, BLOCK_EDGE, BLOCK_VOLUME};
pub use builder::HashTableBuilder;
pub use color::ColorReader;
pub use config::{HashLayout, PlainArrayLayout};
pub use error::LayoutError;
pub use hash::{EntryState, HashEntry};
pub use index::{BlockCache, Lookup, PlainVoxelArray, VoxelBlockHHash, VoxelBlockHash, VoxelIndex};
pub use interpolate::{interpolate_color, interpolate_sdf, read_sdf_uninterpolated};
pub use rounding::{Round, Rounding};
pub use sdf::{Sd16, AMBIENT_SD16};
pub use voxel::{ColorVoxel, Voxel, VoxelF, VoxelFRgb, VoxelS, VoxelSRgb};

pub use tsdf_core as core;
