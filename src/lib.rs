//! Point queries against a frozen sparse TSDF snapshot.
//!
//! This crate bundles the readers of [`tsdf_access`] with layout configuration and batch queries. A typical session
//! loads a [`Config`], builds an index from the allocator's raw parts, and then samples it from as many threads as
//! needed:
//!
//! ```no_run
//! use tsdf_index::{
//!     interpolate_sdf, BlockCache, BlockStorage, Config, HashEntry, VoxelBlockHash, VoxelIndex, VoxelS,
//! };
//! use tsdf_index::core::glam::Vec3A;
//!
//! # fn load() -> (Vec<HashEntry>, Vec<VoxelS>) { unimplemented!() }
//! let config = Config::read_file("tsdf.ron").unwrap();
//! let (entries, voxels) = load();
//! let index = VoxelBlockHash::from_raw_parts(
//!     config.hash,
//!     entries,
//!     BlockStorage::from_voxels(voxels).unwrap(),
//! )
//! .unwrap();
//!
//! let (distance, cache) = interpolate_sdf(&index, Vec3A::new(1.5, 2.0, 0.25), BlockCache::default());
//! let normal = index.compute_normal(Vec3A::new(1.5, 2.0, 0.25));
//! ```

pub mod batch;
mod config;

pub use config::{Config, ConfigError};

pub use tsdf_access::*;

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
