use crate::core::glam::{I64Vec3, IVec3};
use crate::LayoutError;

use serde::{Deserialize, Serialize};

/// Upper bound on hierarchy levels; level `l` stores voxels of edge length `2^l`.
pub const MAX_HIERARCHY_LEVELS: u8 = 16;

/// Table layout constants shared with the allocator that owns the hash tables.
///
/// A table holds `num_buckets * entries_per_bucket` ordered entries followed by `excess_list_size` overflow entries.
/// The hierarchical hash stores `num_levels` such tables back to back; the flat hash ignores `num_levels`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct HashLayout {
    pub num_buckets: u32,
    pub entries_per_bucket: u32,
    pub excess_list_size: u32,
    pub num_levels: u8,
}

impl Default for HashLayout {
    fn default() -> Self {
        Self {
            num_buckets: 0x100000,
            entries_per_bucket: 1,
            excess_list_size: 0x20000,
            num_levels: 3,
        }
    }
}

impl HashLayout {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.num_buckets == 0 {
            return Err(LayoutError::ZeroBuckets);
        }
        if self.entries_per_bucket == 0 {
            return Err(LayoutError::ZeroEntriesPerBucket);
        }
        if self.num_levels == 0 || self.num_levels > MAX_HIERARCHY_LEVELS {
            return Err(LayoutError::LevelCount {
                num_levels: self.num_levels,
                max: MAX_HIERARCHY_LEVELS,
            });
        }
        Ok(())
    }

    /// Number of entries addressed directly by bucket.
    #[inline]
    pub fn ordered_len(&self) -> usize {
        self.num_buckets as usize * self.entries_per_bucket as usize
    }

    /// Number of entries in one level's table, overflow included.
    #[inline]
    pub fn entries_per_level(&self) -> usize {
        self.ordered_len() + self.excess_list_size as usize
    }
}

/// The bounds of a dense voxel array: voxels `[origin, origin + size)` are stored, X-major.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct PlainArrayLayout {
    pub origin: IVec3,
    pub size: IVec3,
}

impl Default for PlainArrayLayout {
    fn default() -> Self {
        Self {
            origin: IVec3::new(-256, -256, 0),
            size: IVec3::splat(512),
        }
    }
}

impl PlainArrayLayout {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.size.cmple(IVec3::ZERO).any() {
            return Err(LayoutError::EmptyArray {
                size: self.size.to_array(),
            });
        }
        if self.checked_volume().is_none() {
            return Err(LayoutError::ArrayTooLarge {
                size: self.size.to_array(),
            });
        }
        Ok(())
    }

    /// Number of voxels, saturating at `usize::MAX` for layouts that [`Self::validate`] rejects.
    pub fn volume(&self) -> usize {
        self.checked_volume().unwrap_or(usize::MAX)
    }

    /// Number of voxels, or `None` when it does not fit in a `usize`.
    pub fn checked_volume(&self) -> Option<usize> {
        self.size
            .as_uvec3()
            .to_array()
            .iter()
            .try_fold(1usize, |acc, &s| acc.checked_mul(s as usize))
    }

    /// The linear index of `p`, or `None` when `p` lies outside the array.
    #[inline]
    pub fn linearize(&self, p: IVec3) -> Option<usize> {
        let local = p.as_i64vec3() - self.origin.as_i64vec3();
        if local.cmplt(I64Vec3::ZERO).any() || local.cmpge(self.size.as_i64vec3()).any() {
            return None;
        }
        let [x, y, z] = local.to_array().map(|c| c as usize);
        let [sx, sy, _] = self.size.as_uvec3().to_array().map(|c| c as usize);
        Some(x + y * sx + z * sx * sy)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
