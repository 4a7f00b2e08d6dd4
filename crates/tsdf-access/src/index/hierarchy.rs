use super::block_hash::check_tables;
use super::{BlockCache, Lookup, VoxelIndex};
use crate::block::{block_base, BlockStorage};
use crate::config::HashLayout;
use crate::coordinates::parse_voxel;
use crate::core::glam::{IVec3, Vec3A};
use crate::gradient::adaptive_normal;
use crate::hash::{EntryState, HashEntry, HashTableView};
use crate::rounding::Rounding;
use crate::units::*;
use crate::{LayoutError, Voxel};

/// A stack of spatial hashes, one per resolution level. Level `l` stores blocks of `8³` voxels with edge length `2^l`.
///
/// A block coordinate marked [`EntryState::Decomposed`] at some level holds no data there; its contents were refined
/// into the next finer level.
#[derive(Clone, Debug)]
pub struct VoxelBlockHHash<V> {
    layout: HashLayout,
    entries: Box<[HashEntry]>,
    blocks: BlockStorage<V>,
}

impl<V: Voxel> VoxelBlockHHash<V> {
    /// `entries` holds the tables of all levels back to back, finest first.
    pub fn from_raw_parts(
        layout: HashLayout,
        entries: Vec<HashEntry>,
        blocks: BlockStorage<V>,
    ) -> Result<Self, LayoutError> {
        check_tables(&layout, &entries, blocks.num_blocks(), layout.num_levels)?;

        log::debug!(
            "Hierarchical voxel block hash with {} levels of {} buckets x {} slots, {} resident blocks",
            layout.num_levels,
            layout.num_buckets,
            layout.entries_per_bucket,
            blocks.num_blocks()
        );

        Ok(Self {
            layout,
            entries: entries.into_boxed_slice(),
            blocks,
        })
    }

    pub fn layout(&self) -> &HashLayout {
        &self.layout
    }

    pub fn blocks(&self) -> &BlockStorage<V> {
        &self.blocks
    }

    pub fn num_levels(&self) -> u8 {
        self.layout.num_levels
    }

    /// The table of `level`. Panics if `level >= self.num_levels()`.
    pub fn level_table(&self, level: u8) -> HashTableView<'_> {
        let len = self.layout.entries_per_level();
        let start = level as usize * len;
        HashTableView::new(&self.layout, &self.entries[start..start + len])
    }
}

impl<V: Voxel> VoxelBlockHHash<V> {
    fn read_target(&self, target: Target, cache: BlockCache) -> (Lookup<V>, BlockCache) {
        if cache.is_warm() {
            let voxel = target.voxel_at(cache.voxel_size().trailing_zeros());
            let (BlockUnits(block), offset) = parse_voxel(VoxelUnits(voxel));
            if let Some(base) = cache.hit(block) {
                return (Lookup::Found(self.blocks.voxel(base, offset)), cache);
            }
        }

        let max_level = self.layout.num_levels - 1;
        let mut level = 0u8;
        let mut target = target;
        // Each step moves one level up or down, and descending and ascending can alternate forever on an inconsistent
        // table, so cap the walk.
        for _ in 0..2 * self.layout.num_levels as usize {
            let voxel = target.voxel_at(level as u32);
            let (BlockUnits(block), offset) = parse_voxel(VoxelUnits(voxel));

            match self.level_table(level).find(block, |s| !s.is_empty()).map(|e| e.state) {
                Some(EntryState::Occupied(index)) => {
                    let base = block_base(index);
                    return (
                        Lookup::Found(self.blocks.voxel(base, offset)),
                        BlockCache::remember(block, base, 1 << level),
                    );
                }
                Some(EntryState::Decomposed) => {
                    if level == 0 {
                        break;
                    }
                    target = target.snapped(voxel, level as u32);
                    level -= 1;
                }
                _ => {
                    if level == max_level {
                        break;
                    }
                    level += 1;
                }
            }
        }

        (Lookup::not_found(), cache)
    }
}

impl<V: Voxel> VoxelIndex<V> for VoxelBlockHHash<V> {
    #[inline]
    fn read_voxel(&self, voxel: IVec3, cache: BlockCache) -> (Lookup<V>, BlockCache) {
        self.read_target(Target::Voxel(voxel), cache)
    }

    #[inline]
    fn read_rounded(&self, point: Vec3A, rounding: Rounding, cache: BlockCache) -> (Lookup<V>, BlockCache) {
        self.read_target(Target::Point(point, rounding), cache)
    }

    fn compute_normal(&self, point: Vec3A) -> Vec3A {
        adaptive_normal::<V, Self>(self, point)
    }
}

/// What a read resolves on the grid of each level.
#[derive(Clone, Copy, Debug)]
enum Target {
    /// A continuous point in finest-level voxel units, snapped onto each grid with its rounding.
    Point(Vec3A, Rounding),
    /// An exact finest-level voxel. Kept in integers so that coordinates beyond `f32` precision still resolve.
    Voxel(IVec3),
}

impl Target {
    /// The voxel containing this target on the grid of voxels with edge length `2^level`.
    #[inline]
    fn voxel_at(self, level: u32) -> IVec3 {
        match self {
            Target::Point(point, rounding) => rounding.voxel_at(point, 1 << level),
            Target::Voxel(voxel) => voxel >> level as i32,
        }
    }

    /// This target moved onto the minimum corner of `voxel`, a voxel of the grid at `level`.
    #[inline]
    fn snapped(self, voxel: IVec3, level: u32) -> Self {
        match self {
            Target::Point(_, rounding) => Target::Point(voxel.as_vec3a() * (1 << level) as f32, rounding),
            Target::Voxel(_) => Target::Voxel(voxel << level as i32),
        }
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;
    use crate::block::BLOCK_VOLUME;
    use crate::builder::HashTableBuilder;
    use crate::VoxelF;

    fn layout(num_levels: u8) -> HashLayout {
        HashLayout {
            num_buckets: 16,
            entries_per_bucket: 1,
            excess_list_size: 8,
            num_levels,
        }
    }

    fn voxel_value(block_index: usize, offset: usize) -> f32 {
        (block_index * BLOCK_VOLUME + offset) as f32
    }

    /// Builds a hierarchy from `(level, block, state)` triples. Occupied indices must count up from 0.
    fn build(num_levels: u8, entries: &[(u8, IVec3, EntryState)]) -> VoxelBlockHHash<VoxelF> {
        let layout = layout(num_levels);
        let mut builder = HashTableBuilder::new(layout).unwrap();
        let mut voxels = Vec::new();
        for &(level, block, state) in entries {
            builder.insert(level, block, state).unwrap();
            if let EntryState::Occupied(i) = state {
                assert_eq!(i as usize * BLOCK_VOLUME, voxels.len());
                voxels.extend((0..BLOCK_VOLUME).map(|o| VoxelF::new(voxel_value(i as usize, o), 1)));
            }
        }
        let storage = BlockStorage::from_voxels(voxels).unwrap();
        VoxelBlockHHash::from_raw_parts(layout, builder.finish(), storage).unwrap()
    }

    #[test]
    fn coarse_only_block_is_found_across_its_footprint() {
        let index = build(3, &[(2, IVec3::ZERO, EntryState::Occupied(0))]);

        // Level 2 voxels are 4 wide, so this block spans [0, 32) on every axis.
        for (point, offset) in [
            (Vec3A::new(0.0, 0.0, 0.0), 0),
            (Vec3A::new(5.0, 9.0, 13.0), 1 + 2 * 8 + 3 * 64),
            (Vec3A::new(31.9, 31.9, 31.9), BLOCK_VOLUME - 1),
        ] {
            let (voxel, cache) = index.read_rounded(point, Rounding::FLOOR, BlockCache::default());
            assert_eq!(voxel.found().unwrap().sdf, voxel_value(0, offset), "{}", point);
            assert_eq!(cache.voxel_size(), 4);
        }

        let (voxel, _) = index.read_rounded(Vec3A::new(32.0, 0.0, 0.0), Rounding::FLOOR, BlockCache::default());
        assert!(!voxel.is_found());
    }

    #[test]
    fn finer_level_wins_over_decomposed_coarse_block() {
        let index = build(
            2,
            &[
                (1, IVec3::ZERO, EntryState::Decomposed),
                (0, IVec3::ZERO, EntryState::Occupied(0)),
            ],
        );
        let (voxel, cache) = index.read_voxel(IVec3::new(3, 2, 1), BlockCache::default());
        assert_eq!(voxel.found().unwrap().sdf, voxel_value(0, 3 + 2 * 8 + 64));
        assert_eq!(cache.voxel_size(), 1);
    }

    #[test]
    fn decomposed_entry_redirects_to_finer_level() {
        let index = build(
            2,
            &[
                (1, IVec3::new(1, 0, 0), EntryState::Decomposed),
                (0, IVec3::new(2, 0, 0), EntryState::Occupied(0)),
            ],
        );
        // At level 0 the point rounds into block 1, which is absent. Level 1 says block 1 was refined, and the point
        // snapped onto the level 1 grid lands on voxel 16, inside the resident level 0 block 2.
        let rounding = Rounding::CORNERS[1];
        let (voxel, cache) = index.read_rounded(Vec3A::new(14.5, 0.2, 0.2), rounding, BlockCache::default());
        assert_eq!(voxel.found().unwrap().sdf, voxel_value(0, 0));
        assert_eq!(cache.voxel_size(), 1);
    }

    #[test]
    fn no_entries_anywhere_is_not_found() {
        let index = build(3, &[]);
        let cache = BlockCache::default();
        let (voxel, returned) = index.read_voxel(IVec3::new(-40, 7, 1000), cache);
        assert_eq!(voxel, Lookup::NotFound(VoxelF::default()));
        assert_eq!(returned, cache);
    }

    #[test]
    fn dangling_decomposed_entries_terminate() {
        // Decomposed all the way down, with nothing resident.
        let index = build(
            3,
            &[
                (2, IVec3::ZERO, EntryState::Decomposed),
                (1, IVec3::ZERO, EntryState::Decomposed),
                (0, IVec3::ZERO, EntryState::Decomposed),
            ],
        );
        let (voxel, _) = index.read_voxel(IVec3::new(1, 1, 1), BlockCache::default());
        assert!(!voxel.is_found());
    }

    #[test]
    fn cache_hit_matches_cache_miss() {
        let index = build(
            3,
            &[
                (0, IVec3::ZERO, EntryState::Occupied(0)),
                (1, IVec3::new(1, 0, 0), EntryState::Occupied(1)),
                (2, IVec3::new(0, 1, 0), EntryState::Occupied(2)),
            ],
        );

        let points = [
            Vec3A::new(1.5, 2.5, 3.5),
            Vec3A::new(17.0, 3.0, 3.0),
            Vec3A::new(30.2, 15.9, 0.1),
            Vec3A::new(3.0, 40.0, 20.0),
            Vec3A::new(3.5, 33.0, 20.0),
            Vec3A::new(-1.0, -1.0, -1.0),
        ];
        let mut cache = BlockCache::default();
        for p in points {
            let (cold, _) = index.read_rounded(p, Rounding::FLOOR, BlockCache::default());
            let (warm, next) = index.read_rounded(p, Rounding::FLOOR, cache);
            assert_eq!(cold, warm, "{}", p);
            cache = next;
        }
    }

    #[test]
    fn rejects_wrong_total_entry_count() {
        let layout = layout(2);
        let storage = BlockStorage::<VoxelF>::from_voxels(Vec::new()).unwrap();
        let entries = vec![HashEntry::EMPTY; layout.entries_per_level()];
        let err = VoxelBlockHHash::from_raw_parts(layout, entries, storage).unwrap_err();
        assert_eq!(
            err,
            LayoutError::EntryCount {
                expected: 48,
                actual: 24
            }
        );
    }

    #[test]
    fn integer_reads_resolve_beyond_float_precision() {
        // 2^25 + 1 has no exact f32 representation.
        let far = (1 << 25) + 1;
        let index = build(2, &[(0, IVec3::new(far >> 3, 0, 0), EntryState::Occupied(0))]);

        let (voxel, cache) = index.read_voxel(IVec3::new(far, 3, 0), BlockCache::default());
        assert_eq!(voxel.found().unwrap().sdf, voxel_value(0, 1 + 3 * 8));

        let (voxel, _) = index.read_voxel(IVec3::new(far + 2, 3, 0), cache);
        assert_eq!(voxel.found().unwrap().sdf, voxel_value(0, 3 + 3 * 8));
    }

    #[test]
    fn integer_reads_floor_negative_voxels_onto_coarse_levels() {
        let index = build(3, &[(1, IVec3::new(-1, 0, 0), EntryState::Occupied(0))]);
        // Finest voxel (-9, 5, 0) is level 1 voxel (-5, 2, 0), at offset (3, 2, 0) in level 1 block -1.
        let (voxel, cache) = index.read_voxel(IVec3::new(-9, 5, 0), BlockCache::default());
        assert_eq!(voxel.found().unwrap().sdf, voxel_value(0, 3 + 2 * 8));
        assert_eq!(cache.voxel_size(), 2);

        let (float_voxel, _) = index.read_rounded(Vec3A::new(-9.0, 5.0, 0.0), Rounding::FLOOR, BlockCache::default());
        assert_eq!(float_voxel, voxel);
    }
}
