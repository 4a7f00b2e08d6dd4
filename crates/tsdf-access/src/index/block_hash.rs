use super::{BlockCache, Lookup, VoxelIndex};
use crate::block::{block_base, BlockStorage};
use crate::config::HashLayout;
use crate::coordinates::parse_voxel;
use crate::core::glam::{IVec3, Vec3A};
use crate::hash::{EntryState, HashEntry, HashTableView};
use crate::rounding::Rounding;
use crate::units::*;
use crate::{LayoutError, Voxel};

/// A single-level spatial hash of voxel blocks with chained overflow.
#[derive(Clone, Debug)]
pub struct VoxelBlockHash<V> {
    layout: HashLayout,
    entries: Box<[HashEntry]>,
    blocks: BlockStorage<V>,
}

impl<V: Voxel> VoxelBlockHash<V> {
    /// Adopts a table and storage produced by the allocator, after checking that every entry can be followed safely.
    pub fn from_raw_parts(
        layout: HashLayout,
        entries: Vec<HashEntry>,
        blocks: BlockStorage<V>,
    ) -> Result<Self, LayoutError> {
        check_tables(&layout, &entries, blocks.num_blocks(), 1)?;

        log::debug!(
            "Voxel block hash with {} buckets x {} slots, {} excess entries, {} resident blocks",
            layout.num_buckets,
            layout.entries_per_bucket,
            layout.excess_list_size,
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

    pub fn table(&self) -> HashTableView<'_> {
        HashTableView::new(&self.layout, &self.entries)
    }
}

impl<V: Voxel> VoxelIndex<V> for VoxelBlockHash<V> {
    fn read_voxel(&self, voxel: IVec3, cache: BlockCache) -> (Lookup<V>, BlockCache) {
        let (BlockUnits(block), offset) = parse_voxel(VoxelUnits(voxel));

        if let Some(base) = cache.hit(block) {
            return (Lookup::Found(self.blocks.voxel(base, offset)), cache);
        }

        match self.table().find(block, EntryState::is_occupied).map(|e| e.state) {
            Some(EntryState::Occupied(index)) => {
                let base = block_base(index);
                (Lookup::Found(self.blocks.voxel(base, offset)), BlockCache::remember(block, base, 1))
            }
            _ => (Lookup::not_found(), cache),
        }
    }

    #[inline]
    fn read_rounded(&self, point: Vec3A, rounding: Rounding, cache: BlockCache) -> (Lookup<V>, BlockCache) {
        self.read_voxel(rounding.voxel_at(point, 1), cache)
    }
}

/// Checks that `entries` holds `num_levels` back-to-back tables whose block pointers and chain offsets can be followed
/// safely. Only a hierarchy (`num_levels > 1`) may hold decomposed entries.
pub(super) fn check_tables(
    layout: &HashLayout,
    entries: &[HashEntry],
    num_blocks: usize,
    num_levels: u8,
) -> Result<(), LayoutError> {
    let result = layout
        .validate()
        .and_then(|()| check_entry_count(layout, entries, num_levels))
        .and_then(|()| check_entries(layout, entries, num_blocks, num_levels > 1));
    if let Err(e) = &result {
        log::warn!("Rejected hash table with {:?}: {}", layout, e);
    }
    result
}

fn check_entry_count(layout: &HashLayout, entries: &[HashEntry], num_levels: u8) -> Result<(), LayoutError> {
    let expected = layout.entries_per_level() * num_levels as usize;
    if entries.len() != expected {
        return Err(LayoutError::EntryCount {
            expected,
            actual: entries.len(),
        });
    }
    Ok(())
}

fn check_entries(
    layout: &HashLayout,
    entries: &[HashEntry],
    num_blocks: usize,
    allow_decomposed: bool,
) -> Result<(), LayoutError> {
    for (i, entry) in entries.iter().enumerate() {
        match entry.state {
            EntryState::Occupied(block_index) if block_index as usize >= num_blocks => {
                return Err(LayoutError::BlockOutOfRange {
                    entry: i,
                    block_index,
                    num_blocks,
                });
            }
            EntryState::Decomposed if !allow_decomposed => {
                return Err(LayoutError::UnexpectedDecomposed { entry: i });
            }
            _ => {}
        }
        if entry.chain_offset > layout.excess_list_size {
            return Err(LayoutError::ChainOutOfRange {
                entry: i,
                chain_offset: entry.chain_offset,
                excess_list_size: layout.excess_list_size,
            });
        }
    }
    Ok(())
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
