use crate::config::HashLayout;
use crate::core::glam::IVec3;

/// Multipliers of the spatial hash. Changing them changes where every block lives in existing tables.
pub const HASH_PRIMES: [u32; 3] = [73856093, 19349669, 83492791];

/// Maps block coordinates to a bucket in `[0, num_buckets)`. Identical for every hash variant and every level.
#[inline]
pub fn hash_index(block: IVec3, num_buckets: u32) -> u32 {
    let [px, py, pz] = HASH_PRIMES;
    let h = (block.x as u32).wrapping_mul(px) ^ (block.y as u32).wrapping_mul(py) ^ (block.z as u32).wrapping_mul(pz);
    h % num_buckets
}

/// What a hash entry says about its block coordinates.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EntryState {
    /// The slot holds nothing.
    #[default]
    Empty,
    /// The block is resident at this index of block storage.
    Occupied(u32),
    /// Hierarchical hash only: this level holds no data for the block; look at the next finer level.
    Decomposed,
}

impl EntryState {
    /// Decodes the allocator's persisted pointer: `>= 0` is a block index, `-2` is decomposed, anything else is empty.
    pub fn from_raw_ptr(ptr: i32) -> Self {
        match ptr {
            p if p >= 0 => EntryState::Occupied(p as u32),
            -2 => EntryState::Decomposed,
            _ => EntryState::Empty,
        }
    }

    pub fn into_raw_ptr(self) -> i32 {
        match self {
            EntryState::Empty => -1,
            EntryState::Occupied(i) => i as i32,
            EntryState::Decomposed => -2,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, EntryState::Empty)
    }

    #[inline]
    pub fn is_occupied(self) -> bool {
        matches!(self, EntryState::Occupied(_))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HashEntry {
    pub block: IVec3,
    pub state: EntryState,
    /// `1 +` the index of the next entry of this chain in the excess list; `0` ends the chain.
    pub chain_offset: u32,
}

impl HashEntry {
    pub const EMPTY: Self = Self {
        block: IVec3::ZERO,
        state: EntryState::Empty,
        chain_offset: 0,
    };

    pub fn new(block: IVec3, state: EntryState) -> Self {
        Self {
            block,
            state,
            chain_offset: 0,
        }
    }

    #[inline]
    pub fn next_excess(&self) -> Option<usize> {
        self.chain_offset.checked_sub(1).map(|i| i as usize)
    }
}

/// A read-only view of one level's table: ordered buckets followed by the excess list.
#[derive(Clone, Copy, Debug)]
pub struct HashTableView<'a> {
    layout: &'a HashLayout,
    entries: &'a [HashEntry],
}

impl<'a> HashTableView<'a> {
    pub fn new(layout: &'a HashLayout, entries: &'a [HashEntry]) -> Self {
        Self { layout, entries }
    }

    /// Finds the first entry for `block` that `accept`s, scanning the bucket slots in order and then the chain hanging
    /// off the last slot. The chain walk is bounded by the excess list length.
    pub fn find(&self, block: IVec3, mut accept: impl FnMut(EntryState) -> bool) -> Option<&'a HashEntry> {
        let bucket_len = self.layout.entries_per_bucket as usize;
        let bucket_start = hash_index(block, self.layout.num_buckets) as usize * bucket_len;
        let bucket = self.entries.get(bucket_start..bucket_start + bucket_len)?;

        let mut next_excess = None;
        for entry in bucket {
            next_excess = entry.next_excess();
            if entry.block == block && accept(entry.state) {
                return Some(entry);
            }
        }

        let excess = self.entries.get(self.layout.ordered_len()..)?;
        for _ in 0..excess.len() {
            let entry = excess.get(next_excess?)?;
            if entry.block == block && accept(entry.state) {
                return Some(entry);
            }
            next_excess = entry.next_excess();
        }

        None
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
