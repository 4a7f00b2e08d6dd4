use crate::config::HashLayout;
use crate::core::glam::IVec3;
use crate::hash::{hash_index, EntryState, HashEntry};
use crate::LayoutError;

/// Assembles hash table entries in the layout the readers expect.
///
/// This is a minimal single-threaded writer for tools and tests. It fills bucket slots first, then links overflow entries
/// into the excess list. It never removes, rehashes, or grows a table; live allocation belongs to the fusion pipeline.
pub struct HashTableBuilder {
    layout: HashLayout,
    entries: Vec<HashEntry>,
    excess_used: Vec<u32>,
}

impl HashTableBuilder {
    pub fn new(layout: HashLayout) -> Result<Self, LayoutError> {
        layout.validate()?;
        Ok(Self {
            layout,
            entries: vec![HashEntry::EMPTY; layout.entries_per_level() * layout.num_levels as usize],
            excess_used: vec![0; layout.num_levels as usize],
        })
    }

    pub fn layout(&self) -> &HashLayout {
        &self.layout
    }

    /// Writes `(block, state)` into the table of `level`.
    pub fn insert(&mut self, level: u8, block: IVec3, state: EntryState) -> Result<&mut Self, LayoutError> {
        if level >= self.layout.num_levels {
            return Err(LayoutError::LevelCount {
                num_levels: level + 1,
                max: self.layout.num_levels,
            });
        }
        let level_start = level as usize * self.layout.entries_per_level();
        let bucket_len = self.layout.entries_per_bucket as usize;
        let bucket_start = level_start + hash_index(block, self.layout.num_buckets) as usize * bucket_len;

        let entry = HashEntry::new(block, state);
        if let Some(slot) = self.entries[bucket_start..bucket_start + bucket_len]
            .iter_mut()
            .find(|e| e.state.is_empty())
        {
            slot.block = block;
            slot.state = state;
            return Ok(self);
        }

        let used = &mut self.excess_used[level as usize];
        if *used >= self.layout.excess_list_size {
            return Err(LayoutError::ExcessListFull { level });
        }
        let new_excess = *used;
        *used += 1;

        // Append to the end of the chain hanging off the last bucket slot.
        let excess_start = level_start + self.layout.ordered_len();
        let mut tail = bucket_start + bucket_len - 1;
        while let Some(next) = self.entries[tail].next_excess() {
            tail = excess_start + next;
        }
        self.entries[tail].chain_offset = new_excess + 1;
        self.entries[excess_start + new_excess as usize] = entry;

        Ok(self)
    }

    pub fn finish(self) -> Vec<HashEntry> {
        self.entries
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
