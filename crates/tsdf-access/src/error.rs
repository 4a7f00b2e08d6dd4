use bytemuck::PodCastError;
use thiserror::Error;

/// Why a raw snapshot or layout handed over by the allocator was rejected.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum LayoutError {
    #[error("hash layout needs at least one bucket")]
    ZeroBuckets,
    #[error("hash layout needs at least one entry per bucket")]
    ZeroEntriesPerBucket,
    #[error("hash layout has {num_levels} levels, expected 1..={max}")]
    LevelCount { num_levels: u8, max: u8 },
    #[error("plain array size {size:?} must be positive on every axis")]
    EmptyArray { size: [i32; 3] },
    #[error("plain array size {size:?} holds more voxels than fit in memory")]
    ArrayTooLarge { size: [i32; 3] },
    #[error("expected {expected} entries, got {actual}")]
    EntryCount { expected: usize, actual: usize },
    #[error("expected {expected} voxels, got {actual}")]
    VoxelCount { expected: usize, actual: usize },
    #[error("voxel storage of length {len} is not a whole number of blocks")]
    StorageNotBlockAligned { len: usize },
    #[error("entry {entry} points at block {block_index}, but storage only holds {num_blocks} blocks")]
    BlockOutOfRange {
        entry: usize,
        block_index: u32,
        num_blocks: usize,
    },
    #[error("entry {entry} chains to excess slot {chain_offset}, but the excess list holds {excess_list_size}")]
    ChainOutOfRange {
        entry: usize,
        chain_offset: u32,
        excess_list_size: u32,
    },
    #[error("entry {entry} is decomposed, which only the hierarchical hash supports")]
    UnexpectedDecomposed { entry: usize },
    #[error("excess list of level {level} is full")]
    ExcessListFull { level: u8 },
    #[error("voxel bytes could not be cast: {0:?}")]
    Cast(PodCastError),
}
