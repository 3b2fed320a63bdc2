use cubelit_blocks::BlockId;
use cubelit_chunk::ChunkError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("neighbourhood unavailable: {0}")]
    Chunk(#[from] ChunkError),
    #[error("block id {id} is not in the block table")]
    UnknownBlockId { id: BlockId },
}
