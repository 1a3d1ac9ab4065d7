use crate::model::BlockId;

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Input validation errors. Once the graph is accepted the computation is total; internal
/// invariant violations are programming errors and panic instead of surfacing here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("entry block {0:#x} is not present in the block map")]
    MissingEntry(BlockId),

    #[error("edge from block {from:#x} targets unknown block {target:#x}")]
    MissingTarget { from: BlockId, target: BlockId },
}
