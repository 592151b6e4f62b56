//! Vanilla image transformers.

mod color_reduce;
mod pixelize;

pub use color_reduce::{ColorReduce, MAX_REDUCE_LEVEL};
pub use pixelize::{PixelType, Pixelize};

use gap_kernel::capability::{CapabilityType, ImageTransformer};

/// What every vanilla transformer builder produces.
pub type Transformer = Box<dyn ImageTransformer>;

/// Every transformer the `gap` mod registers.
pub fn all() -> [CapabilityType<dyn ImageTransformer>; 2] {
    [CapabilityType::of::<Pixelize>("Pixelize"), CapabilityType::of::<ColorReduce>("ColorReduce")]
}
