//! Vanilla image generators.

mod stripes;
mod white_noise;

pub use stripes::Stripes;
pub use white_noise::{ColorModel, WhiteNoise, WhiteNoisePreset};

use gap_kernel::capability::{CapabilityType, ImageGenerator};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// What every vanilla generator builder produces.
pub type Generator = Box<dyn ImageGenerator>;

pub(crate) const MIN_SIDE: u32 = 128;
pub(crate) const MAX_SIDE: u32 = 16_384;

/// Every generator the `gap` mod registers.
pub fn all() -> [CapabilityType<dyn ImageGenerator>; 2] {
    [CapabilityType::of::<WhiteNoise>("WhiteNoise"), CapabilityType::of::<Stripes>("Stripes")]
}

fn rng(seed: i32) -> StdRng {
    StdRng::seed_from_u64(i64::from(seed) as u64)
}
