use super::Transformer;
use gap_domain::image::{Image, Rgb};
use gap_kernel::capability::ImageTransformer;
use gap_settings::{Argument, Builder, Node, SettingsError};
use std::sync::LazyLock;

/// Highest accepted reduce level.
pub const MAX_REDUCE_LEVEL: u32 = 128;

/// Clears the channel bits set in the reduce level, flattening gradients
/// into bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorReduce {
    mask: u8,
}

impl ColorReduce {
    /// Levels above [`MAX_REDUCE_LEVEL`] are clamped.
    #[must_use]
    pub fn new(reduce_level: u32) -> Self {
        let level = u8::try_from(reduce_level.min(MAX_REDUCE_LEVEL)).unwrap_or(u8::MAX);
        Self { mask: !level }
    }

    pub const fn reduce_level(&self) -> u32 {
        !self.mask as u32
    }
}

impl Default for ColorReduce {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ImageTransformer for ColorReduce {
    fn transform(&self, image: &Image) -> Image {
        let mask = self.mask;
        Image::from_fn(image.width(), image.height(), |x, y| {
            let c = image.get(x, y).unwrap_or_default();
            Rgb::new(c.r & mask, c.g & mask, c.b & mask)
        })
    }

    fn settings(&self) -> Result<Builder<Transformer>, SettingsError> {
        SETTINGS.clone()
    }
}

static SETTINGS: LazyLock<Result<Builder<Transformer>, SettingsError>> = LazyLock::new(|| {
    let node = Node::<Transformer>::new("color_reduce")
        .argument("reduce_level", Argument::unsigned_integer(0..=MAX_REDUCE_LEVEL))?
        .constructs(|ctx| Ok(Box::new(ColorReduce::new(ctx.get("reduce_level")?))));
    Builder::new("color_reduce").with_nodes([node])
});
