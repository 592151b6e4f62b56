use super::Transformer;
use gap_domain::image::{Image, Rgb};
use gap_kernel::capability::ImageTransformer;
use gap_settings::{Argument, Builder, Node, SettingsError};
use std::sync::LazyLock;
use strum_macros::{Display, EnumString, VariantNames};

/// Sub-pixel layout used by [`Pixelize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, VariantNames)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PixelType {
    /// Three vertical red, green and blue bars per pixel.
    #[default]
    Stripes,
    /// A 2x2 block: red, two half-strength greens, blue.
    Squares,
}

impl PixelType {
    pub const fn scale(self) -> u32 {
        match self {
            Self::Stripes => 3,
            Self::Squares => 2,
        }
    }
}

/// Mimics a screen's sub-pixels by blowing each pixel up into colored
/// channel cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixelize {
    pixel_type: PixelType,
}

impl Pixelize {
    #[must_use]
    pub const fn new(pixel_type: PixelType) -> Self {
        Self { pixel_type }
    }

    pub const fn pixel_type(&self) -> PixelType {
        self.pixel_type
    }
}

impl ImageTransformer for Pixelize {
    fn transform(&self, image: &Image) -> Image {
        let scale = self.pixel_type.scale();
        Image::from_fn(image.width() * scale, image.height() * scale, |x, y| {
            let source = image.get(x / scale, y / scale).unwrap_or_default();
            let (dx, dy) = (x % scale, y % scale);
            match (self.pixel_type, dx, dy) {
                (PixelType::Stripes, 0, _) | (PixelType::Squares, 0, 0) => Rgb::new(source.r, 0, 0),
                (PixelType::Stripes, 1, _) => Rgb::new(0, source.g, 0),
                (PixelType::Squares, 1, 1) | (PixelType::Stripes, _, _) => Rgb::new(0, 0, source.b),
                (PixelType::Squares, _, _) => Rgb::new(0, source.g / 2, 0),
            }
        })
    }

    fn settings(&self) -> Result<Builder<Transformer>, SettingsError> {
        SETTINGS.clone()
    }
}

static SETTINGS: LazyLock<Result<Builder<Transformer>, SettingsError>> = LazyLock::new(|| {
    let node = Node::<Transformer>::new("default")
        .argument("pixel_type", Argument::single_select_of::<PixelType>())?
        .constructs(|ctx| Ok(Box::new(Pixelize::new(ctx.get_enum("pixel_type")?))));
    Builder::new("pixelize").with_nodes([node])
});

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Image {
        Image::from_fn(2, 1, |x, _| if x == 0 { Rgb::new(200, 100, 50) } else { Rgb::WHITE })
    }

    #[test]
    fn stripes_split_channels_into_columns() {
        let out = Pixelize::new(PixelType::Stripes).transform(&sample());
        assert_eq!((out.width(), out.height()), (6, 3));
        for y in 0..3 {
            assert_eq!(out.get(0, y), Some(Rgb::new(200, 0, 0)));
            assert_eq!(out.get(1, y), Some(Rgb::new(0, 100, 0)));
            assert_eq!(out.get(2, y), Some(Rgb::new(0, 0, 50)));
        }
        assert_eq!(out.get(4, 2), Some(Rgb::new(0, 255, 0)));
    }

    #[test]
    fn squares_halve_the_greens() {
        let out = Pixelize::new(PixelType::Squares).transform(&sample());
        assert_eq!((out.width(), out.height()), (4, 2));
        assert_eq!(out.get(0, 0), Some(Rgb::new(200, 0, 0)));
        assert_eq!(out.get(1, 0), Some(Rgb::new(0, 50, 0)));
        assert_eq!(out.get(0, 1), Some(Rgb::new(0, 50, 0)));
        assert_eq!(out.get(1, 1), Some(Rgb::new(0, 0, 50)));
    }
}
