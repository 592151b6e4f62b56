use super::{Generator, MAX_SIDE, MIN_SIDE, rng};
use crate::seed::{SEED_FIELD, seed_group};
use gap_domain::image::{Image, Rgb};
use gap_kernel::capability::ImageGenerator;
use gap_settings::{Argument, Builder, Context, Group, GroupOption, Node, SettingsError};
use rand::Rng;
use std::sync::LazyLock;
use strum_macros::{Display, EnumString, VariantNames};

/// Canned color models for [`WhiteNoise`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, VariantNames)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WhiteNoisePreset {
    #[default]
    FullRandom,
    RandomHue,
    RandomHueAndDarkness,
    Grayscale,
}

/// How each HSV channel is drawn: a factor in `0.0..=1.0`, scaled by a
/// fresh random number per pixel when the channel is random.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorModel {
    pub hue_factor: f64,
    pub random_hue: bool,
    pub saturation_factor: f64,
    pub random_saturation: bool,
    pub value_factor: f64,
    pub random_value: bool,
}

impl From<WhiteNoisePreset> for ColorModel {
    fn from(preset: WhiteNoisePreset) -> Self {
        let full = Self {
            hue_factor: 1.0,
            random_hue: true,
            saturation_factor: 1.0,
            random_saturation: true,
            value_factor: 1.0,
            random_value: true,
        };
        match preset {
            WhiteNoisePreset::FullRandom => full,
            WhiteNoisePreset::RandomHue => Self { random_saturation: false, random_value: false, ..full },
            WhiteNoisePreset::RandomHueAndDarkness => Self { random_saturation: false, ..full },
            WhiteNoisePreset::Grayscale => {
                Self { saturation_factor: 0.0, random_saturation: false, ..full }
            },
        }
    }
}

impl Default for ColorModel {
    fn default() -> Self {
        WhiteNoisePreset::default().into()
    }
}

/// Independently random pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct WhiteNoise {
    width: u32,
    height: u32,
    seed: i32,
    colors: ColorModel,
}

impl WhiteNoise {
    #[must_use]
    pub fn new(width: u32, height: u32, seed: i32) -> Self {
        Self { width, height, seed, colors: ColorModel::default() }
    }

    #[must_use]
    pub const fn with_colors(mut self, colors: ColorModel) -> Self {
        self.colors = colors;
        self
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn seed(&self) -> i32 {
        self.seed
    }

    pub const fn colors(&self) -> ColorModel {
        self.colors
    }

    fn from_context(ctx: &Context) -> Result<Self, SettingsError> {
        Ok(Self::new(ctx.get("width")?, ctx.get("height")?, ctx.get(SEED_FIELD)?))
    }
}

impl Default for WhiteNoise {
    fn default() -> Self {
        Self::new(MIN_SIDE, MIN_SIDE, 0)
    }
}

impl ImageGenerator for WhiteNoise {
    fn generate(&self) -> Image {
        let mut rng = rng(self.seed);
        let c = self.colors;
        let mut channel = |factor: f64, random: bool| {
            if random { factor * rng.gen_range(0.0..1.0) } else { factor }
        };
        Image::from_fn(self.width, self.height, |_, _| {
            let hue = channel(c.hue_factor, c.random_hue);
            let saturation = channel(c.saturation_factor, c.random_saturation);
            let value = channel(c.value_factor, c.random_value);
            Rgb::from_hsv(hue, saturation, value)
        })
    }

    fn settings(&self) -> Result<Builder<Generator>, SettingsError> {
        SETTINGS.clone()
    }
}

static SETTINGS: LazyLock<Result<Builder<Generator>, SettingsError>> = LazyLock::new(|| {
    let basic = sized("basic")?.constructs(|ctx| Ok(Box::new(WhiteNoise::from_context(ctx)?)));

    let advanced = sized("advanced")?.group(color_group()?)?.constructs(|ctx| {
        let colors = ColorModel {
            hue_factor: ctx.get("hue_factor")?,
            random_hue: ctx.get("allow_random_hue")?,
            saturation_factor: ctx.get("saturation_factor")?,
            random_saturation: ctx.get("allow_random_saturation")?,
            value_factor: ctx.get("value_factor")?,
            random_value: ctx.get("allow_random_value")?,
        };
        Ok(Box::new(WhiteNoise::from_context(ctx)?.with_colors(colors)))
    });

    Builder::new("white_noise").with_nodes([basic, advanced])
});

fn sized(name: &str) -> Result<Node<Generator>, SettingsError> {
    Node::new(name)
        .group(seed_group()?)?
        .argument("width", Argument::unsigned_integer(MIN_SIDE..=MAX_SIDE))?
        .argument("height", Argument::unsigned_integer(MIN_SIDE..=MAX_SIDE))
}

fn color_fields() -> Result<Context, SettingsError> {
    Context::new()
        .with("allow_random_hue", Argument::boolean())?
        .with("hue_factor", Argument::double(0.0..=1.0))?
        .with("allow_random_saturation", Argument::boolean())?
        .with("saturation_factor", Argument::double(0.0..=1.0))?
        .with("allow_random_value", Argument::boolean())?
        .with("value_factor", Argument::double(0.0..=1.0))
}

fn color_group() -> Result<Group, SettingsError> {
    let presets = GroupOption::new("presets")
        .argument("presets", Argument::single_select_of::<WhiteNoisePreset>())?
        .merges(|input, output| {
            let c = ColorModel::from(input.get_enum::<WhiteNoisePreset>("presets")?);
            output.set("allow_random_hue", c.random_hue)?;
            output.set("hue_factor", c.hue_factor)?;
            output.set("allow_random_saturation", c.random_saturation)?;
            output.set("saturation_factor", c.saturation_factor)?;
            output.set("allow_random_value", c.random_value)?;
            output.set("value_factor", c.value_factor)
        });

    let mut manual = GroupOption::new("manual");
    for (name, argument) in color_fields()?.iter() {
        manual = manual.argument(name, argument.clone())?;
    }

    Group::new("advanced", color_fields()?).option(presets)?.option(manual.auto_merge())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_pick_the_random_channels() {
        let hue_only = ColorModel::from(WhiteNoisePreset::RandomHue);
        assert!(hue_only.random_hue && !hue_only.random_saturation && !hue_only.random_value);

        let gray = ColorModel::from(WhiteNoisePreset::Grayscale);
        assert!(gray.saturation_factor.abs() < f64::EPSILON && gray.random_value);
    }

    #[test]
    fn grayscale_noise_has_no_tint() {
        let noise = WhiteNoise::new(16, 16, 3).with_colors(WhiteNoisePreset::Grayscale.into());
        let image = noise.generate();
        assert!(image.pixels().iter().all(|p| p.r == p.g && p.g == p.b));
        assert!(image.pixels().iter().any(|p| *p != image.pixels()[0]), "values still vary");
    }

    #[test]
    fn fixed_channels_give_a_flat_image() {
        let flat = ColorModel {
            hue_factor: 0.0,
            random_hue: false,
            saturation_factor: 1.0,
            random_saturation: false,
            value_factor: 1.0,
            random_value: false,
        };
        let image = WhiteNoise::new(4, 4, 99).with_colors(flat).generate();
        assert!(image.pixels().iter().all(|p| *p == Rgb::new(255, 0, 0)));
    }
}
