use gap_domain::config::ModsConfig;
use gap_domain::image::{Image, Rgb};
use gap_kernel::capability::{ImageGenerator, ImageTransformer};
use gap_kernel::mods::{LinkedBundles, ModLoader};
use gap_kernel::registry::Registries;
use gap_settings::{SettingsError, Value};
use gap_vanilla::generators::Generator;
use gap_vanilla::transformers::{ColorReduce, PixelType, Pixelize};
use proptest::prelude::*;

fn loaded() -> Registries {
    let mut loader = ModLoader::new(Registries::new(), LinkedBundles::new());
    let id = loader.load_bundle(&gap_vanilla::bundle()).expect("vanilla loads");
    assert_eq!(id, gap_vanilla::PROJECT_ID);
    loader.registries().clone()
}

fn white_noise(seed_option: &str, seed: impl Into<Value>) -> Result<Generator, SettingsError> {
    let mut builder = loaded().generators.instantiate("gap:white_noise").expect("registered").settings()?;
    builder.set_value("basic", "width", 128_u32)?;
    builder.set_value("basic", "height", 128_u32)?;
    builder.set_option_value("basic", "seed", seed_option, "seed", seed)?;
    builder.execute("basic", &[("seed", seed_option)])
}

#[test]
fn the_bundle_registers_every_vanilla_capability() {
    let registries = loaded();
    assert_eq!(registries.generators.ids(), ["gap:stripes", "gap:white_noise"]);
    assert_eq!(registries.transformers.ids(), ["gap:color_reduce", "gap:pixelize"]);
}

#[test]
fn the_bundle_resolves_through_its_manifest() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("vanilla.gapmod"), "entry = \"gap\"").expect("write manifest");

    let config = ModsConfig { directory: dir.path().to_path_buf(), ..ModsConfig::default() };
    let mut loader = ModLoader::new(Registries::new(), gap_vanilla::link(LinkedBundles::new()));
    let report = loader.load_dir(&config).expect("scan");
    assert!(report.is_clean());
    assert_eq!(report.loaded, ["gap"]);
    assert!(loader.registries().transformers.contains("gap:pixelize"));
}

#[test]
fn seed_words_and_numbers_agree() {
    let by_word = white_noise("word", "cosmic").expect("valid word").generate();
    let by_number = white_noise("number", 881_321).expect("valid number").generate();
    assert_eq!(by_word, by_number);
    assert_eq!(by_word, white_noise("word", "Cosmic").expect("case-insensitive").generate());
    assert_ne!(by_word, white_noise("number", 881_322).expect("valid number").generate());
}

#[test]
fn text_seeds_are_hashed() {
    let a = white_noise("string", "hello world").expect("any text").generate();
    let b = white_noise("number", gap_vanilla::seed::string_seed("hello world")).expect("valid").generate();
    assert_eq!(a, b);
}

#[test]
fn images_smaller_than_the_minimum_are_refused() {
    let mut builder = loaded().generators.instantiate("gap:white_noise").expect("registered").settings().expect("builder");
    let err = builder.set_value("basic", "width", 64_u32).expect_err("below 128");
    assert!(matches!(err, SettingsError::OutOfRange { .. }));
}

#[test]
fn the_grayscale_preset_removes_tint() {
    let mut builder = loaded().generators.instantiate("gap:white_noise").expect("registered").settings().expect("builder");
    builder.set_value("advanced", "width", 128_u32).expect("in range");
    builder.set_value("advanced", "height", 128_u32).expect("in range");
    builder.set_option_value("advanced", "seed", "number", "seed", 5).expect("in range");
    builder.set_option_value("advanced", "advanced", "presets", "presets", "GRAYSCALE").expect("known preset");

    let image = builder
        .execute("advanced", &[("seed", "number"), ("advanced", "presets")])
        .expect("fully configured")
        .generate();
    assert!(image.pixels().iter().all(|p| p.r == p.g && p.g == p.b));
}

#[test]
fn transformers_build_from_their_settings() {
    let registries = loaded();
    let source = Image::from_fn(4, 3, |x, y| Rgb::new((x * 60) as u8, (y * 80) as u8, 255));

    let mut pixelize = registries.transformers.instantiate("gap:pixelize").expect("registered").settings().expect("builder");
    pixelize.set_raw("default", "pixel_type", "SQUARES").expect("known type");
    let out = pixelize.execute("default", &[]).expect("configured").transform(&source);
    assert_eq!((out.width(), out.height()), (8, 6));

    let mut reduce = registries.transformers.instantiate("gap:color_reduce").expect("registered").settings().expect("builder");
    reduce.set_value("color_reduce", "reduce_level", 0b11_u32).expect("in range");
    let out = reduce.execute("color_reduce", &[]).expect("configured").transform(&source);
    assert_eq!((out.width(), out.height()), (4, 3));
    assert!(out.pixels().iter().all(|p| p.r & 0b11 == 0 && p.g & 0b11 == 0 && p.b & 0b11 == 0));
}

#[test]
fn unconfigured_transformers_report_what_is_missing() {
    let pixelize = Pixelize::default().settings().expect("builder");
    let err = pixelize.execute("default", &[]).err().expect("no pixel type chosen");
    assert!(matches!(err, SettingsError::ValueAbsent { .. }));
    assert_eq!(Pixelize::default().pixel_type(), PixelType::Stripes);
}

proptest! {
    #[test]
    fn color_reduce_is_idempotent(level in 0_u32..=128, r: u8, g: u8, b: u8) {
        let reduce = ColorReduce::new(level);
        let image = Image::from_fn(1, 1, |_, _| Rgb::new(r, g, b));
        let once = reduce.transform(&image);
        prop_assert_eq!(reduce.transform(&once), once);
    }
}
