use super::{Generator, rng};
use crate::seed::{SEED_FIELD, seed_group};
use gap_domain::image::{Image, Rgb};
use gap_kernel::capability::ImageGenerator;
use gap_settings::{Argument, Builder, Context, Node, SettingsError};
use rand::Rng;
use rand::rngs::StdRng;
use std::sync::LazyLock;

const PALETTE_SIZE: usize = 5;
const MAX_CELLS: u32 = 128;
const MAX_UNIT: u32 = 64;
const MAX_GAP: u32 = 32;

/// Random rectangles packed on a grid, separated by background-colored gaps.
///
/// Each rectangle starts on a free cell, grows right and then down with a
/// one-in-five chance of stopping at every step, and never overlaps another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripes {
    grid_width: u32,
    grid_height: u32,
    pixels_per_unit: u32,
    gap_thickness: u32,
    seed: i32,
}

impl Stripes {
    #[must_use]
    pub const fn new(grid_width: u32, grid_height: u32, pixels_per_unit: u32, gap_thickness: u32, seed: i32) -> Self {
        Self { grid_width, grid_height, pixels_per_unit, gap_thickness, seed }
    }

    pub const fn width(&self) -> u32 {
        self.grid_width * self.pixels_per_unit + self.grid_width.saturating_sub(1) * self.gap_thickness
    }

    pub const fn height(&self) -> u32 {
        self.grid_height * self.pixels_per_unit + self.grid_height.saturating_sub(1) * self.gap_thickness
    }

    pub const fn seed(&self) -> i32 {
        self.seed
    }

    fn from_context(ctx: &Context) -> Result<Self, SettingsError> {
        Ok(Self::new(
            ctx.get("grid_width")?,
            ctx.get("grid_height")?,
            ctx.get("pixels_per_unit")?,
            ctx.get("gap_thickness")?,
            ctx.get(SEED_FIELD)?,
        ))
    }

    fn paint(&self, image: &mut Image, cells: Cells, color: Rgb) {
        let pitch = self.pixels_per_unit + self.gap_thickness;
        for y in cells.top * pitch..cells.bottom * pitch + self.pixels_per_unit {
            for x in cells.left * pitch..cells.right * pitch + self.pixels_per_unit {
                image.set(x, y, color);
            }
        }
    }
}

impl Default for Stripes {
    fn default() -> Self {
        Self::new(8, 8, 8, 4, 0)
    }
}

impl ImageGenerator for Stripes {
    fn generate(&self) -> Image {
        let mut rng = rng(self.seed);
        let palette: Vec<Rgb> = (0..PALETTE_SIZE)
            .map(|_| Rgb::from_hsv(rng.gen_range(0.0..1.0), rng.gen_range(0.3..1.0), rng.gen_range(0.2..1.0)))
            .collect();
        let (darkest, background) = palette
            .iter()
            .copied()
            .enumerate()
            .min_by_key(|(_, color)| color.luma())
            .unwrap_or((0, Rgb::BLACK));
        let fills: Vec<Rgb> =
            palette.iter().enumerate().filter(|(i, _)| *i != darkest).map(|(_, c)| *c).collect();

        let mut image = Image::from_fn(self.width(), self.height(), |_, _| background);
        let mut grid = Grid::new(self.grid_width, self.grid_height);
        while let Some(cells) = grid.next_rectangle(&mut rng) {
            let color = fills.get(rng.gen_range(0..fills.len().max(1))).copied().unwrap_or(background);
            self.paint(&mut image, cells, color);
        }
        image
    }

    fn settings(&self) -> Result<Builder<Generator>, SettingsError> {
        SETTINGS.clone()
    }
}

static SETTINGS: LazyLock<Result<Builder<Generator>, SettingsError>> = LazyLock::new(|| {
    let stripes = Node::<Generator>::new("stripes")
        .group(seed_group()?)?
        .argument("grid_width", Argument::unsigned_integer(2..=MAX_CELLS))?
        .argument("grid_height", Argument::unsigned_integer(2..=MAX_CELLS))?
        .argument("pixels_per_unit", Argument::unsigned_integer(1..=MAX_UNIT))?
        .argument("gap_thickness", Argument::unsigned_integer(1..=MAX_GAP))?
        .constructs(|ctx| Ok(Box::new(Stripes::from_context(ctx)?)));
    Builder::new("stripes").with_nodes([stripes])
});

/// Inclusive cell bounds of one rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cells {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
}

struct Grid {
    width: u32,
    height: u32,
    taken: Vec<bool>,
}

impl Grid {
    fn new(width: u32, height: u32) -> Self {
        Self { width, height, taken: vec![false; width as usize * height as usize] }
    }

    fn is_free(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && !self.taken[y as usize * self.width as usize + x as usize]
    }

    fn next_rectangle(&mut self, rng: &mut StdRng) -> Option<Cells> {
        let free: Vec<(u32, u32)> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_free(x, y))
            .collect();
        if free.is_empty() {
            return None;
        }

        let (left, top) = free[rng.gen_range(0..free.len())];
        let mut right = left;
        while self.is_free(right + 1, top) && rng.gen_range(0..5) != 0 {
            right += 1;
        }
        let mut bottom = top;
        while (left..=right).all(|x| self.is_free(x, bottom + 1)) && rng.gen_range(0..5) != 0 {
            bottom += 1;
        }

        for y in top..=bottom {
            for x in left..=right {
                self.taken[y as usize * self.width as usize + x as usize] = true;
            }
        }
        Some(Cells { left, top, right, bottom })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_size_follows_the_grid() {
        let stripes = Stripes::new(3, 2, 10, 4, 1);
        assert_eq!((stripes.width(), stripes.height()), (38, 24));

        let image = stripes.generate();
        assert_eq!((image.width(), image.height()), (38, 24));
    }

    #[test]
    fn rectangles_tile_the_grid_without_overlap() {
        let mut rng = rng(11);
        let mut grid = Grid::new(6, 5);
        let mut covered = vec![0_u8; 30];
        while let Some(cells) = grid.next_rectangle(&mut rng) {
            for y in cells.top..=cells.bottom {
                for x in cells.left..=cells.right {
                    covered[(y * 6 + x) as usize] += 1;
                }
            }
        }
        assert!(covered.iter().all(|&n| n == 1));
    }

    #[test]
    fn the_seed_fixes_the_picture() {
        let a = Stripes::new(4, 4, 3, 2, 5).generate();
        assert_eq!(a, Stripes::new(4, 4, 3, 2, 5).generate());
        assert_ne!(a, Stripes::new(4, 4, 3, 2, 6).generate());
    }
}
