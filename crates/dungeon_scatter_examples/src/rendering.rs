//! Shared helpers for the example binaries: tracing setup and a top-down
//! PNG renderer for layouts and placement decisions.
use dungeon_scatter::layout::{CellType, Layout};
use dungeon_scatter::placement::{Category, PlanResult};
use image::{Rgb, RgbImage};
use tracing_subscriber::filter::LevelFilter;

/// Installs a stdout tracing subscriber at INFO level. Safe to call once per
/// process; repeated calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .try_init();
}

/// Rendering configuration for [`render_plan_to_png`].
pub struct RenderConfig {
    /// Pixels per grid cell.
    pub scale: u32,
    /// Background color for empty cells.
    pub background: [u8; 3],
}

impl RenderConfig {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
            background: [24, 24, 28],
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }
}

/// Renders a layout and its placement decisions into a top-down PNG.
pub fn render_plan_to_png(
    layout: &Layout,
    result: &PlanResult,
    config: &RenderConfig,
    path: &str,
) -> anyhow::Result<()> {
    let scale = config.scale;
    let width = layout.width() as u32 * scale;
    let height = layout.height() as u32 * scale;
    let mut image = RgbImage::from_pixel(width, height, Rgb(config.background));

    for x in 0..layout.width() {
        for y in 0..layout.height() {
            let color = match layout.cell(x, y) {
                CellType::Empty => continue,
                CellType::Room => [68, 68, 76],
                CellType::Corridor => [52, 52, 58],
                CellType::Blocked => [12, 12, 12],
            };
            fill_cell(&mut image, layout, x, y, scale, color);
        }
    }

    for decision in &result.decisions {
        let color = match decision.category {
            Category::Floor => [186, 160, 122],
            Category::Wall => [128, 54, 48],
            Category::Prop => [96, 140, 88],
            _ => [220, 220, 220],
        };
        fill_cell(&mut image, layout, decision.x, decision.y, scale, color);
    }

    image.save(path)?;
    Ok(())
}

fn fill_cell(image: &mut RgbImage, layout: &Layout, x: i32, y: i32, scale: u32, color: [u8; 3]) {
    // Image rows grow downward; flip y so the layout reads bottom-up.
    let py0 = (layout.height() - 1 - y) as u32 * scale;
    let px0 = x as u32 * scale;
    for dx in 0..scale {
        for dy in 0..scale {
            image.put_pixel(px0 + dx, py0 + dy, Rgb(color));
        }
    }
}
