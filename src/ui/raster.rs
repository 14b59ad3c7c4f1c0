//! Cell rasterizer — turns a rendered terminal buffer into an RGBA bitmap.
//!
//! Every cell covers 8×16 logical points.  A cell is painted as its
//! background colour plus a foreground shape:
//!
//! * block elements (`█ ▀ ▄ ▌ ▐` and the eighth blocks) cover exactly the
//!   fraction of the cell they denote,
//! * light/heavy box-drawing lines become 1-point strokes through the centre,
//! * any other visible glyph becomes a solid box in the text's x-height band,
//!   so text reads as word-shaped runs.
//!
//! Colours map through a fixed palette, so the same screen state always
//! produces the same pixels.

use image::{Rgba, RgbaImage};
use ratatui::{
    buffer::{Buffer, Cell},
    layout::Rect,
    style::{Color, Modifier},
    widgets::Widget,
};

use crate::core::snapshot::{LogicalSize, Rasterizer};
use crate::screens::ScreenView;

use super::code_view::CodeViewConfig;
use super::screen_page::ScreenPage;

/// Logical points per terminal cell.
pub const CELL_WIDTH: u32 = 8;
pub const CELL_HEIGHT: u32 = 16;

const DEFAULT_FG: [u8; 3] = [229, 229, 229];
const DEFAULT_BG: [u8; 3] = [24, 24, 27];

/// Renders a screen page off-screen and rasterizes the resulting cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellRasterizer {
    code: CodeViewConfig,
}

impl CellRasterizer {
    pub fn new(code: CodeViewConfig) -> Self {
        Self { code }
    }
}

impl Rasterizer for CellRasterizer {
    type View = dyn ScreenView;

    fn rasterize(&self, view: &Self::View, size: LogicalSize, scale: f32) -> Option<RgbaImage> {
        let cols = (size.width / CELL_WIDTH).clamp(1, u32::from(u16::MAX)) as u16;
        let rows = (size.height / CELL_HEIGHT).clamp(1, u32::from(u16::MAX)) as u16;
        let area = Rect::new(0, 0, cols, rows);
        let mut buf = Buffer::empty(area);
        ScreenPage::new(view, self.code).render(area, &mut buf);
        tracing::debug!(
            screen = %view.destination(),
            cols,
            rows,
            scale,
            "rasterizing screen page"
        );
        rasterize_buffer(&buf, size, scale)
    }
}

/// Paint `buf` onto a bitmap of `size` logical points at `scale`.
///
/// Cells that do not fit are clipped; leftover margin keeps the default
/// background.  Returns `None` for an empty bitmap.
pub fn rasterize_buffer(buf: &Buffer, size: LogicalSize, scale: f32) -> Option<RgbaImage> {
    let (width, height) = size.to_pixels(scale);
    if width == 0 || height == 0 {
        return None;
    }
    let mut img = RgbaImage::from_pixel(width, height, rgba(DEFAULT_BG));
    let px = |points: u32| ((points as f32) * scale).round() as u32;

    let area = buf.area;
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let col = u32::from(x - area.x);
            let row = u32::from(y - area.y);
            let x0 = px(col * CELL_WIDTH);
            let y0 = px(row * CELL_HEIGHT);
            if x0 >= width || y0 >= height {
                continue;
            }
            let cell_box = PixelBox {
                x0,
                y0,
                x1: px((col + 1) * CELL_WIDTH).min(width),
                y1: px((row + 1) * CELL_HEIGHT).min(height),
            };
            paint_cell(&mut img, &buf[(x, y)], cell_box);
        }
    }
    Some(img)
}

// ───────────────────────────────────────── cells ─────────────

/// Half-open pixel rectangle.
#[derive(Debug, Clone, Copy)]
struct PixelBox {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl PixelBox {
    fn width(self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    fn height(self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    /// Sub-box from fractions of this box (`0.0..=1.0` on each axis).
    fn frac(self, fx0: f32, fy0: f32, fx1: f32, fy1: f32) -> PixelBox {
        let w = self.width() as f32;
        let h = self.height() as f32;
        PixelBox {
            x0: self.x0 + (w * fx0).round() as u32,
            y0: self.y0 + (h * fy0).round() as u32,
            x1: self.x0 + (w * fx1).round() as u32,
            y1: self.y0 + (h * fy1).round() as u32,
        }
    }
}

/// Which way each half of a box-drawing glyph extends.
#[derive(Debug, Clone, Copy, Default)]
struct Arms {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

enum Glyph {
    Blank,
    /// Fractional coverage `(x0, y0, x1, y1)` of the cell.
    Block(f32, f32, f32, f32),
    Lines(Arms),
    Text,
}

fn classify(symbol: &str) -> Glyph {
    let mut chars = symbol.chars();
    let Some(c) = chars.next() else {
        return Glyph::Blank;
    };
    if c == ' ' || c.is_control() {
        return Glyph::Blank;
    }
    let arms = |left, right, up, down| {
        Glyph::Lines(Arms {
            left,
            right,
            up,
            down,
        })
    };
    match c {
        '█' => Glyph::Block(0.0, 0.0, 1.0, 1.0),
        '▀' => Glyph::Block(0.0, 0.0, 1.0, 0.5),
        '▌' => Glyph::Block(0.0, 0.0, 0.5, 1.0),
        '▐' => Glyph::Block(0.5, 0.0, 1.0, 1.0),
        // ▁ ▂ ▃ ▄ ▅ ▆ ▇ : lower eighths.
        '\u{2581}'..='\u{2587}' => {
            let eighths = (c as u32 - 0x2580) as f32;
            Glyph::Block(0.0, 1.0 - eighths / 8.0, 1.0, 1.0)
        }
        '─' | '━' | '═' => arms(true, true, false, false),
        '│' | '┃' | '║' => arms(false, false, true, true),
        '╭' | '┌' | '┏' | '╔' => arms(false, true, false, true),
        '╮' | '┐' | '┓' | '╗' => arms(true, false, false, true),
        '╰' | '└' | '┗' | '╚' => arms(false, true, true, false),
        '╯' | '┘' | '┛' | '╝' => arms(true, false, true, false),
        '├' => arms(false, true, true, true),
        '┤' => arms(true, false, true, true),
        '┬' => arms(true, true, false, true),
        '┴' => arms(true, true, true, false),
        '┼' => arms(true, true, true, true),
        _ => Glyph::Text,
    }
}

fn paint_cell(img: &mut RgbaImage, cell: &Cell, cell_box: PixelBox) {
    let mut fg = rgb(cell.fg, DEFAULT_FG);
    let mut bg = rgb(cell.bg, DEFAULT_BG);
    if cell.modifier.contains(Modifier::REVERSED) {
        std::mem::swap(&mut fg, &mut bg);
    }
    if cell.modifier.contains(Modifier::DIM) {
        fg = blend(fg, bg, 0.5);
    }

    fill(img, cell_box, bg);
    match classify(cell.symbol()) {
        Glyph::Blank => {}
        Glyph::Block(x0, y0, x1, y1) => fill(img, cell_box.frac(x0, y0, x1, y1), fg),
        Glyph::Lines(arms) => paint_lines(img, cell_box, arms, fg),
        Glyph::Text => {
            // x-height band with a one-point side bearing.
            let glyph = cell_box.frac(0.125, 0.375, 0.875, 0.8125);
            let ink = if cell.modifier.contains(Modifier::BOLD) {
                fg
            } else {
                blend(fg, bg, 0.8)
            };
            fill(img, glyph, ink);
            if cell.modifier.contains(Modifier::UNDERLINED) {
                fill(img, cell_box.frac(0.0, 0.875, 1.0, 0.9375), fg);
            }
        }
    }
}

fn paint_lines(img: &mut RgbaImage, cell_box: PixelBox, arms: Arms, color: [u8; 3]) {
    let stroke_w = 1.0 / CELL_WIDTH as f32;
    let stroke_h = 1.0 / CELL_HEIGHT as f32;
    let (hx0, hx1) = (0.5 - stroke_w / 2.0, 0.5 + stroke_w / 2.0);
    let (hy0, hy1) = (0.5 - stroke_h / 2.0, 0.5 + stroke_h / 2.0);
    if arms.left {
        fill(img, cell_box.frac(0.0, hy0, hx1, hy1), color);
    }
    if arms.right {
        fill(img, cell_box.frac(hx0, hy0, 1.0, hy1), color);
    }
    if arms.up {
        fill(img, cell_box.frac(hx0, 0.0, hx1, hy1), color);
    }
    if arms.down {
        fill(img, cell_box.frac(hx0, hy0, hx1, 1.0), color);
    }
}

fn fill(img: &mut RgbaImage, area: PixelBox, color: [u8; 3]) {
    let x1 = area.x1.min(img.width());
    let y1 = area.y1.min(img.height());
    // Thin strokes still get at least one pixel.
    let x1 = if x1 == area.x0 && x1 < img.width() { x1 + 1 } else { x1 };
    let y1 = if y1 == area.y0 && y1 < img.height() { y1 + 1 } else { y1 };
    for y in area.y0..y1 {
        for x in area.x0..x1 {
            img.put_pixel(x, y, rgba(color));
        }
    }
}

// ───────────────────────────────────────── colours ───────────

fn rgba([r, g, b]: [u8; 3]) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

fn blend(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let mix = |x: u8, y: u8| (f32::from(x) * t + f32::from(y) * (1.0 - t)).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

/// Fixed RGB for a terminal colour (`Reset` resolves to `default`).
pub fn rgb(color: Color, default: [u8; 3]) -> [u8; 3] {
    match color {
        Color::Reset => default,
        Color::Black => [0, 0, 0],
        Color::Red => [205, 49, 49],
        Color::Green => [13, 188, 121],
        Color::Yellow => [229, 229, 16],
        Color::Blue => [36, 114, 200],
        Color::Magenta => [188, 63, 188],
        Color::Cyan => [17, 168, 205],
        Color::Gray => [204, 204, 204],
        Color::DarkGray => [102, 102, 102],
        Color::LightRed => [241, 76, 76],
        Color::LightGreen => [35, 209, 139],
        Color::LightYellow => [245, 245, 67],
        Color::LightBlue => [59, 142, 234],
        Color::LightMagenta => [214, 112, 214],
        Color::LightCyan => [41, 184, 219],
        Color::White => [229, 229, 229],
        Color::Rgb(r, g, b) => [r, g, b],
        Color::Indexed(i) => indexed(i),
    }
}

/// xterm 256-colour table.
fn indexed(i: u8) -> [u8; 3] {
    const BASE: [Color; 16] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::Gray,
        Color::DarkGray,
        Color::LightRed,
        Color::LightGreen,
        Color::LightYellow,
        Color::LightBlue,
        Color::LightMagenta,
        Color::LightCyan,
        Color::White,
    ];
    match i {
        0..=15 => rgb(BASE[usize::from(i)], DEFAULT_FG),
        16..=231 => {
            let n = i - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            [level(n / 36), level((n / 6) % 6), level(n % 6)]
        }
        _ => {
            let v = 8 + (i - 232) * 10;
            [v, v, v]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::destination::Destination;
    use crate::core::snapshot::{RenderRequest, SnapshotError, SnapshotHarness, DEFAULT_SIZE};
    use crate::screens::router;

    fn pixel(img: &RgbaImage, x: u32, y: u32) -> [u8; 3] {
        let p = img.get_pixel(x, y);
        [p[0], p[1], p[2]]
    }

    #[test]
    fn pixel_size_is_scaled_logical_size() {
        let buf = Buffer::empty(Rect::new(0, 0, 2, 2));
        let img = rasterize_buffer(&buf, LogicalSize::new(393, 852), 2.0).expect("image");
        assert_eq!(img.dimensions(), (786, 1704));
        let img = rasterize_buffer(&buf, LogicalSize::new(393, 852), 1.5).expect("image");
        assert_eq!(img.dimensions(), (590, 1278));
    }

    #[test]
    fn background_fills_the_whole_cell() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 2, 1));
        buf[(1, 0)].set_bg(Color::Red);
        let img = rasterize_buffer(&buf, LogicalSize::new(16, 16), 1.0).expect("image");
        assert_eq!(pixel(&img, 8, 0), rgb(Color::Red, DEFAULT_BG));
        assert_eq!(pixel(&img, 15, 15), rgb(Color::Red, DEFAULT_BG));
        assert_eq!(pixel(&img, 7, 0), DEFAULT_BG);
    }

    #[test]
    fn block_elements_cover_their_fraction() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 2, 1));
        buf[(0, 0)].set_symbol("█").set_fg(Color::Blue);
        buf[(1, 0)].set_symbol("▄").set_fg(Color::Blue);
        let img = rasterize_buffer(&buf, LogicalSize::new(16, 16), 2.0).expect("image");
        let blue = rgb(Color::Blue, DEFAULT_FG);
        assert_eq!(pixel(&img, 0, 0), blue);
        assert_eq!(pixel(&img, 15, 31), blue);
        // Lower half block: top half is background, bottom half ink.
        assert_eq!(pixel(&img, 20, 15), DEFAULT_BG);
        assert_eq!(pixel(&img, 20, 16), blue);
    }

    #[test]
    fn reversed_cells_swap_colours() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 1));
        buf[(0, 0)]
            .set_fg(Color::Green)
            .set_bg(Color::Black)
            .modifier
            .insert(Modifier::REVERSED);
        let img = rasterize_buffer(&buf, LogicalSize::new(8, 16), 1.0).expect("image");
        assert_eq!(pixel(&img, 0, 0), rgb(Color::Green, DEFAULT_FG));
    }

    #[test]
    fn same_state_gives_same_pixels() {
        let screen = router::resolve(Destination::Gauge);
        let raster = CellRasterizer::default();
        let a = raster.rasterize(screen.as_ref(), DEFAULT_SIZE, 1.0).expect("image");
        let b = raster.rasterize(screen.as_ref(), DEFAULT_SIZE, 1.0).expect("image");
        assert_eq!(a, b);
    }

    #[test]
    fn default_snapshot_writes_and_overwrites_a_png() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("button.png");
        let screen = router::resolve(Destination::Button);
        let harness = SnapshotHarness::new(CellRasterizer::default());

        let first = harness.render(screen.as_ref(), &RenderRequest::new(&path))?;
        assert_eq!((first.width, first.height), (786, 1704));
        assert!(!std::fs::read(&path)?.is_empty());

        let second = harness.render(screen.as_ref(), &RenderRequest::new(&path).scale(1.0))?;
        assert_eq!(std::fs::read(&path)?, second.bytes);
        let decoded = image::load_from_memory(&second.bytes)?;
        assert_eq!((decoded.width(), decoded.height()), (393, 852));
        Ok(())
    }

    #[test]
    fn huge_snapshot_is_an_error_not_an_abort() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("huge.png");
        let screen = router::resolve(Destination::Button);
        let harness = SnapshotHarness::new(CellRasterizer::default());
        let request = RenderRequest::new(&path)
            .size(LogicalSize::new(u32::MAX, u32::MAX))
            .scale(2.0);
        let err = harness.render(screen.as_ref(), &request).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidRequest(_)));
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn indexed_palette_covers_cube_and_greys() {
        assert_eq!(indexed(16), [0, 0, 0]);
        assert_eq!(indexed(231), [255, 255, 255]);
        assert_eq!(indexed(232), [8, 8, 8]);
        assert_eq!(indexed(1), rgb(Color::Red, DEFAULT_FG));
    }
}
