//! Offline snapshot harness — render a view to a PNG file.
//!
//! The harness knows nothing about terminals or widgets.  It depends on two
//! capabilities supplied by the caller:
//!
//! * a [`Rasterizer`] that turns a view into an RGBA bitmap at a given logical
//!   size and pixel scale, and
//! * a [`SnapshotSink`] that persists the encoded bytes ([`FsSink`] writes to
//!   the filesystem).
//!
//! Rendering is a single synchronous attempt: rasterize the first frame,
//! encode it as PNG, write it (overwriting any existing file).  Every failure
//! is returned to the caller as a [`SnapshotError`].

use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

/// Default logical canvas (a common phone viewport, in points).
pub const DEFAULT_SIZE: LogicalSize = LogicalSize {
    width: 393,
    height: 852,
};
pub const DEFAULT_SCALE: f32 = 2.0;
/// Largest bitmap side the harness will allocate, in pixels.
pub const MAX_PIXEL_SIDE: u32 = 16_384;
const DEFAULT_FILE_NAME: &str = "widget-catalog-snapshot.png";

// ───────────────────────────────────────── request ───────────

/// Size in logical points (before the pixel scale is applied).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalSize {
    pub width: u32,
    pub height: u32,
}

impl LogicalSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel dimensions at `scale`, rounded to the nearest pixel.
    pub fn to_pixels(self, scale: f32) -> (u32, u32) {
        let w = (self.width as f32 * scale).round().max(0.0) as u32;
        let h = (self.height as f32 * scale).round().max(0.0) as u32;
        (w, h)
    }
}

/// What to render and where to put it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub size: LogicalSize,
    pub scale: f32,
    pub path: PathBuf,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            scale: DEFAULT_SCALE,
            path: default_snapshot_path(),
        }
    }
}

impl RenderRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn size(mut self, size: LogicalSize) -> Self {
        self.size = size;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// Fixed temp location used when the caller does not pick a path.
pub fn default_snapshot_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_FILE_NAME)
}

// ───────────────────────────────────────── capabilities ──────

/// Turns a view into a bitmap.  Returns `None` when nothing could be drawn.
pub trait Rasterizer {
    type View: ?Sized;

    fn rasterize(&self, view: &Self::View, size: LogicalSize, scale: f32) -> Option<RgbaImage>;
}

/// Persists encoded snapshot bytes.
pub trait SnapshotSink {
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// Writes snapshots to the local filesystem, replacing existing files.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

impl SnapshotSink for FsSink {
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        std::fs::write(path, bytes)
    }
}

// ───────────────────────────────────────── result ────────────

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid render request: {0}")]
    InvalidRequest(String),
    #[error("rasterization produced no image")]
    EmptyRaster,
    #[error("failed to encode snapshot as PNG")]
    Encode(#[source] image::ImageError),
    #[error("failed to write snapshot to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A successfully written snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// The encoded PNG exactly as written.
    pub bytes: Vec<u8>,
}

// ───────────────────────────────────────── harness ───────────

pub struct SnapshotHarness<R, S = FsSink> {
    rasterizer: R,
    sink: S,
}

impl<R: Rasterizer> SnapshotHarness<R, FsSink> {
    pub fn new(rasterizer: R) -> Self {
        Self::with_sink(rasterizer, FsSink)
    }
}

impl<R: Rasterizer, S: SnapshotSink> SnapshotHarness<R, S> {
    pub fn with_sink(rasterizer: R, sink: S) -> Self {
        Self { rasterizer, sink }
    }

    pub fn render(&self, view: &R::View, request: &RenderRequest) -> Result<Snapshot, SnapshotError> {
        validate(request)?;

        let image = self
            .rasterizer
            .rasterize(view, request.size, request.scale)
            .filter(|img| img.width() > 0 && img.height() > 0)
            .ok_or(SnapshotError::EmptyRaster)?;

        let bytes = encode_png(&image)?;

        self.sink
            .write(&request.path, &bytes)
            .map_err(|source| SnapshotError::Write {
                path: request.path.clone(),
                source,
            })?;

        tracing::info!(
            path = %request.path.display(),
            width = image.width(),
            height = image.height(),
            bytes = bytes.len(),
            "snapshot written"
        );

        Ok(Snapshot {
            path: request.path.clone(),
            width: image.width(),
            height: image.height(),
            bytes,
        })
    }
}

fn validate(request: &RenderRequest) -> Result<(), SnapshotError> {
    if !request.scale.is_finite() || request.scale <= 0.0 {
        return Err(SnapshotError::InvalidRequest(format!(
            "scale must be a positive number (got {})",
            request.scale
        )));
    }
    if request.size.width == 0 || request.size.height == 0 {
        return Err(SnapshotError::InvalidRequest(format!(
            "size must be non-zero (got {}x{})",
            request.size.width, request.size.height
        )));
    }
    // f64 so that huge sizes cannot overflow or saturate before the check.
    let scale = f64::from(request.scale);
    let width = (f64::from(request.size.width) * scale).round();
    let height = (f64::from(request.size.height) * scale).round();
    let limit = f64::from(MAX_PIXEL_SIDE);
    if width > limit || height > limit {
        return Err(SnapshotError::InvalidRequest(format!(
            "{}x{} points at {}x is {width}x{height} px, larger than {MAX_PIXEL_SIDE}x{MAX_PIXEL_SIDE}",
            request.size.width, request.size.height, request.scale
        )));
    }
    Ok(())
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, SnapshotError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(SnapshotError::Encode)?;
    Ok(bytes)
}
