use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MovieError, Result};
use crate::store::MovieStore;
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;
const MARGIN_LEFT: u32 = 60;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 30;
const MARGIN_BOTTOM: u32 = 50;
const BAR_FILL: f64 = 0.9;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const PINK: Rgb<u8> = Rgb([255, 192, 203]);

/// Equal-width frequency bins spanning the observed ratings.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub lower: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bins `values` into `bins` equal buckets over `[min, max]`. The last
    /// bucket includes its upper edge. When every value is equal the range
    /// is widened to `[v - 0.5, v + 0.5]`.
    pub fn build(values: &[f64], bins: usize) -> Result<Self> {
        if values.is_empty() || bins == 0 {
            return Err(MovieError::EmptyCollection);
        }

        let mut lower = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut upper = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lower == upper {
            lower -= 0.5;
            upper += 0.5;
        }

        let bin_width = (upper - lower) / bins as f64;
        let mut counts = vec![0; bins];
        for value in values {
            let idx = ((value - lower) / bin_width).floor() as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        Ok(Self {
            lower,
            bin_width,
            counts,
        })
    }

    pub fn render(&self) -> RgbImage {
        let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, WHITE);
        let plot_w = (WIDTH - MARGIN_LEFT - MARGIN_RIGHT) as f64;
        let plot_h = (HEIGHT - MARGIN_TOP - MARGIN_BOTTOM) as f64;
        let baseline = HEIGHT - MARGIN_BOTTOM;
        let max_count = self.counts.iter().copied().max().unwrap_or(0).max(1) as f64;
        let slot = plot_w / self.counts.len() as f64;

        for (i, &count) in self.counts.iter().enumerate() {
            let slot_x = MARGIN_LEFT as f64 + slot * i as f64;
            // x-axis tick at the bin's left edge
            fill_rect(&mut img, slot_x as u32, baseline, slot_x as u32 + 1, baseline + 6, BLACK);
            if count == 0 {
                continue;
            }

            let gap = slot * (1.0 - BAR_FILL) / 2.0;
            let x0 = (slot_x + gap).round() as u32;
            let x1 = ((slot_x + slot - gap).round() as u32).max(x0 + 1);
            let bar_h = (count as f64 / max_count * plot_h).round() as u32;
            let y0 = baseline.saturating_sub(bar_h);

            fill_rect(&mut img, x0, y0, x1, baseline, BLACK);
            if x1 > x0 + 2 && baseline > y0 + 2 {
                fill_rect(&mut img, x0 + 1, y0 + 1, x1 - 1, baseline, PINK);
            }
        }
        let right_edge = WIDTH - MARGIN_RIGHT;
        fill_rect(&mut img, right_edge - 1, baseline, right_edge, baseline + 6, BLACK);

        // axes
        fill_rect(&mut img, MARGIN_LEFT, baseline, right_edge, baseline + 1, BLACK);
        fill_rect(&mut img, MARGIN_LEFT - 1, MARGIN_TOP, MARGIN_LEFT, baseline + 1, BLACK);

        img
    }
}

/// Fills `[x0, x1) x [y0, y1)`, clipped to the image.
fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

/// Appends `.png` unless the name already carries it.
pub fn output_path(name: &str) -> PathBuf {
    let path = PathBuf::from(name.trim());
    let is_png = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);
    if is_png {
        path
    } else {
        PathBuf::from(format!("{}.png", name.trim()))
    }
}

/// Writes a rating histogram with one bucket per movie.
pub fn run<S: MovieStore>(store: &S, target: &Path) -> Result<CmdResult> {
    let movies = store.list_movies()?;
    let histogram = Histogram::build(&movies.ratings(), movies.len())?;

    if let Some(dir) = target.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir).map_err(MovieError::Io)?;
        }
    }
    histogram.render().save(target)?;
    tracing::debug!("histogram with {} bins saved to {}", histogram.counts.len(), target.display());

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Histogram saved to {}",
            target.display()
        )))
        .with_output_paths(vec![target.to_path_buf()]))
}
