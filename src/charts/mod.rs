//! PNG renderers for the three aggregate tables.
//!
//! Every renderer overwrites its output file and returns nothing but success
//! or a [`StatsError::Render`]. Empty input draws a "No data" placeholder
//! instead of failing.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::{Result, StatsError};
use crate::model::Outcome;

mod bars;
mod waffle;

pub use bars::{render_opening_counts, render_win_splits};
pub use waffle::{render_waffle, WaffleGrid};

type DrawResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// 12in x 12in at 100 dpi.
const FIGURE_SIZE: (u32, u32) = (1200, 1200);

/// Board square colours used as chart backgrounds.
const DARK_SQUARE: RGBColor = RGBColor(0xb6, 0x88, 0x63);
const LIGHT_SQUARE: RGBColor = RGBColor(0xf0, 0xda, 0xb7);

const DRAW_GREY: RGBColor = RGBColor(0x88, 0x88, 0x88);

// Sequential green -> teal -> indigo, sampled evenly for n bars.
const CREST_STOPS: [RGBColor; 3] = [
    RGBColor(165, 205, 144),
    RGBColor(46, 134, 142),
    RGBColor(44, 49, 114),
];

fn outcome_color(outcome: Outcome) -> RGBColor {
    match outcome {
        Outcome::White => WHITE,
        Outcome::Draw => DRAW_GREY,
        Outcome::Black => BLACK,
    }
}

fn crest_palette(n: usize) -> Vec<RGBColor> {
    if n <= 1 {
        return CREST_STOPS[..n].to_vec();
    }
    (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64 * (CREST_STOPS.len() - 1) as f64;
            let seg = (t.floor() as usize).min(CREST_STOPS.len() - 2);
            let f = t - seg as f64;
            let (a, b) = (CREST_STOPS[seg], CREST_STOPS[seg + 1]);
            let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * f).round() as u8;
            RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
        })
        .collect()
}

fn draw_placeholder(root: &DrawingArea<BitMapBackend<'_>, Shift>, title: &str) -> DrawResult<()> {
    let (width, height) = root.dim_in_pixel();
    let cx = width as i32 / 2;
    let title_style = ("sans-serif", 64).into_font().color(&BLACK).pos(Pos::new(HPos::Center, VPos::Top));
    root.draw(&Text::new(title, (cx, 30), title_style))?;
    let body_style = ("sans-serif", 48).into_font().color(&BLACK).pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new("No data", (cx, height as i32 / 2), body_style))?;
    Ok(())
}

/// Creates the output directory, runs `draw`, and turns both plotting errors
/// and backend panics into [`StatsError::Render`].
fn render_guard<F>(path: &Path, draw: F) -> Result<()>
where
    F: FnOnce() -> DrawResult<()>,
{
    let render_err = |message: String| StatsError::Render { path: path.to_path_buf(), message };

    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| render_err(format!("creating {}: {}", dir.display(), e)))?;
    }

    let t0 = Instant::now();
    match panic::catch_unwind(AssertUnwindSafe(draw)) {
        Ok(Ok(())) => {
            vprintln!("charts: wrote {} in {:.3}s", path.display(), t0.elapsed().as_secs_f64());
            Ok(())
        }
        Ok(Err(e)) => Err(render_err(e.to_string())),
        Err(_) => Err(render_err("plotting backend panicked".to_string())),
    }
}
