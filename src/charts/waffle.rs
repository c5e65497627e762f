use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{draw_placeholder, outcome_color, render_guard, DrawResult, DARK_SQUARE, FIGURE_SIZE};
use crate::error::Result;
use crate::model::Outcome;
use crate::outcomes::WinSummary;

const TITLE: &str = "Wins by Colour";
const HEADER_HEIGHT: i32 = 200;
const FOOTER_HEIGHT: i32 = 110;
const SIDE_MARGIN: i32 = 40;
/// Gap between neighbouring blocks as a fraction of the block size.
const BLOCK_GAP: f64 = 0.8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WaffleGrid {
    pub rows: u32,
    pub columns: u32,
}

impl WaffleGrid {
    /// Widened so no `config.toml` grid size can overflow.
    pub fn cells(&self) -> u64 {
        self.rows as u64 * self.columns as u64
    }
}

/// Splits `cells` blocks between the categories in proportion to `values`
/// (largest remainder, ties to the earlier category). The result always sums
/// to `cells` unless every value is zero.
pub fn allocate_blocks(values: [u64; 3], cells: u64) -> [u64; 3] {
    let total: u64 = values.iter().sum();
    if total == 0 {
        return [0; 3];
    }
    let (cells, total_wide) = (cells as u128, total as u128);
    let mut blocks = values.map(|v| (v as u128 * cells / total_wide) as u64);
    let remainders = values.map(|v| v as u128 * cells % total_wide);

    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| remainders[b].cmp(&remainders[a]).then(a.cmp(&b)));
    let assigned: u128 = blocks.iter().map(|&b| b as u128).sum();
    for &i in order.iter().take((cells - assigned) as usize) {
        blocks[i] += 1;
    }
    blocks
}

/// Column and row (counted from the bottom) of the `k`-th block when the
/// grid is filled column by column, bottom to top.
fn block_cell(k: u64, rows: u32) -> (u64, u64) {
    (k / rows as u64, k % rows as u64)
}

/// Games one block stands for, as printed in the subtitle.
fn wins_per_block(total: u64, cells: u64) -> u64 {
    (total as f64 / cells as f64).round() as u64
}

pub fn render_waffle(summary: &WinSummary, grid: WaffleGrid, path: &Path) -> Result<()> {
    render_guard(path, || draw_waffle(summary, grid, path))
}

fn draw_waffle(summary: &WinSummary, grid: WaffleGrid, path: &Path) -> DrawResult<()> {
    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&DARK_SQUARE)?;

    let total: u64 = summary.win_values.iter().sum();
    if total == 0 || grid.cells() == 0 {
        draw_placeholder(&root, TITLE)?;
        root.present()?;
        return Ok(());
    }

    let (width, height) = root.dim_in_pixel();
    let cx = width as i32 / 2;
    let title_style = ("sans-serif", 64).into_font().color(&BLACK).pos(Pos::new(HPos::Center, VPos::Top));
    root.draw(&Text::new(TITLE, (cx, 30), title_style))?;
    let per_block = wins_per_block(total, grid.cells());
    let subtitle_style = ("sans-serif", 40).into_font().color(&BLACK).pos(Pos::new(HPos::Center, VPos::Top));
    root.draw(&Text::new(format!("(1 square ≈ {} wins)", per_block), (cx, 110), subtitle_style))?;

    let span = |n: u32| n as f64 + BLOCK_GAP * (n as f64 - 1.0);
    let bottom = (height as i32 - FOOTER_HEIGHT) as f64;
    let avail_w = (width as i32 - 2 * SIDE_MARGIN) as f64;
    let avail_h = bottom - HEADER_HEIGHT as f64;
    let block = f64::min(avail_w / span(grid.columns), avail_h / span(grid.rows));
    let pitch = block * (1.0 + BLOCK_GAP);
    let left = (width as f64 - block * span(grid.columns)) / 2.0;

    let blocks = allocate_blocks(summary.win_values, grid.cells());
    let mut k = 0;
    for (outcome, n) in Outcome::ALL.into_iter().zip(blocks) {
        let style = outcome_color(outcome).filled();
        for _ in 0..n {
            let (col, row) = block_cell(k, grid.rows);
            let x0 = left + col as f64 * pitch;
            let y1 = bottom - row as f64 * pitch;
            root.draw(&Rectangle::new(
                [
                    (x0.round() as i32, (y1 - block).round() as i32),
                    ((x0 + block).round() as i32, y1.round() as i32),
                ],
                style,
            ))?;
            k += 1;
        }
    }

    // legend: one swatch per outcome with its share of games
    let legend_y = height as i32 - FOOTER_HEIGHT / 2;
    let label_style = ("sans-serif", 32).into_font().color(&BLACK).pos(Pos::new(HPos::Left, VPos::Center));
    for (i, outcome) in Outcome::ALL.into_iter().enumerate() {
        let x = width as i32 * (2 * i as i32 + 1) / 6 - 90;
        root.draw(&Rectangle::new(
            [(x, legend_y - 15), (x + 30, legend_y + 15)],
            outcome_color(outcome).filled(),
        ))?;
        let label = format!("{} {}", outcome.label(), summary.win_percents[i]);
        root.draw(&Text::new(label, (x + 42, legend_y), label_style.clone()))?;
    }

    root.present()?;
    Ok(())
}
