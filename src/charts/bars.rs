use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::FontTransform;

use super::{crest_palette, draw_placeholder, outcome_color, render_guard, DrawResult, FIGURE_SIZE, LIGHT_SQUARE};
use crate::error::Result;
use crate::model::Outcome;
use crate::openings::{OpeningCount, WinSplit};

const OPENINGS_TITLE: &str = "Most Popular Openings";
const SPLITS_TITLE: &str = "Win splits for popular openings";
const BAR_FILL: f64 = 0.8; // share of a category slot covered by its bars

/// Category `i` is centred on `x = i`, so integer ticks land mid-slot.
fn category_axis(n: usize) -> Range<f64> {
    -0.5..n as f64 - 0.5
}

/// Name for an integer tick; fractional ticks stay blank.
fn category_label(labels: &[&str], x: f64) -> String {
    let i = x.round();
    if i < 0.0 || (x - i).abs() > 1e-6 {
        return String::new();
    }
    labels.get(i as usize).map(|s| s.to_string()).unwrap_or_default()
}

fn y_axis_max(max_count: u64) -> u64 {
    (max_count + max_count / 10).max(1)
}

pub fn render_opening_counts(rows: &[OpeningCount], path: &Path) -> Result<()> {
    render_guard(path, || draw_opening_counts(rows, path))
}

fn draw_opening_counts(rows: &[OpeningCount], path: &Path) -> DrawResult<()> {
    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&LIGHT_SQUARE)?;
    if rows.iter().all(|r| r.count == 0) {
        draw_placeholder(&root, OPENINGS_TITLE)?;
        root.present()?;
        return Ok(());
    }

    let labels: Vec<&str> = rows.iter().map(|r| r.group.as_str()).collect();
    let y_max = y_axis_max(rows.iter().map(|r| r.count).max().unwrap_or(0));

    let mut chart = ChartBuilder::on(&root)
        .caption(OPENINGS_TITLE, ("sans-serif", 64))
        .margin(20)
        .x_label_area_size(300)
        .y_label_area_size(110)
        .build_cartesian_2d(category_axis(labels.len()), 0u64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|x| category_label(&labels, *x))
        .x_label_style(("sans-serif", 18).into_font().transform(FontTransform::Rotate90))
        .x_desc("Opening")
        .y_desc("Number of Games used for")
        .axis_desc_style(("sans-serif", 32))
        .draw()?;

    let half = BAR_FILL / 2.0;
    let colors = crest_palette(rows.len());
    chart.draw_series(rows.iter().zip(colors).enumerate().map(|(i, (row, color))| {
        let x = i as f64;
        Rectangle::new([(x - half, 0), (x + half, row.count)], color.filled())
    }))?;

    root.present()?;
    Ok(())
}

pub fn render_win_splits(rows: &[WinSplit], path: &Path) -> Result<()> {
    render_guard(path, || draw_win_splits(rows, path))
}

fn draw_win_splits(rows: &[WinSplit], path: &Path) -> DrawResult<()> {
    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&LIGHT_SQUARE)?;
    if rows.is_empty() {
        draw_placeholder(&root, SPLITS_TITLE)?;
        root.present()?;
        return Ok(());
    }

    // rows arrive grouped by opening, so consecutive dedup keeps rank order
    let mut labels: Vec<&str> = rows.iter().map(|r| r.group.as_str()).collect();
    labels.dedup();
    let y_max = y_axis_max(rows.iter().map(|r| r.count).max().unwrap_or(0));

    let mut chart = ChartBuilder::on(&root)
        .caption(SPLITS_TITLE, ("sans-serif", 64))
        .margin(20)
        .x_label_area_size(300)
        .y_label_area_size(110)
        .build_cartesian_2d(category_axis(labels.len()), 0u64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|x| category_label(&labels, *x))
        .x_label_style(("sans-serif", 18).into_font().transform(FontTransform::Rotate90))
        .x_desc("Opening")
        .y_desc("Games won")
        .axis_desc_style(("sans-serif", 32))
        .draw()?;

    // every outcome keeps its own sub-slot, so a missing row leaves a gap
    let slot = BAR_FILL / Outcome::ALL.len() as f64;
    let half = BAR_FILL / 2.0;
    for outcome in Outcome::ALL {
        let color = outcome_color(outcome);
        let bars: Vec<(f64, u64)> = rows
            .iter()
            .filter(|r| r.outcome == outcome)
            .filter_map(|r| {
                let group = labels.iter().position(|l| *l == r.group)?;
                Some((group as f64 - half + outcome.index() as f64 * slot, r.count))
            })
            .collect();

        chart
            .draw_series(bars.iter().map(|&(x, count)| {
                Rectangle::new([(x, 0), (x + slot, count)], color.filled())
            }))?
            .label(outcome.label())
            .legend(move |(x, y)| Rectangle::new([(x, y - 8), (x + 16, y + 8)], color.filled()));
        // white bars vanish against the light background without an outline
        chart.draw_series(bars.iter().map(|&(x, count)| {
            Rectangle::new([(x, 0), (x + slot, count)], BLACK.stroke_width(1))
        }))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", 28))
        .background_style(LIGHT_SQUARE.mix(0.9))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
