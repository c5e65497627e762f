#[macro_use]
mod verbose;
mod charts;
mod cli;
mod config;
mod error;
mod loader;
mod model;
mod openings;
mod outcomes;
mod remote;

use crate::charts::WaffleGrid;
use crate::config::Config;
use crate::model::{Dataset, Outcome};
use crate::openings::OpeningCount;
use crate::outcomes::WinSummary;

/// Tags a stage error with the stage name so the exit message says where
/// the run stopped.
fn stage<T>(doing: &str, res: error::Result<T>) -> anyhow::Result<T> {
    res.map_err(|e| {
        let stage = e.stage();
        anyhow::Error::new(e).context(format!("{} stage failed while {}", stage, doing))
    })
}

fn wins_pipeline(games: &Dataset, cfg: &Config) -> anyhow::Result<WinSummary> {
    verbose::timed("wins", || {
        let summary = stage("computing win percentages", outcomes::win_summary(games))?;
        let grid = WaffleGrid { rows: cfg.waffle_rows, columns: cfg.waffle_columns };
        stage(
            "rendering the waffle chart",
            charts::render_waffle(&summary, grid, &cfg.waffle_path()),
        )?;
        Ok(summary)
    })
}

fn openings_pipeline(games: &Dataset, cfg: &Config) -> anyhow::Result<Vec<OpeningCount>> {
    verbose::timed("openings", || {
        let table = openings::opening_frequencies(games, cfg.top_openings);
        stage(
            "rendering the openings bar chart",
            charts::render_opening_counts(&table, &cfg.openings_path()),
        )?;
        Ok(table)
    })
}

fn splits_pipeline(games: &Dataset, cfg: &Config) -> anyhow::Result<()> {
    verbose::timed("splits", || {
        let rows = openings::win_splits(games, cfg.split_openings);
        stage(
            "rendering the win-split chart",
            charts::render_win_splits(&rows, &cfg.splits_path()),
        )
    })
}

fn print_summary(games: &Dataset, wins: &WinSummary, openings: &[OpeningCount], cfg: &Config) {
    println!("games: {}", games.len());
    let shares: Vec<String> = Outcome::ALL
        .iter()
        .zip(&wins.win_percents)
        .map(|(o, p)| format!("{} {}", o, p))
        .collect();
    println!("wins: {}", shares.join(" | "));
    let top: Vec<String> = openings
        .iter()
        .take(3)
        .map(|o| format!("{} ({})", o.group, o.count))
        .collect();
    println!("top openings: {}", top.join(", "));
    for path in [cfg.waffle_path(), cfg.openings_path(), cfg.splits_path()] {
        println!("wrote {}", path.display());
    }
}

fn main() -> anyhow::Result<()> {
    let args = cli::parse();
    if args.help {
        cli::print_help();
        return Ok(());
    }

    let cfg = Config::load(&args.config);
    verbose::set(args.verbose || cfg.verbose);

    if let Some(n) = cfg.rayon_threads {
        let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
    }

    let games = verbose::timed("load", || {
        stage(
            "loading the dataset",
            loader::load_games(&cfg.cache_path, &cfg.data_url, cfg.fetch_timeout()),
        )
    })?;

    // the three pipelines only share `&games`, so they may run side by side
    let (wins, openings) = if cfg.parallel {
        let (wins, (openings, splits)) = rayon::join(
            || wins_pipeline(&games, &cfg),
            || rayon::join(|| openings_pipeline(&games, &cfg), || splits_pipeline(&games, &cfg)),
        );
        let (wins, openings) = (wins?, openings?);
        splits?;
        (wins, openings)
    } else {
        let wins = wins_pipeline(&games, &cfg)?;
        let openings = openings_pipeline(&games, &cfg)?;
        splits_pipeline(&games, &cfg)?;
        (wins, openings)
    };

    print_summary(&games, &wins, &openings, &cfg);
    Ok(())
}
