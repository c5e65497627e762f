use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub data_url: String,         // TidyTuesday 2024-10-01 lichess dump
    pub cache_path: PathBuf,      // local copy; existence alone skips the download
    pub plots_dir: PathBuf,
    pub fetch_timeout_secs: u64,
    pub top_openings: usize,      // rows kept before the "Other" bucket
    pub split_openings: usize,    // groups in the win-split chart
    pub waffle_rows: u32,
    pub waffle_columns: u32,
    pub parallel: bool,           // run the three chart pipelines on rayon
    pub rayon_threads: Option<usize>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_url: "https://raw.githubusercontent.com/rfordatascience/tidytuesday/master/data/2024/2024-10-01/chess.csv".to_string(),
            cache_path: PathBuf::from("data/lichess.csv"),
            plots_dir: PathBuf::from("plots"),
            fetch_timeout_secs: 60,
            top_openings: 15,
            split_openings: 5,
            waffle_rows: 34,
            waffle_columns: 23,
            parallel: false,
            rayon_threads: None,
            verbose: false,
        }
    }
}

impl Config {
    /// Reads `path` if it exists. A missing file means defaults; a malformed one
    /// is reported and also falls back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::from_toml(&s).unwrap_or_else(|e| {
                eprintln!("warning: ignoring {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn waffle_path(&self) -> PathBuf {
        self.plots_dir.join("waffle_plot_chess_wins.png")
    }

    pub fn openings_path(&self) -> PathBuf {
        self.plots_dir.join("barplot_opening_freq.png")
    }

    pub fn splits_path(&self) -> PathBuf {
        self.plots_dir.join("grouped_bar_top5openings.png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg.top_openings, 15);
        assert_eq!(cfg.split_openings, 5);
        assert_eq!(cfg.cache_path, PathBuf::from("data/lichess.csv"));
        assert!(!cfg.parallel);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let cfg = Config::from_toml("top_openings = 10\nplots_dir = \"out\"\n").unwrap();
        assert_eq!(cfg.top_openings, 10);
        assert_eq!(cfg.waffle_path(), PathBuf::from("out/waffle_plot_chess_wins.png"));
        assert_eq!(cfg.waffle_rows, 34);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = Config::load(Path::new("definitely/not/here.toml"));
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn malformed_file_is_rejected_by_parser() {
        assert!(Config::from_toml("top_openings = \"many\"").is_err());
    }
}
