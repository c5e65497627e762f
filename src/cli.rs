use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

pub struct Cli {
    pub config: PathBuf, // config.toml location (optional file)
    pub verbose: bool,
    pub help: bool,
}

pub fn parse() -> Cli {
    parse_from(std::env::args().skip(1))
}

fn parse_from<I: IntoIterator<Item = String>>(args: I) -> Cli {
    let mut config = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut verbose = false;
    let mut help = false;

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                if let Some(p) = it.next() { config = PathBuf::from(p); }
            }
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => help = true,
            _ => {}
        }
    }

    Cli { config, verbose, help }
}

pub fn print_help() {
    eprintln!(
r#"Chess Stats

Usage:
  chess_stats [--config config.toml] [-v]

Fetches the TidyTuesday lichess games CSV once (cached under data/), then
writes three charts:
  plots/waffle_plot_chess_wins.png     wins by colour
  plots/barplot_opening_freq.png       most popular opening groups
  plots/grouped_bar_top5openings.png   win splits for the top openings

Options:
  -c, --config PATH   Config file (default: config.toml; missing = defaults).
  -v, --verbose       Per-stage timings/logs on stderr.
  -h, --help          Show this help.

Notes:
  • Delete the cached CSV to force a fresh download.
  • A corrupt cache is an error; it is never re-fetched automatically.
"#);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_is_a_plain_batch_run() {
        let cli = parse_from(args(&[]));
        assert_eq!(cli.config, PathBuf::from("config.toml"));
        assert!(!cli.verbose);
        assert!(!cli.help);
    }

    #[test]
    fn flags_are_recognised() {
        let cli = parse_from(args(&["-v", "--config", "alt.toml", "--help"]));
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
        assert!(cli.verbose);
        assert!(cli.help);
    }

    #[test]
    fn unknown_flags_are_ignored() {
        let cli = parse_from(args(&["--frobnicate", "-v"]));
        assert!(cli.verbose);
    }
}
