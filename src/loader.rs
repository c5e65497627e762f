use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, StatsError};
use crate::model::{Dataset, GameRecord};
use crate::remote;

const REQUIRED_COLUMNS: [&str; 3] = ["game_id", "winner", "opening_name"];

/// Cache-or-fetch: an existing `cache_path` is parsed as is, otherwise `url` is
/// downloaded once and stored verbatim before parsing.
pub fn load_games(cache_path: &Path, url: &str, timeout: Duration) -> Result<Dataset> {
    load_games_with(cache_path, || remote::fetch_text(url, timeout))
}

/// Same as [`load_games`] with the download step supplied by the caller.
/// `fetch` runs at most once, and only when the cache file is absent.
pub fn load_games_with<F>(cache_path: &Path, fetch: F) -> Result<Dataset>
where
    F: FnOnce() -> Result<String>,
{
    if cache_path.exists() {
        vprintln!("loader: cache hit {}", cache_path.display());
    } else {
        vprintln!("loader: cache miss {}, downloading", cache_path.display());
        let body = fetch()?;
        write_cache(cache_path, &body)?;
        vprintln!("loader: cached {} bytes to {}", body.len(), cache_path.display());
    }
    parse_games_file(cache_path)
}

fn write_cache(path: &Path, body: &str) -> Result<()> {
    let io_err = |source| StatsError::CacheIo { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, body.as_bytes()).map_err(io_err)
}

pub fn parse_games_file(path: &Path) -> Result<Dataset> {
    let file = File::open(path)
        .map_err(|source| StatsError::CacheIo { path: path.to_path_buf(), source })?;
    parse_games(BufReader::new(file), path)
}

/// Parses a games CSV with a header row. `path` only labels errors.
pub fn parse_games<R: Read>(reader: R, path: &Path) -> Result<Dataset> {
    let parse_err = |source| StatsError::Parse { path: path.to_path_buf(), source };

    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = rdr.headers().map_err(parse_err)?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(StatsError::MissingColumn { path: path.to_path_buf(), column });
        }
    }

    let games = rdr
        .deserialize::<GameRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(parse_err)?;
    vprintln!("loader: parsed {} games from {}", games.len(), path.display());
    Ok(Dataset::new(games))
}
