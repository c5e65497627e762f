use crate::error::{Result, StatsError};
use crate::model::{Dataset, Outcome, OutcomeTally};

/// Input of the waffle chart: counts and labels in [`Outcome::ALL`] order.
#[derive(Clone, Debug, PartialEq)]
pub struct WinSummary {
    pub tally: OutcomeTally,
    pub win_values: [u64; 3],
    pub win_percents: [String; 3],
}

pub fn tally_outcomes(games: &Dataset) -> OutcomeTally {
    let mut tally = OutcomeTally::default();
    for game in games.games() {
        tally.add(game.winner);
    }
    tally
}

/// Fails with [`StatsError::EmptyDataset`] rather than dividing by zero.
pub fn win_summary(games: &Dataset) -> Result<WinSummary> {
    if games.is_empty() {
        return Err(StatsError::EmptyDataset);
    }
    let tally = tally_outcomes(games);
    let win_values = Outcome::ALL.map(|o| tally.get(o));
    let total: u64 = win_values.iter().sum();
    let win_percents = win_values.map(|v| format_percent(v, total));
    vprintln!(
        "outcomes: white={} draw={} black={} ({})",
        win_values[0], win_values[1], win_values[2], win_percents.join(" / ")
    );
    Ok(WinSummary { tally, win_values, win_percents })
}

fn format_percent(value: u64, total: u64) -> String {
    format!("{:.1}%", value as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GameRecord;

    fn dataset(winners: &[Outcome]) -> Dataset {
        Dataset::new(
            winners
                .iter()
                .enumerate()
                .map(|(i, w)| GameRecord::new(i.to_string(), *w, "Sicilian Defense"))
                .collect(),
        )
    }

    fn percent_value(s: &str) -> f64 {
        s.trim_end_matches('%').parse().unwrap()
    }

    #[test]
    fn four_game_scenario() {
        use crate::model::Outcome::*;
        let summary = win_summary(&dataset(&[White, Black, White, Draw])).unwrap();

        assert_eq!(summary.tally.white_wins, 2);
        assert_eq!(summary.tally.black_wins, 1);
        assert_eq!(summary.tally.draws, 1);
        assert_eq!(summary.win_values, [2, 1, 1]);
        assert_eq!(summary.win_percents, ["50.0%", "25.0%", "25.0%"]);
    }

    #[test]
    fn empty_dataset_is_an_explicit_error() {
        let err = win_summary(&Dataset::default()).unwrap_err();
        assert!(matches!(err, StatsError::EmptyDataset));
    }

    #[test]
    fn tally_counts_sum_to_game_count() {
        use crate::model::Outcome::*;
        let games = dataset(&[White, White, Draw, Black, Black, Black, Draw]);
        let tally = tally_outcomes(&games);
        assert_eq!(tally.games, games.len() as u64);
        assert_eq!(tally.white_wins + tally.black_wins + tally.draws, games.len() as u64);
    }

    #[test]
    fn percents_sum_to_hundred_within_rounding() {
        use crate::model::Outcome::*;
        let cases: [&[Outcome]; 4] = [
            &[White, Draw, Black],
            &[White, White, Draw, Black, Black, Black, Draw],
            &[Black],
            &[White, White, White, White, White, White, Draw, Draw, Draw, Black, Black],
        ];
        for winners in cases {
            let summary = win_summary(&dataset(winners)).unwrap();
            let sum: f64 = summary.win_percents.iter().map(|p| percent_value(p)).sum();
            assert!((sum - 100.0).abs() <= 0.3, "{:?} sums to {}", summary.win_percents, sum);
        }
    }

    #[test]
    fn single_outcome_reports_zero_for_the_others() {
        let summary = win_summary(&dataset(&[Outcome::Draw, Outcome::Draw])).unwrap();
        assert_eq!(summary.win_values, [0, 2, 0]);
        assert_eq!(summary.win_percents, ["0.0%", "100.0%", "0.0%"]);
    }
}
