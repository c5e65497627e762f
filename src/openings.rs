// src/openings.rs
// Opening names -> opening groups ("King's Pawn Game: Leonardis Variation" ->
// "King's Pawn Game"), plus the two opening tables the bar charts draw.

use std::collections::HashMap;

use crate::model::{Dataset, Outcome, OutcomeTally};

pub const OTHER_GROUP: &str = "Other";

/// Text before the first hierarchy delimiter. `|` counts as `:`, so
/// "Queen's Gambit|Declined: Orthodox Defense" -> "Queen's Gambit".
pub fn opening_group(opening_name: &str) -> &str {
    opening_name
        .split(|c: char| c == '|' || c == ':')
        .next()
        .unwrap_or(opening_name)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpeningCount {
    pub group: String,
    pub count: u64,
}

/// Every opening group with its game count, ordered by count descending and,
/// on equal counts, by the row where the group first appears.
pub fn rank_opening_groups(games: &Dataset) -> Vec<OpeningCount> {
    struct Entry<'a> {
        group: &'a str,
        first_seen: usize,
        count: u64,
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<Entry> = Vec::new();
    for (row, game) in games.games().iter().enumerate() {
        let group = opening_group(&game.opening_name);
        match index.get(group) {
            Some(&i) => entries[i].count += 1,
            None => {
                index.insert(group, entries.len());
                entries.push(Entry { group, first_seen: row, count: 1 });
            }
        }
    }

    entries.sort_by(|a, b| b.count.cmp(&a.count).then(a.first_seen.cmp(&b.first_seen)));
    entries
        .into_iter()
        .map(|e| OpeningCount { group: e.group.to_string(), count: e.count })
        .collect()
}

/// The `top_n` most played groups followed by one "Other" row holding the
/// rest. "Other" is always present, with count 0 when nothing is left over.
pub fn opening_frequencies(games: &Dataset, top_n: usize) -> Vec<OpeningCount> {
    let mut ranked = rank_opening_groups(games);
    let distinct = ranked.len();
    let rest: u64 = ranked.iter().skip(top_n).map(|o| o.count).sum();
    ranked.truncate(top_n);
    ranked.push(OpeningCount { group: OTHER_GROUP.to_string(), count: rest });
    vprintln!(
        "openings: {} distinct groups, kept {}, other={}",
        distinct,
        ranked.len() - 1,
        rest
    );
    ranked
}

/// One (group, outcome) row of the win-split table.
#[derive(Clone, Debug, PartialEq)]
pub struct WinSplit {
    pub group: String,
    pub outcome: Outcome,
    pub count: u64,
    pub total: u64, // games in `group`
    pub ratio: f64, // count / total * 100
}

/// Win splits for the `top_n` most played groups. Rows come in group rank
/// order, then [`Outcome::ALL`] order. The table is sparse: an outcome never
/// seen for a group has no row at all, it is not filled in with zero.
pub fn win_splits(games: &Dataset, top_n: usize) -> Vec<WinSplit> {
    let top: Vec<String> = rank_opening_groups(games)
        .into_iter()
        .take(top_n)
        .map(|o| o.group)
        .collect();
    let slot: HashMap<&str, usize> = top.iter().enumerate().map(|(i, g)| (g.as_str(), i)).collect();

    let mut tallies = vec![OutcomeTally::default(); top.len()];
    for game in games.games() {
        if let Some(&i) = slot.get(opening_group(&game.opening_name)) {
            tallies[i].add(game.winner);
        }
    }

    let mut rows = Vec::new();
    for (group, tally) in top.iter().zip(&tallies) {
        for outcome in Outcome::ALL {
            let count = tally.get(outcome);
            if count == 0 {
                continue;
            }
            rows.push(WinSplit {
                group: group.clone(),
                outcome,
                count,
                total: tally.games,
                ratio: count as f64 / tally.games as f64 * 100.0,
            });
        }
    }
    vprintln!("openings: win splits for {} groups, {} rows", top.len(), rows.len());
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GameRecord;
    use crate::model::Outcome::*;

    fn dataset(rows: &[(Outcome, &str)]) -> Dataset {
        Dataset::new(
            rows.iter()
                .enumerate()
                .map(|(i, (w, name))| GameRecord::new(format!("g{i}"), *w, *name))
                .collect(),
        )
    }

    fn scenario() -> Dataset {
        dataset(&[
            (White, "King's Pawn Game: Leonardis Variation"),
            (Black, "Sicilian Defense"),
            (White, "King's Pawn Game"),
            (Draw, "Queen's Gambit"),
        ])
    }

    /// `n` distinct groups where group k has `n - k` games.
    fn staircase(n: usize) -> Dataset {
        let mut rows = Vec::new();
        for k in 0..n {
            for j in 0..(n - k) {
                let winner = Outcome::ALL[j % 3];
                rows.push((winner, format!("Opening {k:02}: Line {j}")));
            }
        }
        let rows: Vec<(Outcome, &str)> = rows.iter().map(|(w, s)| (*w, s.as_str())).collect();
        dataset(&rows)
    }

    #[test]
    fn pipe_is_treated_as_hierarchy_delimiter() {
        assert_eq!(opening_group("Queen's Gambit|Declined: Orthodox Defense"), "Queen's Gambit");
        assert_eq!(opening_group("King's Pawn Game: Leonardis Variation"), "King's Pawn Game");
        assert_eq!(opening_group("Sicilian Defense"), "Sicilian Defense");
        assert_eq!(opening_group(""), "");
    }

    #[test]
    fn scenario_groups() {
        let ranked = rank_opening_groups(&scenario());
        let got: Vec<(&str, u64)> = ranked.iter().map(|o| (o.group.as_str(), o.count)).collect();
        assert_eq!(
            got,
            [("King's Pawn Game", 2), ("Sicilian Defense", 1), ("Queen's Gambit", 1)]
        );
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let games = dataset(&[
            (White, "Bird Opening"),
            (White, "Alekhine Defense"),
            (Black, "Alekhine Defense: Scandinavian"),
            (Draw, "Bird Opening: Dutch"),
            (Draw, "Center Game"),
        ]);
        let groups: Vec<String> = rank_opening_groups(&games).into_iter().map(|o| o.group).collect();
        assert_eq!(groups, ["Bird Opening", "Alekhine Defense", "Center Game"]);
    }

    #[test]
    fn tie_at_the_cut_off_sends_the_last_seen_group_to_other() {
        // 16 single-game groups, listed in reverse alphabetical order
        let names: Vec<String> = (0..16).rev().map(|k| format!("Opening {k:02}")).collect();
        let rows: Vec<(Outcome, &str)> = names.iter().map(|n| (White, n.as_str())).collect();
        let table = opening_frequencies(&dataset(&rows), 15);

        assert_eq!(table.len(), 16);
        assert_eq!(table[0].group, "Opening 15");
        assert_eq!(table[14].group, "Opening 01");
        assert!(table.iter().all(|o| o.group != "Opening 00"));
        assert_eq!(table[15], OpeningCount { group: "Other".into(), count: 1 });
        assert_eq!(table.iter().map(|o| o.count).sum::<u64>(), 16);
    }

    #[test]
    fn frequencies_keep_top_fifteen_plus_other() {
        let games = staircase(20);
        let table = opening_frequencies(&games, 15);

        assert_eq!(table.len(), 16);
        assert_eq!(table[0].group, "Opening 00");
        assert_eq!(table[14].group, "Opening 14");
        // groups 15..19 hold 5 + 4 + 3 + 2 + 1 games
        assert_eq!(table[15], OpeningCount { group: "Other".into(), count: 15 });
        assert_eq!(table.iter().map(|o| o.count).sum::<u64>(), games.len() as u64);
        for pair in table[..15].windows(2) {
            assert!(pair[0].count > pair[1].count);
        }
    }

    #[test]
    fn other_row_is_present_even_when_empty() {
        let table = opening_frequencies(&scenario(), 15);
        assert_eq!(table.len(), 4);
        assert_eq!(table.last().unwrap(), &OpeningCount { group: "Other".into(), count: 0 });
        assert_eq!(table.iter().map(|o| o.count).sum::<u64>(), 4);
    }

    #[test]
    fn empty_dataset_gives_only_other() {
        let table = opening_frequencies(&Dataset::default(), 15);
        assert_eq!(table, [OpeningCount { group: "Other".into(), count: 0 }]);
        assert!(win_splits(&Dataset::default(), 5).is_empty());
    }

    #[test]
    fn splits_cover_only_top_groups_and_sum_per_group() {
        let games = staircase(8);
        let rows = win_splits(&games, 5);

        let mut groups: Vec<&str> = rows.iter().map(|r| r.group.as_str()).collect();
        groups.dedup();
        assert_eq!(groups, ["Opening 00", "Opening 01", "Opening 02", "Opening 03", "Opening 04"]);

        for group in groups {
            let of_group: Vec<&WinSplit> = rows.iter().filter(|r| r.group == group).collect();
            let total = of_group[0].total;
            assert_eq!(of_group.iter().map(|r| r.count).sum::<u64>(), total);
            let ratio: f64 = of_group.iter().map(|r| r.ratio).sum();
            assert!((ratio - 100.0).abs() < 1e-9, "{group}: {ratio}");
        }
    }

    #[test]
    fn unseen_outcomes_are_absent_not_zero() {
        let rows = win_splits(&scenario(), 5);
        let kpg: Vec<&WinSplit> = rows.iter().filter(|r| r.group == "King's Pawn Game").collect();

        assert_eq!(kpg.len(), 1);
        assert_eq!(kpg[0].outcome, White);
        assert_eq!((kpg[0].count, kpg[0].total), (2, 2));
        assert_eq!(kpg[0].ratio, 100.0);
        assert!(rows.iter().all(|r| r.count > 0));
    }

    #[test]
    fn split_rows_follow_rank_then_outcome_order() {
        let games = dataset(&[
            (Black, "French Defense"),
            (White, "French Defense: Advance"),
            (Draw, "French Defense"),
            (White, "Scotch Game"),
        ]);
        let rows = win_splits(&games, 5);
        let keys: Vec<(&str, Outcome)> = rows.iter().map(|r| (r.group.as_str(), r.outcome)).collect();
        assert_eq!(
            keys,
            [
                ("French Defense", White),
                ("French Defense", Draw),
                ("French Defense", Black),
                ("Scotch Game", White),
            ]
        );
        assert!((rows[0].ratio - 100.0 / 3.0).abs() < 1e-9);
    }
}
