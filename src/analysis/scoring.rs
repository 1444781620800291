use super::matchups::MatchupTable;
use std::collections::HashSet;

/// Neutral win rate, deltas are measured against it.
pub const BASELINE_WIN_RATE: f64 = 50.0;
/// A matchup counts as a hard counter above this many points of advantage.
pub const COUNTER_THRESHOLD: f64 = 2.0;
pub const DELTA_WEIGHT: f64 = 2.0;
pub const COUNTER_WEIGHT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CounterScore {
    pub score: f64,
    pub avg_delta: f64,
    pub counters_count: usize,
}

impl CounterScore {
    pub const ZERO: CounterScore = CounterScore {
        score: 0.0,
        avg_delta: 0.0,
        counters_count: 0,
    };
}

/// Scores `candidate` against the enemy picks.
///
/// score = avg_delta × 2 + counters × 5, where avg_delta only averages over
/// enemies the table has data for. Returns [`CounterScore::ZERO`] when the
/// candidate is unknown, the enemy set is empty, or no matchup is found.
/// Enemy ids are treated as a set.
pub fn score<S: AsRef<str>>(candidate: &str, enemy_ids: &[S], table: &MatchupTable) -> CounterScore {
    let row = match table.row(candidate) {
        Some(row) if !enemy_ids.is_empty() => row,
        _ => return CounterScore::ZERO,
    };

    let mut seen: HashSet<&str> = HashSet::with_capacity(enemy_ids.len());
    let mut total_delta = 0.0;
    let mut valid_matchups = 0usize;
    let mut counters_count = 0usize;

    for enemy in enemy_ids {
        let enemy = enemy.as_ref();
        if !seen.insert(enemy) {
            continue;
        }
        let Some(matchup) = row.get(enemy) else {
            continue;
        };

        let delta = matchup.win_rate - BASELINE_WIN_RATE;
        total_delta += delta;
        valid_matchups += 1;
        if delta > COUNTER_THRESHOLD {
            counters_count += 1;
        }
    }

    if valid_matchups == 0 {
        return CounterScore::ZERO;
    }

    let avg_delta = total_delta / valid_matchups as f64;
    CounterScore {
        score: avg_delta * DELTA_WEIGHT + counters_count as f64 * COUNTER_WEIGHT,
        avg_delta,
        counters_count,
    }
}
