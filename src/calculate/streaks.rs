//! Win/loss streak detection.

use tracing::debug;

use crate::models::{Participation, StreakRecord};

/// Run-length encode a sequence of outcomes: a run of wins becomes its
/// length, a run of losses its negated length.
///
/// `[W, W, L, L, W]` encodes as `[2, -2, 1]`. An empty sequence encodes as `[]`.
pub fn streaks_from_outcomes<I>(outcomes: I) -> Vec<i32>
where
    I: IntoIterator<Item = bool>,
{
    let mut runs = Vec::new();
    let mut outcomes = outcomes.into_iter();

    let Some(mut current) = outcomes.next() else {
        return runs;
    };
    let mut length: i32 = 1;

    for won in outcomes {
        if won == current {
            length += 1;
        } else {
            runs.push(if current { length } else { -length });
            current = won;
            length = 1;
        }
    }
    runs.push(if current { length } else { -length });

    runs
}

/// Streaks of one player, in game order.
///
/// The participations are sorted by game id before scanning, so the result
/// does not depend on the order the caller loaded them in.
pub fn streaks(player_name: &str, participations: &[Participation]) -> StreakRecord {
    let mut ordered: Vec<&Participation> = participations.iter().collect();
    ordered.sort_by_key(|p| p.game_id());

    let streaks = streaks_from_outcomes(ordered.iter().map(|p| p.winner));
    debug!(
        "Player {}: {} games, {} streaks",
        player_name,
        ordered.len(),
        streaks.len()
    );

    StreakRecord {
        player_name: player_name.to_string(),
        streaks,
    }
}
