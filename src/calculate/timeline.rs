//! Cumulative win rate over time.

use tracing::debug;

use super::calculate_win_rate;
use super::grouping::ParticipationFilter;
use crate::models::{DeckId, Participation, PlayerId, WinrateOverTime, WinratePoint};

/// Cumulative win rate of one player with one deck, sampled every
/// `step_size` games.
///
/// A point is emitted at every multiple of `step_size` and always for the
/// final game, so the curve ends at the true overall win rate. A step size of
/// zero or less is treated as 1.
pub fn winrate_over_time(
    player_id: PlayerId,
    deck_id: DeckId,
    participations: &[Participation],
    step_size: i32,
    filter: &ParticipationFilter,
) -> WinrateOverTime {
    let step = step_size.max(1) as u32;

    let mut ordered = filter.apply(participations);
    ordered.sort_by_key(|p| p.game_id());

    let mut points = Vec::new();
    let mut games = 0u32;
    let mut wins = 0u32;
    let last = ordered.len();

    for (i, p) in ordered.iter().enumerate() {
        games += 1;
        if p.winner {
            wins += 1;
        }

        if games % step == 0 || i + 1 == last {
            points.push(WinratePoint {
                games_played: games,
                wins,
                win_rate: calculate_win_rate(wins, games),
            });
        }
    }

    debug!(
        "Win rate curve for player {} deck {}: {} games, {} points",
        player_id,
        deck_id,
        games,
        points.len()
    );

    WinrateOverTime {
        player_id,
        deck_id,
        step_size: step,
        points,
    }
}
