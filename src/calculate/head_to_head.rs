//! Player versus player comparison.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use super::{calculate_win_rate, win_record};
use crate::models::{GameId, HeadToHead, Participation, PlayerRef};

/// Compare two players overall and in the games they played together.
///
/// `table_sizes` restricts which shared games count. Unlike the leaderboard,
/// an empty set here means no restriction.
///
/// Overall figures cover each player's whole history. A player wins a shared
/// game if any of their participations in it is flagged as a winner, so both
/// players can win the same game.
pub fn head_to_head(
    player1: &PlayerRef,
    player1_games: &[Participation],
    player2: &PlayerRef,
    player2_games: &[Participation],
    table_sizes: &BTreeSet<u32>,
) -> HeadToHead {
    let overall1 = win_record(player1_games);
    let overall2 = win_record(player2_games);

    let in_size = |p: &&Participation| {
        table_sizes.is_empty() || table_sizes.contains(&p.game.table_size)
    };

    let games2: HashSet<GameId> = player2_games.iter().map(Participation::game_id).collect();
    let together: BTreeSet<GameId> = player1_games
        .iter()
        .filter(in_size)
        .map(Participation::game_id)
        .filter(|g| games2.contains(g))
        .collect();

    let wins_in = |games: &[Participation]| -> u32 {
        games
            .iter()
            .filter(|p| p.winner && together.contains(&p.game_id()))
            .map(Participation::game_id)
            .collect::<HashSet<_>>()
            .len() as u32
    };

    let games_together = together.len() as u32;
    let wins1 = wins_in(player1_games);
    let wins2 = wins_in(player2_games);
    let rate1 = calculate_win_rate(wins1, games_together);
    let rate2 = calculate_win_rate(wins2, games_together);

    debug!(
        "{} vs {}: {} shared games, {}-{}",
        player1.name, player2.name, games_together, wins1, wins2
    );

    HeadToHead {
        player1_id: player1.id,
        player1_name: player1.name.clone(),
        player2_id: player2.id,
        player2_name: player2.name.clone(),
        total_games_player1: overall1.total_games,
        total_games_player2: overall2.total_games,
        games_together,
        player1_wins_together: wins1,
        player2_wins_together: wins2,
        win_rate_player1_overall: overall1.win_rate,
        win_rate_player2_overall: overall2.win_rate,
        win_rate_player1_together: rate1,
        win_rate_player2_together: rate2,
        delta_player1: rate1 - overall1.win_rate,
        delta_player2: rate2 - overall2.win_rate,
    }
}
