//! Per-deck statistics for one player.

use std::collections::HashMap;

use tracing::debug;

use super::{by_win_rate_desc, win_record};
use crate::models::{DeckId, DeckRef, DeckStat, Participation};

/// Performance of every deck in `participations`, ordered by deck id.
/// Participations without a deck are skipped.
pub fn deck_stats(participations: &[Participation]) -> Vec<DeckStat> {
    let mut by_deck: HashMap<DeckId, (&DeckRef, Vec<&Participation>)> = HashMap::new();
    let mut deckless = 0usize;

    for p in participations {
        match &p.deck {
            Some(deck) => by_deck.entry(deck.id).or_insert_with(|| (deck, Vec::new())).1.push(p),
            None => deckless += 1,
        }
    }

    if deckless > 0 {
        debug!("Skipped {} participations without a deck", deckless);
    }

    let mut stats: Vec<DeckStat> = by_deck
        .into_values()
        .map(|(deck, games)| {
            let record = win_record(&games);
            DeckStat {
                deck_id: deck.id,
                deck_name: deck.name.clone(),
                total_games: record.total_games,
                wins: record.wins,
                win_rate: record.win_rate,
                retired: deck.retired,
            }
        })
        .collect();
    stats.sort_by_key(|s| s.deck_id);
    stats
}

/// Most played decks with at least `min_games` games.
///
/// Ordered by descending games played, then descending win rate, then deck
/// name and id.
pub fn top_played_decks(
    participations: &[Participation],
    min_games: u32,
    limit: usize,
) -> Vec<DeckStat> {
    let mut stats = eligible(participations, min_games);
    stats.sort_by(|a, b| {
        b.total_games
            .cmp(&a.total_games)
            .then_with(|| by_win_rate_desc(a.win_rate, b.win_rate))
            .then_with(|| a.deck_name.cmp(&b.deck_name))
            .then_with(|| a.deck_id.cmp(&b.deck_id))
    });
    stats.truncate(limit);
    stats
}

/// Most successful decks with at least `min_games` games.
///
/// Ordered by descending win rate, then descending games played, then deck
/// name and id.
pub fn top_successful_decks(
    participations: &[Participation],
    min_games: u32,
    limit: usize,
) -> Vec<DeckStat> {
    let mut stats = eligible(participations, min_games);
    stats.sort_by(|a, b| {
        by_win_rate_desc(a.win_rate, b.win_rate)
            .then_with(|| b.total_games.cmp(&a.total_games))
            .then_with(|| a.deck_name.cmp(&b.deck_name))
            .then_with(|| a.deck_id.cmp(&b.deck_id))
    });
    stats.truncate(limit);
    stats
}

fn eligible(participations: &[Participation], min_games: u32) -> Vec<DeckStat> {
    deck_stats(participations)
        .into_iter()
        .filter(|s| s.total_games >= min_games)
        .collect()
}
