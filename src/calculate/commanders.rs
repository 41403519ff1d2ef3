//! Commander win rates, popularity and deck counts.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{by_win_rate_desc, calculate_win_rate, count_wins};
use crate::models::{CommanderAmount, CommanderStat, CommanderWinRate, Deck, Participation};

/// Win rate of every participation whose deck includes `commander`
/// (case-insensitive).
///
/// When fewer than `min_games` games match, the games are still reported but
/// wins and win rate are zeroed.
pub fn commander_win_rate(
    participations: &[Participation],
    commander: &str,
    min_games: u32,
) -> CommanderWinRate {
    let matching: Vec<&Participation> = participations
        .iter()
        .filter(|p| p.deck.as_ref().is_some_and(|d| d.has_commander(commander)))
        .collect();
    let total_games = matching.len() as u32;

    if total_games < min_games {
        return CommanderWinRate {
            commander: commander.to_string(),
            total_games,
            wins: 0,
            win_rate: 0.0,
        };
    }

    let wins = count_wins(&matching);
    CommanderWinRate {
        commander: commander.to_string(),
        total_games,
        wins,
        win_rate: calculate_win_rate(wins, total_games),
    }
}

/// Win rate of every distinct commander across `decks`, keeping those with
/// at least `min_games` games.
///
/// Ordered by descending win rate, then descending games played, then name.
pub fn commander_win_rates(
    decks: &[Deck],
    participations: &[Participation],
    min_games: u32,
) -> Vec<CommanderWinRate> {
    let mut seen = HashSet::new();
    let names: Vec<&str> = decks
        .iter()
        .flat_map(|d| d.commanders.iter())
        .map(String::as_str)
        .filter(|name| seen.insert(*name))
        .collect();

    let mut rates: Vec<CommanderWinRate> = names
        .into_iter()
        .map(|name| commander_win_rate(participations, name, min_games))
        .filter(|r| r.total_games >= min_games)
        .collect();

    rates.sort_by(|a, b| {
        by_win_rate_desc(a.win_rate, b.win_rate)
            .then_with(|| b.total_games.cmp(&a.total_games))
            .then_with(|| a.commander.cmp(&b.commander))
    });

    debug!("{} commanders with at least {} games", rates.len(), min_games);
    rates
}

/// Popularity and performance of one commander across all players.
///
/// `participations` are those whose deck includes the commander. Games and
/// players are counted once each; the win rate is wins per distinct game.
pub fn commander_stats(commander: &str, participations: &[Participation]) -> CommanderStat {
    let total_games = participations
        .iter()
        .map(Participation::game_id)
        .collect::<HashSet<_>>()
        .len() as u32;
    let total_players = participations
        .iter()
        .map(Participation::player_id)
        .collect::<HashSet<_>>()
        .len() as u32;
    let total_wins = count_wins(participations);

    CommanderStat {
        commander: commander.to_string(),
        total_games,
        total_players,
        total_wins,
        win_rate: calculate_win_rate(total_wins, total_games),
    }
}

/// Number of decks per commander combination, most common first.
pub fn commander_amounts(decks: &[Deck]) -> Vec<CommanderAmount> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for deck in decks {
        *counts.entry(deck.sorted_commanders().join(", ")).or_default() += 1;
    }

    let mut amounts: Vec<CommanderAmount> = counts
        .into_iter()
        .map(|(commanders, count)| CommanderAmount { commanders, count })
        .collect();
    amounts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.commanders.cmp(&b.commanders)));
    amounts
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use pretty_assertions::assert_eq;

    fn setup() -> (Vec<Deck>, Vec<Participation>) {
        let alice = player(1, "Alice");
        let bob = player(2, "Bob");
        let atraxa = deck(1, "Atraxa", "WUBG", &["Atraxa, Praetors' Voice"]);
        let krenko = deck(2, "Krenko", "R", &["Krenko, Mob Boss"]);
        let partners = deck(3, "Partners", "WB", &["Tymna the Weaver", "Thrasios"]);

        let decks = vec![
            Deck::new(1, "Atraxa", 1).with_commander("Atraxa, Praetors' Voice"),
            Deck::new(2, "Krenko", 2).with_commander("Krenko, Mob Boss"),
            Deck::new(3, "Partners", 2)
                .with_commander("Tymna the Weaver")
                .with_commander("Thrasios"),
        ];
        let parts = vec![
            seat(1, 2, &alice, Some(&atraxa), true),
            seat(1, 2, &bob, Some(&krenko), false),
            seat(2, 2, &alice, Some(&atraxa), false),
            seat(2, 2, &bob, Some(&partners), true),
            seat(3, 2, &alice, Some(&atraxa), true),
            seat(3, 2, &bob, Some(&partners), false),
        ];
        (decks, parts)
    }

    #[test]
    fn test_commander_win_rate() {
        let (_, parts) = setup();
        let rate = commander_win_rate(&parts, "atraxa, praetors' voice", 0);
        assert_eq!(rate.total_games, 3);
        assert_eq!(rate.wins, 2);
        assert!((rate.win_rate - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_commander_win_rate_below_minimum_is_zeroed() {
        let (_, parts) = setup();
        let rate = commander_win_rate(&parts, "Krenko, Mob Boss", 5);
        assert_eq!(
            rate,
            CommanderWinRate {
                commander: "Krenko, Mob Boss".into(),
                total_games: 1,
                wins: 0,
                win_rate: 0.0,
            }
        );
    }

    #[test]
    fn test_commander_win_rate_matches_any_partner() {
        let (_, parts) = setup();
        assert_eq!(commander_win_rate(&parts, "Thrasios", 0).total_games, 2);
        assert_eq!(commander_win_rate(&parts, "Tymna the Weaver", 0).wins, 1);
    }

    #[test]
    fn test_commander_win_rates_sweep() {
        let (decks, parts) = setup();
        let rates = commander_win_rates(&decks, &parts, 0);
        let order: Vec<(&str, u32)> = rates
            .iter()
            .map(|r| (r.commander.as_str(), r.total_games))
            .collect();
        // Atraxa 2/3; Thrasios and Tymna tie at 1/2 and sort by name; Krenko 0/1
        assert_eq!(
            order,
            vec![
                ("Atraxa, Praetors' Voice", 3),
                ("Thrasios", 2),
                ("Tymna the Weaver", 2),
                ("Krenko, Mob Boss", 1),
            ]
        );
    }

    #[test]
    fn test_commander_win_rates_refilters_minimum() {
        let (decks, parts) = setup();
        let rates = commander_win_rates(&decks, &parts, 2);
        assert_eq!(rates.len(), 3);
        assert!(rates.iter().all(|r| r.total_games >= 2));
    }

    #[test]
    fn test_commander_stats_counts_distinct() {
        let alice = player(1, "Alice");
        let bob = player(2, "Bob");
        let a1 = deck(1, "Atraxa", "WUBG", &["Atraxa"]);
        let a2 = deck(2, "Atraxa too", "WUBG", &["Atraxa"]);
        // Both players on Atraxa in game 1
        let parts = vec![
            seat(1, 4, &alice, Some(&a1), true),
            seat(1, 4, &bob, Some(&a2), false),
            seat(2, 4, &alice, Some(&a1), false),
        ];

        let stat = commander_stats("Atraxa", &parts);
        assert_eq!(stat.total_games, 2);
        assert_eq!(stat.total_players, 2);
        assert_eq!(stat.total_wins, 1);
        assert_eq!(stat.win_rate, 0.5);
    }

    #[test]
    fn test_commander_stats_empty() {
        let stat = commander_stats("Nobody", &[]);
        assert_eq!(stat.total_games, 0);
        assert_eq!(stat.win_rate, 0.0);
    }

    #[test]
    fn test_commander_amounts() {
        let decks = vec![
            Deck::new(1, "A", 1).with_commander("Krenko"),
            Deck::new(2, "B", 2).with_commander("Tymna").with_commander("Kraum"),
            Deck::new(3, "C", 3).with_commander("Kraum").with_commander("Tymna"),
            Deck::new(4, "D", 3).with_commander("Atraxa"),
        ];

        assert_eq!(
            commander_amounts(&decks),
            vec![
                CommanderAmount {
                    commanders: "Kraum, Tymna".into(),
                    count: 2,
                },
                CommanderAmount {
                    commanders: "Atraxa".into(),
                    count: 1,
                },
                CommanderAmount {
                    commanders: "Krenko".into(),
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_commander_amounts_ignores_repeated_names() {
        let decks = vec![
            Deck::new(1, "A", 1).with_commander("Atraxa").with_commander("Atraxa"),
            Deck::new(2, "B", 2).with_commander("Atraxa"),
        ];

        assert_eq!(
            commander_amounts(&decks),
            vec![CommanderAmount {
                commanders: "Atraxa".into(),
                count: 2,
            }]
        );
    }
}
