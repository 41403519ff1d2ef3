//! Grouping keys and participation filters shared by every statistic.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{DeckRef, GroupId, Participation};

/// Key used for participations whose deck is missing or has no commanders.
pub const UNKNOWN_KEY: &str = "Unknown";

/// Dimension a leaderboard is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupBy {
    Player,
    Commander,
    Color,
}

impl GroupBy {
    /// Grouping key of one participation.
    pub fn key(self, p: &Participation) -> String {
        match self {
            GroupBy::Player => p.player.name.clone(),
            GroupBy::Commander => commander_key(p.deck.as_ref()),
            GroupBy::Color => p
                .deck
                .as_ref()
                .map(|d| d.colors.clone())
                .unwrap_or_else(|| UNKNOWN_KEY.to_string()),
        }
    }
}

/// Render a deck's commanders as `[A, B]` in ascending order, so partner
/// pairs group together regardless of how they were entered.
pub fn commander_key(deck: Option<&DeckRef>) -> String {
    match deck {
        Some(d) if !d.commanders.is_empty() => format!("[{}]", d.sorted_commanders().join(", ")),
        _ => UNKNOWN_KEY.to_string(),
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupBy::Player => write!(f, "PLAYER"),
            GroupBy::Commander => write!(f, "COMMANDER"),
            GroupBy::Color => write!(f, "COLOR"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown grouping '{0}' (expected player, commander or color)")]
pub struct ParseGroupByError(pub String);

impl FromStr for GroupBy {
    type Err = ParseGroupByError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "player" => Ok(GroupBy::Player),
            "commander" => Ok(GroupBy::Commander),
            "color" | "colour" => Ok(GroupBy::Color),
            _ => Err(ParseGroupByError(s.to_string())),
        }
    }
}

/// Group participations by key. Key order of the map is arbitrary; callers
/// sort the derived results.
pub fn group_participations<'a, I>(
    participations: I,
    by: GroupBy,
) -> HashMap<String, Vec<&'a Participation>>
where
    I: IntoIterator<Item = &'a Participation>,
{
    let mut groups: HashMap<String, Vec<&Participation>> = HashMap::new();
    for p in participations {
        groups.entry(by.key(p)).or_default().push(p);
    }
    groups
}

/// Composable participation filter.
///
/// The two whitelists distinguish absent from empty: `None` applies no
/// restriction, while `Some` of an empty set lets nothing through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipationFilter {
    pub hide_retired_players: bool,
    pub hide_retired_decks: bool,
    pub table_sizes: Option<BTreeSet<u32>>,
    pub group_ids: Option<BTreeSet<GroupId>>,
}

impl ParticipationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hide_retired_players(mut self, hide: bool) -> Self {
        self.hide_retired_players = hide;
        self
    }

    pub fn hide_retired_decks(mut self, hide: bool) -> Self {
        self.hide_retired_decks = hide;
        self
    }

    pub fn table_sizes(mut self, sizes: BTreeSet<u32>) -> Self {
        self.table_sizes = Some(sizes);
        self
    }

    pub fn group_ids(mut self, groups: Option<BTreeSet<GroupId>>) -> Self {
        self.group_ids = groups;
        self
    }

    /// Whether a participation passes every condition.
    pub fn matches(&self, p: &Participation) -> bool {
        if self.hide_retired_players && p.player.retired {
            return false;
        }
        if self.hide_retired_decks && p.deck_retired() {
            return false;
        }
        if let Some(sizes) = &self.table_sizes {
            if !sizes.contains(&p.game.table_size) {
                return false;
            }
        }
        if let Some(groups) = &self.group_ids {
            match p.game.group_id {
                Some(g) if groups.contains(&g) => {}
                _ => return false,
            }
        }
        true
    }

    /// Participations that pass the filter, in input order.
    pub fn apply<'a>(&self, participations: &'a [Participation]) -> Vec<&'a Participation> {
        participations.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use pretty_assertions::assert_eq;

    fn sizes(values: &[u32]) -> BTreeSet<u32> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_player_key() {
        let p = seat(1, 4, &player(1, "Alice"), None, true);
        assert_eq!(GroupBy::Player.key(&p), "Alice");
    }

    #[test]
    fn test_commander_key_sorted_rendering() {
        let partners = deck(1, "Partners", "WUBR", &["Tymna the Weaver", "Kraum, Ludevic's Opus"]);
        let p = seat(1, 4, &player(1, "Alice"), Some(&partners), true);
        assert_eq!(
            GroupBy::Commander.key(&p),
            "[Kraum, Ludevic's Opus, Tymna the Weaver]"
        );
    }

    #[test]
    fn test_commander_key_order_independent() {
        let a = deck(1, "A", "", &["Zur", "Akiri"]);
        let b = deck(2, "B", "", &["Akiri", "Zur"]);
        assert_eq!(commander_key(Some(&a)), commander_key(Some(&b)));
        assert_eq!(commander_key(Some(&a)), "[Akiri, Zur]");
    }

    #[test]
    fn test_commander_key_treats_names_as_set() {
        let doubled = deck(1, "Atraxa", "WUBG", &["Atraxa", "Atraxa"]);
        let single = deck(2, "Atraxa too", "WUBG", &["Atraxa"]);
        assert_eq!(commander_key(Some(&doubled)), "[Atraxa]");

        let alice = player(1, "Alice");
        let parts = vec![
            seat(1, 4, &alice, Some(&doubled), true),
            seat(2, 4, &alice, Some(&single), false),
        ];
        let groups = group_participations(&parts, GroupBy::Commander);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["[Atraxa]"].len(), 2);
    }

    #[test]
    fn test_commander_key_unknown() {
        let empty = deck(1, "No commander", "G", &[]);
        assert_eq!(commander_key(Some(&empty)), UNKNOWN_KEY);
        assert_eq!(commander_key(None), UNKNOWN_KEY);
    }

    #[test]
    fn test_color_key() {
        let d = deck(1, "Mono green", "G", &["Omnath"]);
        let alice = player(1, "Alice");
        assert_eq!(GroupBy::Color.key(&seat(1, 4, &alice, Some(&d), true)), "G");
        assert_eq!(GroupBy::Color.key(&seat(2, 4, &alice, None, true)), UNKNOWN_KEY);
    }

    #[test]
    fn test_group_by_parse_and_display() {
        assert_eq!("PLAYER".parse::<GroupBy>(), Ok(GroupBy::Player));
        assert_eq!("commander".parse::<GroupBy>(), Ok(GroupBy::Commander));
        assert_eq!(" Colour ".parse::<GroupBy>(), Ok(GroupBy::Color));
        assert_eq!(
            "deck".parse::<GroupBy>(),
            Err(ParseGroupByError("deck".to_string()))
        );
        assert_eq!(GroupBy::Commander.to_string(), "COMMANDER");
    }

    #[test]
    fn test_group_participations_partitions_input() {
        let alice = player(1, "Alice");
        let bob = player(2, "Bob");
        let parts = vec![
            seat(1, 2, &alice, None, true),
            seat(1, 2, &bob, None, false),
            seat(2, 2, &alice, None, false),
        ];

        let groups = group_participations(&parts, GroupBy::Player);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["Alice"].len(), 2);
        assert_eq!(groups["Bob"].len(), 1);
        assert_eq!(groups.values().map(Vec::len).sum::<usize>(), parts.len());
    }

    #[test]
    fn test_default_filter_passes_everything() {
        let p = seat(1, 4, &retired_player(1, "Old"), None, false);
        assert!(ParticipationFilter::new().matches(&p));
    }

    #[test]
    fn test_filter_retired() {
        let old_deck = retired_deck(1, "Old", "R", &["Krenko"]);
        let by_retired_player = seat(1, 4, &retired_player(1, "Old"), None, false);
        let by_retired_deck = seat(1, 4, &player(2, "Bob"), Some(&old_deck), false);
        let no_deck = seat(1, 4, &player(3, "Cid"), None, false);

        let filter = ParticipationFilter::new()
            .hide_retired_players(true)
            .hide_retired_decks(true);
        assert!(!filter.matches(&by_retired_player));
        assert!(!filter.matches(&by_retired_deck));
        assert!(filter.matches(&no_deck));
    }

    #[test]
    fn test_filter_table_sizes() {
        let alice = player(1, "Alice");
        let three = seat(1, 3, &alice, None, true);
        let five = seat(2, 5, &alice, None, true);

        let filter = ParticipationFilter::new().table_sizes(sizes(&[3, 4]));
        assert!(filter.matches(&three));
        assert!(!filter.matches(&five));
    }

    #[test]
    fn test_filter_empty_table_sizes_excludes_all() {
        let p = seat(1, 4, &player(1, "Alice"), None, true);
        let filter = ParticipationFilter::new().table_sizes(BTreeSet::new());
        assert!(!filter.matches(&p));
    }

    #[test]
    fn test_filter_group_ids() {
        let alice = player(1, "Alice");
        let in_one = grouped_seat(1, 4, 1, &alice, None, true);
        let in_two = grouped_seat(2, 4, 2, &alice, None, true);
        let ungrouped = seat(3, 4, &alice, None, true);
        let parts = vec![in_one, in_two, ungrouped];

        let filter = ParticipationFilter::new().group_ids(Some([GroupId(1)].into()));
        let kept = filter.apply(&parts);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].game.group_id, Some(GroupId(1)));

        // Absent whitelist means no restriction
        let filter = ParticipationFilter::new().group_ids(None);
        assert_eq!(filter.apply(&parts).len(), 3);
    }
}
