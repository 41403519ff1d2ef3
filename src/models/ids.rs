//! Numeric entity identifiers.
//!
//! Every entity in the tracker is keyed by a database-assigned integer. The
//! newtypes keep a player id from being passed where a deck id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Get the raw integer value.
            pub fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Player identifier.
    PlayerId
);

entity_id!(
    /// Deck identifier.
    DeckId
);

entity_id!(
    /// Game identifier. Doubles as the chronological order key: a game
    /// created later always has a larger id.
    GameId
);

entity_id!(
    /// Player group identifier.
    GroupId
);
