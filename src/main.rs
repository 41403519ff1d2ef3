use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edh_stats::calculate::{GroupBy, LeaderboardQuery};
use edh_stats::config::AppConfig;
use edh_stats::service::StatsService;
use edh_stats::storage::{Snapshot, StorageConfig};
use edh_stats::{parse_group_ids, parse_id_list, DeckId, GroupId, PlayerId};

#[derive(Parser)]
#[command(name = "edh-stats")]
#[command(about = "Win rates, streaks and leaderboards for Commander games")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank players, commanders or colour identities by win rate
    Leaderboard {
        /// Grouping: player, commander or color
        #[arg(long, value_parser = clap::value_parser!(GroupBy))]
        by: GroupBy,

        #[arg(long)]
        min_games: Option<u32>,

        #[arg(long)]
        hide_retired_players: bool,

        #[arg(long)]
        hide_retired_decks: bool,

        /// Table sizes to include (e.g. "3,4,5,6")
        #[arg(long)]
        table_sizes: Option<String>,

        /// Player groups to include (e.g. "1,2"); defaults to the default group
        #[arg(long)]
        groups: Option<String>,
    },

    /// Overall win rate of a player
    PlayerWinrate {
        #[arg(long)]
        player: u32,

        #[arg(long)]
        groups: Option<String>,
    },

    /// Profile summary of a player
    PlayerDetail {
        #[arg(long)]
        player: u32,
    },

    /// Games played per player
    GameCounts {
        #[arg(long)]
        hide_retired: bool,
    },

    /// Win and loss streaks of a player
    Streaks {
        #[arg(long)]
        player: u32,

        #[arg(long)]
        groups: Option<String>,
    },

    /// Compare two players in the games they shared
    HeadToHead {
        #[arg(long)]
        player1: u32,

        #[arg(long)]
        player2: u32,

        /// Table sizes to include; an empty string includes every table
        #[arg(long)]
        table_sizes: Option<String>,
    },

    /// Cumulative win rate of a player with one deck
    WinrateOverTime {
        #[arg(long)]
        player: u32,

        #[arg(long)]
        deck: u32,

        #[arg(long, allow_hyphen_values = true)]
        step_size: Option<i32>,

        #[arg(long)]
        groups: Option<String>,
    },

    /// A player's most played decks
    TopPlayedDecks {
        #[arg(long)]
        player: u32,

        #[arg(long)]
        min_games: Option<u32>,

        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        groups: Option<String>,
    },

    /// A player's most successful decks
    TopSuccessfulDecks {
        #[arg(long)]
        player: u32,

        #[arg(long)]
        min_games: Option<u32>,

        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        groups: Option<String>,
    },

    /// A player's win rate per table size
    TableSize {
        #[arg(long)]
        player: u32,

        #[arg(long)]
        groups: Option<String>,
    },

    /// Win rate of one commander
    CommanderWinrate {
        #[arg(long)]
        commander: String,

        #[arg(long)]
        min_games: Option<u32>,

        #[arg(long)]
        groups: Option<String>,
    },

    /// Win rate of every commander
    CommanderWinrates {
        #[arg(long)]
        min_games: Option<u32>,

        #[arg(long)]
        groups: Option<String>,
    },

    /// Games, players and wins for one commander
    CommanderStats {
        #[arg(long)]
        commander: String,
    },

    /// Number of decks per commander combination
    CommanderAmounts,

    /// Win rate of decks containing a colour identity
    ColorWinrate {
        /// Colour letters, e.g. "G" or "UB"
        #[arg(long)]
        colors: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting edh-stats v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());
    let snapshot = Snapshot::load(&storage)
        .with_context(|| format!("Failed to load data from {:?}", storage.data_dir))?;
    let service = StatsService::new(&snapshot);
    let defaults = &config.stats;

    let default_groups: Option<BTreeSet<GroupId>> = defaults
        .group_ids
        .as_ref()
        .map(|ids| ids.iter().copied().map(GroupId).collect());
    let groups = |arg: Option<String>| -> Result<Option<BTreeSet<GroupId>>> {
        match arg {
            Some(s) => Ok(parse_group_ids(Some(&s))?),
            None => Ok(default_groups.clone()),
        }
    };
    // Leaderboards fall back to the snapshot's default group when neither the
    // command line nor the config names any. A blank --groups lifts it.
    let shared_groups = |arg: Option<String>| -> Result<Option<BTreeSet<GroupId>>> {
        match arg {
            Some(s) => Ok(parse_group_ids(Some(&s))?),
            None => Ok(default_groups.clone().or_else(|| snapshot.default_group_ids())),
        }
    };
    let table_sizes = |arg: Option<String>| -> Result<BTreeSet<u32>> {
        match arg {
            Some(s) => Ok(parse_id_list(&s)?),
            None => Ok(defaults.table_sizes.iter().copied().collect()),
        }
    };

    match cli.command {
        Commands::Leaderboard {
            by,
            min_games,
            hide_retired_players,
            hide_retired_decks,
            table_sizes: sizes,
            groups: group_arg,
        } => {
            let query = LeaderboardQuery {
                group_by: by,
                min_games: min_games.unwrap_or(defaults.min_games),
                hide_retired_players,
                hide_retired_decks,
                table_sizes: table_sizes(sizes)?,
                group_ids: shared_groups(group_arg)?,
            };
            print_json(&service.leaderboard(&query))?;
        }
        Commands::PlayerWinrate { player, groups: group_arg } => {
            let group_ids = groups(group_arg)?;
            print_json(&service.player_win_rate(PlayerId(player), group_ids.as_ref())?)?;
        }
        Commands::PlayerDetail { player } => {
            print_json(&service.player_detail(PlayerId(player))?)?;
        }
        Commands::GameCounts { hide_retired } => {
            print_json(&service.player_game_counts(hide_retired))?;
        }
        Commands::Streaks { player, groups: group_arg } => {
            let group_ids = groups(group_arg)?;
            print_json(&service.streaks(PlayerId(player), group_ids.as_ref())?)?;
        }
        Commands::HeadToHead {
            player1,
            player2,
            table_sizes: sizes,
        } => {
            let sizes = table_sizes(sizes)?;
            print_json(&service.head_to_head(PlayerId(player1), PlayerId(player2), &sizes)?)?;
        }
        Commands::WinrateOverTime {
            player,
            deck,
            step_size,
            groups: group_arg,
        } => {
            let curve = service.winrate_over_time(
                PlayerId(player),
                DeckId(deck),
                step_size.unwrap_or(defaults.step_size),
                groups(group_arg)?,
            )?;
            print_json(&curve)?;
        }
        Commands::TopPlayedDecks {
            player,
            min_games,
            limit,
            groups: group_arg,
        } => {
            let group_ids = groups(group_arg)?;
            let decks = service.top_played_decks(
                PlayerId(player),
                min_games.unwrap_or(defaults.min_games),
                limit.unwrap_or(defaults.limit),
                group_ids.as_ref(),
            )?;
            print_json(&decks)?;
        }
        Commands::TopSuccessfulDecks {
            player,
            min_games,
            limit,
            groups: group_arg,
        } => {
            let group_ids = groups(group_arg)?;
            let decks = service.top_successful_decks(
                PlayerId(player),
                min_games.unwrap_or(defaults.min_games),
                limit.unwrap_or(defaults.limit),
                group_ids.as_ref(),
            )?;
            print_json(&decks)?;
        }
        Commands::TableSize { player, groups: group_arg } => {
            let group_ids = groups(group_arg)?;
            print_json(&service.table_size_win_rates(PlayerId(player), group_ids.as_ref())?)?;
        }
        Commands::CommanderWinrate {
            commander,
            min_games,
            groups: group_arg,
        } => {
            let rate = service.commander_win_rate(
                &commander,
                min_games.unwrap_or(defaults.min_games),
                groups(group_arg)?,
            );
            print_json(&rate)?;
        }
        Commands::CommanderWinrates {
            min_games,
            groups: group_arg,
        } => {
            let rates = service.commander_win_rates(
                min_games.unwrap_or(defaults.min_games),
                shared_groups(group_arg)?,
            );
            print_json(&rates)?;
        }
        Commands::CommanderStats { commander } => {
            print_json(&service.commander_stats(&commander))?;
        }
        Commands::CommanderAmounts => {
            print_json(&service.commander_amounts())?;
        }
        Commands::ColorWinrate { colors } => {
            print_json(&service.color_win_rate(&colors))?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
