//! ga CLI
//!
//! League events → passing network / positional map / player report (JSON)
//! League CSV → MessagePack+LZ4 snapshot

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use event_loader::{ClubAssetResolver, FuzzyLogoResolver, LeagueEvents, LeagueStore};
#[cfg(feature = "cli")]
use ga_core::{AnalysisConfig, ClubDirectory, MinuteWindow, PreparedMatch, ZoneLayout};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use std::sync::Arc;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "ga")]
#[command(about = "Aggregate football match event logs into passing networks and positional maps", long_about = None)]
struct Cli {
    /// Directory holding the `{League}_events.csv` files
    #[arg(long, global = true, default_value = "csv_data")]
    data_dir: PathBuf,

    /// Read events from a snapshot instead of the league CSV
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Analysis config (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Club directory (YAML, clubs per league)
    #[arg(long, global = true, default_value = "clubs.yaml")]
    clubs: PathBuf,

    /// Pretty-print JSON output
    #[arg(long, global = true, default_value = "false")]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct MatchArgs {
    /// League name (e.g. "Ligue 1")
    #[arg(long)]
    league: String,

    /// Match title as it appears in the `game` column
    #[arg(long)]
    game: String,

    /// Window start minute
    #[arg(long, default_value = "0")]
    from: u32,

    /// Window end minute (defaults to the last minute of the match)
    #[arg(long)]
    to: Option<u32>,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    Full,
    Vertical,
    Horizontal,
}

#[cfg(feature = "cli")]
impl From<LayoutArg> for ZoneLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Full => ZoneLayout::Full,
            LayoutArg::Vertical => ZoneLayout::Vertical,
            LayoutArg::Horizontal => ZoneLayout::Horizontal,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// List the matches of a league
    Games {
        #[arg(long)]
        league: String,
    },

    /// Passing networks of both teams
    Network {
        #[command(flatten)]
        target: MatchArgs,

        /// Only the team's own substitutions end its first-eleven period
        #[arg(long, default_value = "false")]
        team_scope: bool,

        /// Completed passes needed for a pair to be listed as a link
        #[arg(long)]
        min_link_passes: Option<u32>,

        /// Asset root with `logos/{code}/` folders; adds logo paths to the output
        #[arg(long)]
        logos: Option<PathBuf>,
    },

    /// Positional occupancy maps of both teams
    Positional {
        #[command(flatten)]
        target: MatchArgs,

        #[arg(long, value_enum)]
        layout: Option<LayoutArg>,

        #[arg(long)]
        logos: Option<PathBuf>,
    },

    /// Dribbles and passes of one player
    Player {
        #[command(flatten)]
        target: MatchArgs,

        /// Club name or team id
        #[arg(long)]
        team: String,

        #[arg(long)]
        player: String,
    },

    /// Build a league snapshot from its CSV
    Snapshot {
        #[arg(long)]
        league: String,

        /// Output MsgPack+LZ4 file path
        #[arg(long)]
        out: PathBuf,

        /// Verify snapshot after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    let store = LeagueStore::new(&cli.data_dir);

    match &cli.command {
        Commands::Games { league } => {
            let events = league_events(&cli, &store, league)?;
            let games = serde_json::json!({
                "league": league,
                "events": events.len(),
                "games": events.games(),
            });
            print_json(&games, cli.pretty)?;
        }

        Commands::Network {
            target,
            team_scope,
            min_link_passes,
            logos,
        } => {
            if *team_scope {
                config.network.substitution_scope = ga_core::SubstitutionScope::Team;
            }
            if let Some(min) = min_link_passes {
                config.network.min_link_passes = *min;
            }
            let (prepared, window) = prepare(&cli, &store, target, &config)?;
            let network = ga_core::build_passing_network(&prepared, window, &config);
            let mut out = serde_json::to_value(&network)?;
            out["scale"] = serde_json::to_value(network.scale())?;
            out["links"] = network
                .teams
                .iter()
                .map(|team| {
                    serde_json::json!({
                        "team_id": team.team_id,
                        "links": team.configured_links(&config.network),
                    })
                })
                .collect();
            stamp_schema(&mut out);
            attach_logos(&mut out, logos.as_deref(), &prepared);
            print_json(&out, cli.pretty)?;
        }

        Commands::Positional {
            target,
            layout,
            logos,
        } => {
            if let Some(layout) = layout {
                config.positional.layout = (*layout).into();
            }
            let (prepared, window) = prepare(&cli, &store, target, &config)?;
            let report = ga_core::build_positional_map(&prepared, window, &config);
            let mut out = serde_json::to_value(&report)?;
            stamp_schema(&mut out);
            attach_logos(&mut out, logos.as_deref(), &prepared);
            print_json(&out, cli.pretty)?;
        }

        Commands::Player {
            target,
            team,
            player,
        } => {
            let (prepared, window) = prepare(&cli, &store, target, &config)?;
            let report = ga_core::build_player_report(&prepared, team, player, window, &config)?;
            let mut out = serde_json::to_value(&report)?;
            stamp_schema(&mut out);
            print_json(&out, cli.pretty)?;
        }

        Commands::Snapshot {
            league,
            out,
            verify,
            metadata,
        } => {
            let events = league_events(&cli, &store, league)?;
            let meta = event_loader::build_snapshot(&events, out)?;
            print_metadata(&meta);

            if *verify && !event_loader::verify_snapshot(out, &meta.checksum)? {
                anyhow::bail!("Snapshot verification failed - checksum mismatch");
            }
            if let Some(path) = metadata {
                std::fs::write(path, serde_json::to_string_pretty(&meta)?)
                    .with_context(|| format!("Failed to write metadata: {}", path.display()))?;
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn league_events(cli: &Cli, store: &LeagueStore, league: &str) -> Result<Arc<LeagueEvents>> {
    match &cli.snapshot {
        Some(path) => {
            let events = event_loader::load_snapshot(path)?;
            if events.league != league {
                anyhow::bail!(
                    "Snapshot {} holds {}, not {}",
                    path.display(),
                    events.league,
                    league
                );
            }
            Ok(store.insert(events))
        }
        None => store.get(league),
    }
}

#[cfg(feature = "cli")]
fn prepare(
    cli: &Cli,
    store: &LeagueStore,
    target: &MatchArgs,
    config: &AnalysisConfig,
) -> Result<(PreparedMatch, MinuteWindow)> {
    let events = league_events(cli, store, &target.league)?;
    let rows = events.match_events(&target.game);
    if rows.is_empty() {
        anyhow::bail!("No events for game '{}' in {}", target.game, target.league);
    }

    let directory = ClubDirectory::from_yaml_file(&cli.clubs)
        .with_context(|| format!("Failed to load club directory: {}", cli.clubs.display()))?;
    let prepared = ga_core::prepare_match(&rows, &directory, Some(&target.league), config)?;

    let high = target.to.unwrap_or_else(|| prepared.max_minute());
    let window = MinuteWindow::new(target.from, high)?;
    Ok((prepared, window))
}

#[cfg(feature = "cli")]
fn attach_logos(out: &mut serde_json::Value, root: Option<&Path>, prepared: &PreparedMatch) {
    let Some(root) = root else { return };
    let resolver = FuzzyLogoResolver::new(root);
    let league = prepared.context.league.as_deref().unwrap_or_default();
    out["logos"] = serde_json::json!({
        "home": resolver.logo_path(league, &prepared.context.home.name),
        "away": resolver.logo_path(league, &prepared.context.away.name),
    });
}

#[cfg(feature = "cli")]
fn stamp_schema(out: &mut serde_json::Value) {
    out["schema_version"] = serde_json::json!(ga_core::SCHEMA_VERSION);
}

#[cfg(feature = "cli")]
fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &event_loader::SnapshotMetadata) {
    eprintln!("Snapshot built: {} ({} events)", meta.league, meta.events);
    eprintln!(
        "   Original size:   {} bytes ({:.2} KB)",
        meta.original_size,
        meta.original_size as f64 / 1024.0
    );
    eprintln!(
        "   Compressed size: {} bytes ({:.2} KB)",
        meta.compressed_size,
        meta.compressed_size as f64 / 1024.0
    );
    eprintln!("   Compression:     {:.1}%", meta.compression_ratio * 100.0);
    eprintln!("   Checksum:        {}", meta.checksum);
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("ga CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_outputs_carry_schema_version() {
        let mut out = serde_json::json!({ "teams": [] });
        stamp_schema(&mut out);
        assert_eq!(out["schema_version"], u64::from(ga_core::SCHEMA_VERSION));
    }
}
