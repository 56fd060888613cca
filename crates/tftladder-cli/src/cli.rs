//! CLI argument definitions for tftladder.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `puuid` | Look up and store the account of a riot id |
//! | `matches` | Fetch and store recent match ids |
//! | `match` | Fetch and store one match |
//! | `latest` | Fetch and store the most recent match of a player |
//! | `match-details` | Fetch every match listed in a stored match list |
//! | `ladder` | Crawl ranked ladder pages for a tier and division |
//! | `dashboard` | Render the static dashboard over stored records |
//! | `records` | List stored JSON records |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--data-dir` | `data` | Directory holding the JSON records |
//! | `--platform` | `euw1` | Platform routing value |
//! | `--timeout-secs` | `30` | Per-attempt request timeout |
//! | `--max-retries` | `3` | Retries after the first attempt |
//! | `--backoff-secs` | `2` | Backoff base |
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! # Examples
//!
//! ```bash
//! tftladder puuid 'somePlayer#EUW'
//! tftladder matches 'somePlayer#EUW' --count 20
//! tftladder ladder GOLD II --max-pages 5 --pretty
//! tftladder dashboard --out tracker.html
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tftladder_core::config::DEFAULT_DATA_DIR;
use tftladder_core::{Division, MatchOwner, Platform, Puuid, RiotId, Tier, DEFAULT_MATCH_COUNT};

/// Fetch TFT ranked-ladder and match data and keep the raw JSON on disk.
#[derive(Debug, Parser)]
#[command(
    name = "tftladder",
    author,
    version,
    about = "Fetch TFT ladder and match data into local JSON files",
    long_about = "tftladder fetches account, match, and ranked-ladder data from the Riot \
Games TFT API and saves every payload as a JSON file.\n\
\n\
The API key is read from TFTLADDER_API_KEY (or RIOT_API_KEY), optionally via a .env file.\n\
\n\
Use 'tftladder <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Directory holding the JSON records.
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Platform routing value (euw1, na1, kr, ...).
    #[arg(long, global = true, default_value_t = Platform::Euw1)]
    pub platform: Platform,

    /// Per-attempt request timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Retries allowed after the first attempt.
    #[arg(long, global = true, default_value_t = 3)]
    pub max_retries: u32,

    /// Backoff base in seconds.
    #[arg(long, global = true, default_value_t = 2)]
    pub backoff_secs: u64,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up the account of a riot id and store it.
    ///
    /// # Examples
    ///
    ///   tftladder puuid 'somePlayer#EUW'
    ///   tftladder puuid 'somePlayer#EUW' --stored
    Puuid(PuuidArgs),

    /// Fetch recent match ids for a player and store them.
    ///
    /// # Examples
    ///
    ///   tftladder matches 'somePlayer#EUW' --count 20
    ///   tftladder matches --puuid abc123
    Matches(MatchesArgs),

    /// Fetch one match by id and store it.
    Match(MatchArgs),

    /// Fetch the most recent match of a player and store it.
    Latest(OwnerArgs),

    /// Fetch every match listed in the stored match list of a player.
    ///
    /// Run `matches` with a riot id first.
    MatchDetails(MatchDetailsArgs),

    /// Crawl ranked ladder pages for a tier and division.
    ///
    /// Stops at the first empty page or after --max-pages pages.
    ///
    /// # Examples
    ///
    ///   tftladder ladder GOLD II
    ///   tftladder ladder diamond 1 --page 3 --max-pages 2
    Ladder(LadderArgs),

    /// Render the static dashboard over the stored records.
    Dashboard(DashboardArgs),

    /// List stored JSON records.
    Records,
}

/// Arguments for the `puuid` command.
#[derive(Debug, Args)]
pub struct PuuidArgs {
    /// Riot id in `name#tag` form.
    pub riot_id: RiotId,

    /// Read the puuid from the stored account file instead of the API.
    #[arg(long, default_value_t = false)]
    pub stored: bool,
}

/// A player, given either as a riot id or a puuid.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct OwnerArgs {
    /// Riot id in `name#tag` form.
    pub riot_id: Option<RiotId>,

    /// Player puuid.
    #[arg(long, value_parser = Puuid::parse)]
    pub puuid: Option<Puuid>,
}

impl OwnerArgs {
    pub fn owner(&self) -> Option<MatchOwner> {
        match (&self.riot_id, &self.puuid) {
            (Some(riot_id), _) => Some(MatchOwner::RiotId(riot_id.clone())),
            (None, Some(puuid)) => Some(MatchOwner::Puuid(puuid.clone())),
            (None, None) => None,
        }
    }
}

/// Arguments for the `matches` command.
#[derive(Debug, Args)]
pub struct MatchesArgs {
    #[command(flatten)]
    pub owner: OwnerArgs,

    /// Number of match ids to request (1 to 200).
    #[arg(long, default_value_t = DEFAULT_MATCH_COUNT)]
    pub count: u32,
}

/// Arguments for the `match` command.
#[derive(Debug, Args)]
pub struct MatchArgs {
    /// Match id, e.g. EUW1_1234567890.
    pub match_id: String,
}

/// Arguments for the `match-details` command.
#[derive(Debug, Args)]
pub struct MatchDetailsArgs {
    /// Game name whose stored match list is read.
    pub game_name: String,
}

/// Arguments for the `ladder` command.
#[derive(Debug, Args)]
pub struct LadderArgs {
    /// Tier (IRON, BRONZE, SILVER, GOLD, PLATINUM, DIAMOND).
    pub tier: Tier,

    /// Division (I to IV, or 1 to 4).
    pub division: Division,

    /// First page to fetch (1-indexed).
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Stop after this many pages.
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Pause between pages in seconds.
    #[arg(long, default_value_t = 2)]
    pub page_delay_secs: u64,
}

/// Arguments for the `dashboard` command.
#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Directory with game_tracker.html, style.css, and script.js.
    ///
    /// The bundled assets are used when omitted.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Output HTML file.
    #[arg(long, default_value = "dashboard.html")]
    pub out: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_have_documented_defaults() {
        let cli = Cli::try_parse_from(["tftladder", "records"]).expect("parse");

        assert_eq!(cli.data_dir, PathBuf::from("data"));
        assert_eq!(cli.platform, Platform::Euw1);
        assert_eq!(cli.timeout_secs, 30);
        assert_eq!(cli.max_retries, 3);
        assert_eq!(cli.backoff_secs, 2);
        assert!(!cli.pretty);
    }

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "tftladder",
            "ladder",
            "gold",
            "2",
            "--platform",
            "NA1",
            "--max-pages",
            "3",
            "--pretty",
        ])
        .expect("parse");

        assert_eq!(cli.platform, Platform::Na1);
        assert!(cli.pretty);
        let Command::Ladder(args) = cli.command else {
            panic!("expected ladder command");
        };
        assert_eq!(args.tier, Tier::Gold);
        assert_eq!(args.division, Division::II);
        assert_eq!(args.page, 1);
        assert_eq!(args.max_pages, Some(3));
    }

    #[test]
    fn matches_accepts_riot_id_or_puuid_but_not_both() {
        let by_riot_id =
            Cli::try_parse_from(["tftladder", "matches", "somePlayer#NA"]).expect("parse");
        let Command::Matches(args) = by_riot_id.command else {
            panic!("expected matches command");
        };
        assert_eq!(
            args.owner.owner(),
            Some(MatchOwner::RiotId(RiotId::new("somePlayer", "NA").expect("valid")))
        );
        assert_eq!(args.count, DEFAULT_MATCH_COUNT);

        let by_puuid =
            Cli::try_parse_from(["tftladder", "matches", "--puuid", "abc123"]).expect("parse");
        let Command::Matches(args) = by_puuid.command else {
            panic!("expected matches command");
        };
        assert_eq!(
            args.owner.owner(),
            Some(MatchOwner::Puuid(Puuid::parse("abc123").expect("valid")))
        );

        assert!(Cli::try_parse_from([
            "tftladder",
            "matches",
            "somePlayer#NA",
            "--puuid",
            "abc123"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["tftladder", "latest"]).is_err());
    }

    #[test]
    fn invalid_domain_values_are_rejected_at_parse_time() {
        assert!(Cli::try_parse_from(["tftladder", "puuid", "no-tag"]).is_err());
        assert!(Cli::try_parse_from(["tftladder", "ladder", "CHALLENGER", "I"]).is_err());
        assert!(Cli::try_parse_from(["tftladder", "ladder", "GOLD", "5"]).is_err());
        assert!(Cli::try_parse_from(["tftladder", "records", "--platform", "mars1"]).is_err());
    }
}
