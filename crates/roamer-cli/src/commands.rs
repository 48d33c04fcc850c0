//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Roamer: dry-run the suite's suggestion matching and calendar navigation
#[derive(Parser, Debug)]
#[command(name = "roamer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Suite config file (YAML)
    #[arg(long, global = true, env = "ROAMER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick the best suggestion for a target without clicking anything
    Match(MatchArgs),

    /// Plan calendar paging from a displayed page label to a target date
    Plan(PlanArgs),

    /// Remove report directories
    Clean(CleanArgs),

    /// Print the resolved suite configuration as YAML
    Config(ConfigArgs),
}

/// Arguments for the match command
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Text the user would type
    pub target: String,

    /// Suggestion labels in display order
    #[arg(required = true, num_args = 1..)]
    pub candidates: Vec<String>,

    /// Accept only case-insensitive equality
    #[arg(long)]
    pub exact_only: bool,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Target date text
    pub date: String,

    /// Page label the calendar currently shows (e.g. "May 2025")
    pub page_label: String,

    /// Call site whose formats to use
    #[arg(long)]
    pub call_site: Option<String>,

    /// Date pattern, overrides the call site (e.g. dd/MMM/yyyy)
    #[arg(long)]
    pub date_format: Option<String>,

    /// Page label pattern, overrides the call site (e.g. "MMM yyyy")
    #[arg(long)]
    pub label_format: Option<String>,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the clean command
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Directories to remove (defaults to the configured report directories)
    pub paths: Vec<PathBuf>,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Show the navigator settings resolved for one call site
    #[arg(long)]
    pub call_site: Option<String>,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Auto-detect
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_match() {
        let cli = Cli::try_parse_from(["roamer", "match", "goa", "Goa", "North Goa", "--json"]).unwrap();
        let Commands::Match(args) = cli.command else {
            panic!("expected match");
        };
        assert_eq!(args.target, "goa");
        assert_eq!(args.candidates, vec!["Goa", "North Goa"]);
        assert!(args.json);
        assert!(!args.exact_only);
    }

    #[test]
    fn test_match_requires_candidates() {
        assert!(Cli::try_parse_from(["roamer", "match", "goa"]).is_err());
    }

    #[test]
    fn test_parse_plan_with_global_flags() {
        let cli = Cli::try_parse_from([
            "roamer",
            "plan",
            "15/Jul/2025",
            "May 2025",
            "--call-site",
            "airport",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Plan(args) = cli.command else {
            panic!("expected plan");
        };
        assert_eq!(args.call_site.as_deref(), Some("airport"));
        assert_eq!(args.page_label, "May 2025");
    }

    #[test]
    fn test_parse_clean_defaults() {
        let cli = Cli::try_parse_from(["roamer", "clean"]).unwrap();
        let Commands::Clean(args) = cli.command else {
            panic!("expected clean");
        };
        assert!(args.paths.is_empty());
    }
}
