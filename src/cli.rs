use anyhow::Result;
use clap::builder::TypedValueParser;
use clap::{Args, Parser};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "orgstat")]
#[command(about = "Rank a GitHub organization's repositories by commits and list their biggest contributors")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub stats: StatsArgs,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase log verbosity (-v info, -vv debug)")]
    pub verbose: u8,
}

#[derive(Args, Clone)]
pub struct StatsArgs {
    #[arg(help = "GitHub organization to analyze")]
    pub organization: String,

    #[arg(long, help = "Number of repositories to rank", default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..=100).map(usize::from))]
    pub top_repos: usize,

    #[arg(long, help = "Number of contributors to list per repository", default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..=100).map(usize::from))]
    pub top_contributors: usize,

    #[arg(long, help = "Base URL of the GitHub REST API", default_value = crate::github::DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, help = "Output as JSON", conflicts_with = "ndjson")]
    pub json: bool,

    #[arg(long, help = "Output as NDJSON")]
    pub ndjson: bool,

    #[arg(long, help = "Show a progress bar while counting commits")]
    pub progress: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        init_tracing(self.verbose);
        crate::report::exec(self.stats)
    }
}

/// Logs go to stderr so stdout stays clean for JSON/NDJSON.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::new(format!("orgstat={level}"));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["orgstat", "acme"]).unwrap();
        assert_eq!(cli.stats.organization, "acme");
        assert_eq!(cli.stats.top_repos, 5);
        assert_eq!(cli.stats.top_contributors, 5);
        assert_eq!(cli.stats.api_url, "https://api.github.com");
        assert!(!cli.stats.json && !cli.stats.ndjson && !cli.stats.progress);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn limits_and_flags() {
        let cli = Cli::try_parse_from([
            "orgstat",
            "acme",
            "--top-repos",
            "2",
            "--top-contributors",
            "3",
            "--json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.stats.top_repos, 2);
        assert_eq!(cli.stats.top_contributors, 3);
        assert!(cli.stats.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn rejects_out_of_range_limits_and_missing_org() {
        assert!(Cli::try_parse_from(["orgstat", "acme", "--top-repos", "0"]).is_err());
        assert!(Cli::try_parse_from(["orgstat", "acme", "--top-contributors", "101"]).is_err());
        assert!(Cli::try_parse_from(["orgstat"]).is_err());
        assert!(Cli::try_parse_from(["orgstat", "acme", "--json", "--ndjson"]).is_err());
    }
}
