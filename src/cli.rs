use std::path::PathBuf;

use clap::Parser;

use curation_checkr::clearlydefined::Server;

#[derive(Parser, Debug)]
#[command(
    name = "curation-checkr",
    about = "Look up ClearlyDefined curations for packages",
    version
)]
pub struct Cli {
    /// Package coordinates as Type:Namespace:Name:Version (e.g. NPM::lodash:4.17.21)
    #[arg(value_name = "COORDINATES")]
    pub ids: Vec<String>,

    /// Read additional coordinates from a file, one per line ('#' starts a comment)
    #[arg(long, value_name = "FILE")]
    pub ids_file: Option<PathBuf>,

    /// ClearlyDefined deployment to query [default: from config, else production]
    #[arg(long, value_name = "SERVER")]
    pub server: Option<ServerArg>,

    /// Config file [default: ./.curation-checkr/config.toml, fallback ~/.config/curation-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds [default: from config, else 10]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors and the summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ServerArg {
    Production,
    Development,
    Localhost,
}

impl From<&ServerArg> for Server {
    fn from(arg: &ServerArg) -> Self {
        match arg {
            ServerArg::Production => Server::Production,
            ServerArg::Development => Server::Development,
            ServerArg::Localhost => Server::Localhost,
        }
    }
}

/// Extract coordinates from an ids file, skipping blank lines and `#` comments.
pub fn parse_ids_file(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let cli = Cli::parse_from([
            "curation-checkr",
            "NPM::lodash:4.17.21",
            "--server",
            "development",
            "-vv",
            "--report",
            "json",
        ]);
        assert_eq!(cli.ids, vec!["NPM::lodash:4.17.21"]);
        assert!(matches!(cli.server, Some(ServerArg::Development)));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.report, ReportFormat::Json));
    }

    #[test]
    fn test_parse_ids_file() {
        let content = "# packages\nNPM::lodash:4.17.21\n\n  Crate::serde:1.0.0  # pinned\n";
        assert_eq!(
            parse_ids_file(content),
            vec!["NPM::lodash:4.17.21", "Crate::serde:1.0.0"]
        );
    }
}
