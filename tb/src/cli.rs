//! CLI command definitions

use std::path::PathBuf;

use clap::Parser;

/// Taskbreak - break a development task into ordered, actionable steps
#[derive(Debug, Parser)]
#[command(
    name = "tb",
    about = "Break a free-text development task into ordered, actionable steps",
    version
)]
pub struct Cli {
    /// The task to break down, e.g. "Add authentication to the app"
    #[arg(value_name = "TASK")]
    pub task: String,

    /// Use the remote model strategy instead of the built-in templates
    #[arg(long)]
    pub remote: bool,

    /// Path to config file
    #[arg(short, long, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format for the rendered breakdown
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_task_only() {
        let cli = Cli::parse_from(["tb", "Fix the login bug"]);
        assert_eq!(cli.task, "Fix the login bug");
        assert!(!cli.remote);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_parse_remote_flag() {
        let cli = Cli::parse_from(["tb", "Fix the login bug", "--remote"]);
        assert!(cli.remote);
    }

    #[test]
    fn test_cli_parse_format() {
        let cli = Cli::parse_from(["tb", "task", "--format", "json"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["tb", "task", "-c", "/path/to/config.yml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
    }

    #[test]
    fn test_cli_requires_task() {
        assert!(Cli::try_parse_from(["tb"]).is_err());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("plain".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("table".parse::<OutputFormat>().is_err());
    }
}
