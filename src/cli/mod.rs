//! Command-line interface for qlcomplete
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - One-shot completion and classification of a query
//! - Mode selection (one-shot subcommands vs interactive shell)

pub mod completion;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use crate::completion::{CompletionEngine, replace_range};
use crate::config::{Config, LogLevel};
use crate::dialect::{Classification, Dialect, landmarks};
use crate::error::Result;
use crate::language::{LinkedToken, Position, TokenRange};

/// Query-language completion engine
#[derive(Parser, Debug)]
#[command(
    name = "qlcomplete",
    version,
    about = "Context-aware completion for log, SQL, pipeline and metric math queries",
    long_about = "Classifies the cursor context of a query written in one of several small
query languages and lists the completions that fit there. Runs one-shot from the
command line or as an interactive shell."
)]
pub struct CliArgs {
    /// Query dialect (logs, sql, ppl, metric-math)
    #[arg(
        short = 'l',
        long,
        value_name = "DIALECT",
        value_parser = PossibleValuesParser::new(["logs", "sql", "ppl", "metric-math"])
            .try_map(|name| name.parse::<Dialect>())
    )]
    pub dialect: Option<Dialect>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Region field lookups are scoped to
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Account field lookups are scoped to
    #[arg(long, value_name = "ID")]
    pub account_id: Option<String>,

    /// Field group to complete against (repeatable)
    #[arg(short = 'g', long = "group", value_name = "NAME")]
    pub groups: Vec<String>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Query text and cursor shared by the one-shot subcommands
#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    /// Query text (read from stdin when omitted)
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// 1-based cursor line (defaults to the end of the query)
    #[arg(long, requires = "column", value_name = "LINE")]
    pub line: Option<usize>,

    /// 1-based cursor column
    #[arg(long, requires = "line", value_name = "COLUMN")]
    pub column: Option<usize>,

    /// Cursor as a byte offset into the query
    #[arg(long, conflicts_with_all = ["line", "column"], value_name = "BYTES")]
    pub offset: Option<usize>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Subcommands for qlcomplete
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List completions at the cursor as JSON
    Complete(QueryArgs),

    /// Show the token, position and suggestion kinds at the cursor
    Explain(QueryArgs),

    /// Start the interactive shell (default)
    Repl,

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,

        /// Print the field groups of the catalog, one per line
        #[arg(long)]
        list_groups: bool,
    },

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show version information
    Version,
}

/// A token as reported by `explain`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenView {
    pub token_type: String,
    pub value: String,
    pub range: TokenRange,
}

impl From<LinkedToken<'_>> for TokenView {
    fn from(token: LinkedToken<'_>) -> Self {
        Self {
            token_type: token.token_type().to_string(),
            value: token.value().to_string(),
            range: token.range(),
        }
    }
}

/// Output of `explain`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    #[serde(flatten)]
    pub classification: Classification,
    pub current: Option<TokenView>,
    pub anchor: Option<TokenView>,
    pub replace_range: TokenRange,
}

impl QueryArgs {
    /// Query text from the argument or stdin
    pub fn text(&self) -> Result<String> {
        match &self.query {
            Some(query) => Ok(query.clone()),
            None => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text.trim_end_matches(['\n', '\r']).to_string())
            }
        }
    }

    /// Cursor position within `text`
    pub fn cursor(&self, text: &str) -> Position {
        match (self.line, self.column, self.offset) {
            (Some(line), Some(column), _) => Position::new(line, column),
            (_, _, Some(offset)) => Position::from_byte_offset(text, offset),
            _ => Position::end_of(text),
        }
    }
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        let config = Self::load_config(&args)?;

        Ok(Self { args, config })
    }

    /// Load configuration from file, environment and arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    fn load_config(args: &CliArgs) -> Result<Config> {
        let config_path = args.config_file.as_deref();
        let mut config = Config::load_from_file(config_path)?;

        // Validate loaded configuration
        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        config.apply_env()?;

        // Apply CLI arguments to override config values
        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Dialect in effect: flag, then environment, then file
    pub fn dialect(&self) -> Dialect {
        self.config.completion.dialect
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_completion_args(config, args);
        Self::apply_logging_args(config, args);

        if args.no_color {
            config.repl.highlighting = false;
        }
    }

    /// Apply completion-related CLI arguments to configuration
    fn apply_completion_args(config: &mut Config, args: &CliArgs) {
        if let Some(dialect) = args.dialect {
            config.completion.dialect = dialect;
        }
        if let Some(region) = &args.region {
            config.completion.region = region.clone();
        }
        if let Some(account_id) = &args.account_id {
            config.completion.account_id = Some(account_id.clone());
        }
        if !args.groups.is_empty() {
            config.completion.field_groups = args.groups.clone();
        }
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Completion engine backed by the configured field catalog
    pub fn build_engine(&self) -> CompletionEngine {
        CompletionEngine::new(
            Arc::new(self.config.resource_provider()),
            self.config.completion_settings(),
        )
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to start the shell
    pub async fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Complete(query)) => {
                self.run_complete(query).await?;
                Ok(true)
            }
            Some(Commands::Explain(query)) => {
                self.run_explain(query)?;
                Ok(true)
            }
            Some(Commands::Config {
                show,
                validate,
                list_groups,
            }) => {
                self.handle_config_command(*show, *validate, *list_groups)?;
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Repl) | None => Ok(false),
        }
    }

    /// Print the completions at the cursor as a JSON array
    async fn run_complete(&self, query: &QueryArgs) -> Result<()> {
        let text = query.text()?;
        let cursor = query.cursor(&text);
        let items = self
            .build_engine()
            .complete(self.dialect(), &text, cursor)
            .await;
        println!("{}", to_json(&items, query.pretty)?);
        Ok(())
    }

    /// Print the classification of the cursor context
    fn run_explain(&self, query: &QueryArgs) -> Result<()> {
        let text = query.text()?;
        let cursor = query.cursor(&text);
        let explanation = explain(&self.build_engine(), self.dialect(), &text, cursor);
        println!("{}", to_json(&explanation, query.pretty)?);
        Ok(())
    }

    /// Show version information
    fn show_version(&self) {
        println!("qlcomplete version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
        let dialects: Vec<&str> = Dialect::ALL.iter().map(Dialect::name).collect();
        println!("Dialects: {}", dialects.join(", "));
    }

    /// Handle config subcommand
    fn handle_config_command(&self, show: bool, validate: bool, list_groups: bool) -> Result<()> {
        if validate {
            self.validate_config_file()?;
        }

        if show {
            self.show_config()?;
        }

        if list_groups {
            for group in self.config.completion.field_catalog.keys() {
                println!("{}", group);
            }
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("❌ Configuration file does not exist");
            return Ok(());
        }

        match Config::load_from_file(Some(path.as_path())) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("✅ Configuration is valid"),
                Err(e) => println!("❌ Configuration validation failed: {}", e),
            },
            Err(e) => println!("❌ Failed to load configuration: {}", e),
        }

        Ok(())
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Configuration file: {}", path.display());
        println!();
        println!("=== Effective Configuration ===");
        println!();
        println!("{}", self.config.to_toml()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_config_path)
    }

    /// Print banner with version and dialect
    pub fn print_banner(&self) {
        if !self.args.quiet {
            println!("qlcomplete {}", env!("CARGO_PKG_VERSION"));
            println!(
                "Dialect: {} (switch with :dialect <name>, leave with :quit)",
                self.dialect()
            );
        }
    }
}

/// Classify the cursor context and describe the tokens around it
pub fn explain(
    engine: &CompletionEngine,
    dialect: Dialect,
    text: &str,
    cursor: Position,
) -> Explanation {
    let chain = engine.tokenize(dialect, text, cursor);
    let current = chain.current();
    Explanation {
        classification: Classification::of(dialect, current),
        current: current.map(TokenView::from),
        anchor: landmarks::anchor(current).map(TokenView::from),
        replace_range: replace_range(current, cursor),
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interface(argv: &[&str]) -> CliInterface {
        let args = CliArgs::try_parse_from(argv).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        CliInterface { args, config }
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(["qlcomplete"]).unwrap();
        assert!(args.dialect.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_dialect_flag() {
        let args = CliArgs::try_parse_from(["qlcomplete", "-l", "metric-math"]).unwrap();
        assert_eq!(args.dialect, Some(Dialect::MetricMath));
        assert!(CliArgs::try_parse_from(["qlcomplete", "--dialect", "kql"]).is_err());
    }

    #[test]
    fn test_complete_subcommand() {
        let args = CliArgs::try_parse_from([
            "qlcomplete",
            "complete",
            "SELECT a\nFROM ",
            "--line",
            "2",
            "--column",
            "6",
        ])
        .unwrap();
        let Some(Commands::Complete(query)) = args.command else {
            panic!("expected complete");
        };
        let text = query.text().unwrap();
        assert_eq!(query.cursor(&text), Position::new(2, 6));
    }

    #[test]
    fn test_cursor_flags() {
        assert!(CliArgs::try_parse_from(["qlcomplete", "explain", "x", "--line", "1"]).is_err());
        assert!(
            CliArgs::try_parse_from([
                "qlcomplete", "explain", "x", "--offset", "1", "--line", "1", "--column", "1"
            ])
            .is_err()
        );

        let args = CliArgs::try_parse_from(["qlcomplete", "explain", "fields a", "--offset", "6"])
            .unwrap();
        let Some(Commands::Explain(query)) = args.command else {
            panic!("expected explain");
        };
        assert_eq!(query.cursor("fields a"), Position::new(1, 7));
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args =
            CliArgs::try_parse_from(["qlcomplete", "--no-color", "--quiet", "-g", "a", "-g", "b"])
                .unwrap();
        assert!(args.no_color);
        assert!(args.quiet);
        assert_eq!(args.groups, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_args_override_config() {
        let cli = interface(&[
            "qlcomplete",
            "-l",
            "sql",
            "--region",
            "eu-central-1",
            "-g",
            "app",
            "--vv",
            "--no-color",
        ]);
        assert_eq!(cli.dialect(), Dialect::Sql);
        assert_eq!(cli.config().completion.region, "eu-central-1");
        assert_eq!(cli.config().completion.field_groups, vec!["app".to_string()]);
        assert_eq!(cli.config().logging.level, LogLevel::Trace);
        assert!(!cli.config().repl.highlighting);
    }

    #[test]
    fn test_quiet_lowers_log_level() {
        let cli = interface(&["qlcomplete", "-q"]);
        assert_eq!(cli.config().logging.level, LogLevel::Error);
    }

    #[test]
    fn test_explain() {
        let cli = interface(&["qlcomplete", "-l", "sql"]);
        let text = "SELECT a FROM `g` WH";
        let explanation = explain(&cli.build_engine(), cli.dialect(), text, Position::end_of(text));

        let json = serde_json::to_value(&explanation).unwrap();
        assert_eq!(json["dialect"], "sql");
        assert_eq!(json["position"], "AfterFromArguments");
        assert_eq!(json["current"]["value"], "WH");
        assert_eq!(json["anchor"]["value"], "`g`");
        assert_eq!(explanation.replace_range, TokenRange::on_line(1, 19, 21));
    }

    #[test]
    fn test_explain_empty_query() {
        let cli = interface(&["qlcomplete", "-l", "ppl"]);
        let explanation = explain(&cli.build_engine(), cli.dialect(), "", Position::new(1, 1));
        assert!(explanation.current.is_none());
        assert!(explanation.anchor.is_none());
        assert!(!explanation.classification.kinds.is_empty());
    }

    #[tokio::test]
    async fn test_handle_subcommand_defaults_to_shell() {
        let cli = interface(&["qlcomplete"]);
        assert!(!cli.handle_subcommand().await.unwrap());
        let cli = interface(&["qlcomplete", "repl"]);
        assert!(!cli.handle_subcommand().await.unwrap());
    }
}
