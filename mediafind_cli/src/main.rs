use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::{Path, PathBuf};

use mediafind_cli::config::{ConfigManager, load_config};
use mediafind_cli::error::CliError;
use mediafind_cli::output::{Classification, OutputFormat, OutputFormatter, create_formatter};
use mediafind_cli::terminal;
use mediafind_core::{Finder, MediaKind, WalkOptions};

#[derive(Parser)]
#[command(name = "mediafind")]
#[command(author, version, about = "Find audio, image and video files by content signature", long_about = None)]
struct Cli {
    #[command(flatten)]
    globals: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Output format (defaults to output.default_format from config)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Configuration file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print entries skipped because of errors to stderr
    #[arg(long, global = true)]
    show_skipped: bool,

    /// Follow symbolic links while walking
    #[arg(long, global = true)]
    follow_links: bool,

    /// Maximum depth for recursive walks
    #[arg(long, global = true, value_name = "N")]
    max_depth: Option<usize>,

    /// Visit directory entries in file name order
    #[arg(long, global = true)]
    sort: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List directories below a root
    Folders {
        /// Directory to list
        root: PathBuf,

        /// Descend into every level instead of immediate children only
        #[arg(short, long)]
        recursive: bool,
    },

    /// List every file below a root
    Files {
        /// Directory to list
        root: PathBuf,
    },

    /// Find files of one media kind
    Find {
        /// Media kind to look for
        #[arg(value_enum)]
        kind: KindArg,

        /// Directory to search
        root: PathBuf,

        /// Descend into every level instead of immediate children only
        #[arg(short, long)]
        recursive: bool,
    },

    /// Report the media kind of individual files
    Classify {
        /// Files to classify
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., finder.max_depth)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., finder.overrides.ra)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,

    /// Print the configuration file path
    Path,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Audio,
    #[value(alias = "images")]
    Image,
    #[value(alias = "videos")]
    Video,
}

impl From<KindArg> for MediaKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Audio => MediaKind::Audio,
            KindArg::Image => MediaKind::Image,
            KindArg::Video => MediaKind::Video,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let debug = cli.globals.debug;

    init_logging(debug);

    if let Err(error) = run(cli) {
        let error = CliError::from(error);
        eprint!("{}", error.format_for_user(debug));
        std::process::exit(error.exit_code() as i32);
    }
}

fn init_logging(debug: bool) {
    if debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("mediafind_core", log::LevelFilter::Debug)
            .filter_module("mediafind_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }
}

fn run(cli: Cli) -> Result<()> {
    let globals = cli.globals;

    match cli.command {
        Commands::Folders { root, recursive } => {
            let session = Session::open(&globals)?;
            let options = session
                .base
                .clone()
                .with_recursive(recursive)
                .with_dirs(true)
                .with_files(false);
            session.print_walk(&root, &options)
        }
        Commands::Files { root } => {
            let session = Session::open(&globals)?;
            session.print_walk(&root, &session.base)
        }
        Commands::Find {
            kind,
            root,
            recursive,
        } => {
            let session = Session::open(&globals)?;
            let options = session
                .base
                .clone()
                .with_recursive(recursive)
                .with_kind(Some(MediaKind::from(kind)));
            session.print_walk(&root, &options)
        }
        Commands::Classify { paths } => {
            let session = Session::open(&globals)?;
            let rows: Vec<Classification> = paths
                .into_iter()
                .map(|path| {
                    let kind = session.finder.classifier().detect(&path);
                    Classification { path, kind }
                })
                .collect();
            print!("{}", session.formatter.format_classified(&rows)?);
            Ok(())
        }
        Commands::Config { command } => config_command(command, globals.config),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

/// Everything a discovery command needs, built from config plus CLI flags
struct Session {
    finder: Finder,
    formatter: Box<dyn OutputFormatter>,
    base: WalkOptions,
    show_skipped: bool,
}

impl Session {
    fn open(globals: &GlobalArgs) -> Result<Self> {
        let mut config = load_config(globals.config.clone())?;
        config.apply_cli_overrides(globals.follow_links, globals.max_depth);
        log::debug!("Effective finder configuration: {:?}", config.finder);

        let format = match globals.format {
            Some(format) => format,
            None => OutputFormat::from_string(&config.output.default_format)
                .context("Invalid output.default_format in configuration")?,
        };
        let formatter = create_formatter(format, terminal::use_color(config.output.color_enabled));
        let finder = Finder::new(config.finder)?;
        let base = finder.options().with_sorted(globals.sort);

        Ok(Self {
            finder,
            formatter,
            base,
            show_skipped: globals.show_skipped,
        })
    }

    fn print_walk(&self, root: &Path, options: &WalkOptions) -> Result<()> {
        log::debug!("Walking {} with {:?}", root.display(), options);
        let report = self.finder.walk(root, options)?;

        if self.show_skipped {
            for skipped in &report.skipped {
                let location = skipped
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                eprintln!("{} {} ({})", "skipped:".yellow(), location, skipped.message);
            }
        }

        print!("{}", self.formatter.format_paths(&report.paths)?);
        Ok(())
    }
}

fn config_command(command: ConfigCommand, path: Option<PathBuf>) -> Result<()> {
    let mut manager = match path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };

    match command {
        ConfigCommand::Get { key } => {
            println!("{}", manager.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            manager.set(&key, &value)?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            let items = manager.list()?;
            eprintln!("Config file: {}", manager.get_config_path().display());
            print_grouped(&items);
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
    }

    Ok(())
}

/// Print `section.key = value` items grouped by their first key segment
fn print_grouped(items: &[(String, String)]) {
    let mut current_section: Option<&str> = None;

    for (key, value) in items {
        let (section, rest) = key.split_once('.').unwrap_or(("general", key.as_str()));
        if current_section != Some(section) {
            if current_section.is_some() {
                println!();
            }
            println!("[{}]", section.yellow());
            current_section = Some(section);
        }
        println!("  {} = {}", rest.cyan(), value);
    }
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
