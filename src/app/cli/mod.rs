//! CLI Adapter.

use std::io::{ErrorKind, IsTerminal};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dialoguer::{Confirm, Error as DialoguerError};
use log::LevelFilter;

use crate::app::api::{
    self, BuildOptions, DetailAction, GlobalOptions, InitOptions, ListOptions, OptionListing,
    PreviewOptions, SelectionInput,
};
use crate::domain::{AppError, SectionKind, Verbosity};

#[derive(Parser)]
#[command(name = "nattd")]
#[command(version)]
#[command(
    about = "Assemble Fedora Workstation post-install setup scripts",
    long_about = None
)]
struct Cli {
    /// Configuration file (defaults to ./nattd.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Catalog document to use instead of the embedded one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Keep malformed catalog entries and render warnings for them
    #[arg(long, global = true)]
    lenient: bool,
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SelectionArgs {
    /// Selection file (YAML or JSON)
    #[arg(short, long, conflicts_with = "profile")]
    selection: Option<PathBuf>,
    /// Bundled preset profile
    #[arg(short, long)]
    profile: Option<String>,
    /// Output verbosity: quiet or verbose
    #[arg(short, long)]
    mode: Option<Verbosity>,
}

impl SelectionArgs {
    fn into_input(self) -> (SelectionInput, Option<Verbosity>) {
        (SelectionInput::from_args(self.selection, self.profile), self.mode)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the abbreviated script for a selection
    #[clap(visible_alias = "pv")]
    Preview {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Write the full setup script
    #[clap(visible_alias = "b")]
    Build {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Script template to fill instead of the embedded one
        #[arg(short, long)]
        template: Option<PathBuf>,
        /// Output path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,
    },
    /// List catalog options
    #[clap(visible_alias = "ls")]
    List {
        /// Only this section (system_config, essential_apps, additional_apps, customization)
        #[arg(long)]
        section: Option<SectionKind>,
        /// Filter by name or description (regular expression or plain text)
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one catalog option
    Show {
        /// Section key
        section: SectionKind,
        /// Option id (package name for essential_apps)
        id: String,
    },
    /// Validate the catalog document
    Check,
    /// List bundled preset profiles
    Profiles,
    /// Write a starter selection file
    #[clap(visible_alias = "i")]
    Init {
        /// Start from a preset profile
        #[arg(short, long)]
        profile: Option<String>,
        /// Selection file to create
        #[arg(default_value = "selection.yml")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    env_logger::builder().format_timestamp(None).filter_level(cli.log_level).init();

    let global = GlobalOptions { config: cli.config, catalog: cli.catalog, lenient: cli.lenient };

    let result: Result<i32, AppError> = match cli.command {
        Commands::Preview { selection } => run_preview(&global, selection).map(|_| 0),
        Commands::Build { selection, template, output, force } => {
            let (selection, mode) = selection.into_input();
            run_build(&global, BuildOptions { selection, mode, template, output, force })
        }
        Commands::List { section, search } => {
            run_list(&global, ListOptions { section, search }).map(|_| 0)
        }
        Commands::Show { section, id } => run_show(&global, section, &id).map(|_| 0),
        Commands::Check => run_check(&global),
        Commands::Profiles => run_profiles().map(|_| 0),
        Commands::Init { profile, path, force } => {
            run_init(&global, InitOptions { profile, path, force }).map(|_| 0)
        }
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_notifications(notifications: &[String]) {
    for notification in notifications {
        eprintln!("ℹ️  {}", notification);
    }
}

fn run_preview(global: &GlobalOptions, selection: SelectionArgs) -> Result<(), AppError> {
    let (selection, mode) = selection.into_input();
    let rendered = api::preview(global, &PreviewOptions { selection, mode })?;

    print_notifications(&rendered.notifications);
    print!("{}", rendered.text);
    Ok(())
}

fn run_build(global: &GlobalOptions, mut options: BuildOptions) -> Result<i32, AppError> {
    if !options.force {
        let output = api::build_output_path(global, &options)?;
        if output.exists() && is_interactive() {
            let prompt = format!("{} already exists. Overwrite?", output.display());
            if !confirm(&prompt)? {
                println!("Build cancelled.");
                return Ok(0);
            }
            options.force = true;
        }
    }

    let outcome = api::build(global, &options)?;

    print_notifications(&outcome.notifications);
    println!("✅ Wrote setup script to {}", outcome.path.display());
    println!("  Review it, then run: sudo {}", outcome.path.display());
    Ok(0)
}

fn run_list(global: &GlobalOptions, options: ListOptions) -> Result<(), AppError> {
    let listings = api::list(global, &options)?;
    if listings.is_empty() {
        println!("No matching options.");
        return Ok(());
    }

    let mut current: Option<SectionKind> = None;
    for listing in &listings {
        if current != Some(listing.section) {
            if current.is_some() {
                println!();
            }
            println!("{}:", listing.section.display_name());
            current = Some(listing.section);
        }
        println!("  {}", format_listing(listing));
    }
    Ok(())
}

fn format_listing(listing: &OptionListing) -> String {
    let id = match &listing.category {
        Some(category) => format!("{}/{}", category, listing.id),
        None => listing.id.clone(),
    };
    let mut line = format!("{:<40} {}", id, listing.description);
    if !listing.methods.is_empty() {
        line.push_str(&format!(" [{}]", listing.methods.join(", ")));
    }
    line
}

fn run_show(global: &GlobalOptions, section: SectionKind, id: &str) -> Result<(), AppError> {
    let detail = api::show(global, section, id)?;

    println!("{} ({})", detail.name, detail.id);
    println!("Section: {}", detail.section.display_name());
    if let Some(category) = &detail.category {
        println!("Category: {}", category);
    }
    println!("Description: {}", detail.description);

    match &detail.action {
        DetailAction::Batched => println!("Installed with the essential applications batch."),
        DetailAction::Commands(commands) => {
            println!("Commands:");
            for command in commands {
                println!("  {}", command);
            }
        }
        DetailAction::Methods(methods) => {
            for method in methods {
                println!("Method {}:", method.label);
                for command in &method.commands {
                    println!("  {}", command);
                }
                if !method.dependencies.is_empty() {
                    println!("  requires: {}", method.dependencies.join(", "));
                }
            }
        }
        DetailAction::Malformed(reason) => println!("⚠️  Malformed: {}", reason),
    }

    if !detail.dependencies.is_empty() {
        println!("Requires: {}", detail.dependencies.join(", "));
    }
    Ok(())
}

fn run_check(global: &GlobalOptions) -> Result<i32, AppError> {
    let outcome = api::check(global)?;

    if outcome.is_clean() {
        println!(
            "✅ Catalog {} is valid ({} options)",
            outcome.source, outcome.report.option_count
        );
        return Ok(0);
    }

    println!("⚠️  Catalog {} has {} issue(s):", outcome.source, outcome.report.issues.len());
    for issue in &outcome.report.issues {
        println!("  • {}", issue);
    }
    Ok(1)
}

fn run_profiles() -> Result<(), AppError> {
    for profile in api::profiles()? {
        println!("{:<20} {} ({} options)", profile.name, profile.description, profile.option_count);
    }
    Ok(())
}

fn run_init(global: &GlobalOptions, options: InitOptions) -> Result<(), AppError> {
    let path = api::init(global, &options)?;
    println!("✅ Wrote selection file to {}", path.display());
    Ok(())
}

fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

fn confirm(prompt: &str) -> Result<bool, AppError> {
    match Confirm::new().with_prompt(prompt).default(false).interact() {
        Ok(answer) => Ok(answer),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(false),
        Err(DialoguerError::IO(err)) => Err(AppError::Io(err)),
    }
}
