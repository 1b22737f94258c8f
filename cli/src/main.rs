use std::path::{Path, PathBuf};
use std::process::exit;

use clap::{Args, Parser, Subcommand};

use tplport::{load_config, load_config_if_present, PortError, PortOptions, RuleSet};

mod check;
mod logging;
mod port;

/// The config file picked up from the working directory when present
const DEFAULT_CONFIG: &str = "tplport.toml";

/// Port legacy Django-style templates to the new syntax
#[derive(Parser, Debug)]
#[command(name = "tplport", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite templates in place or into a mirrored destination tree
    Port(PortArgs),
    /// Report planned rewrites without touching any files
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct RuleArgs {
    /// Add the ".html" extension to references in {% extends %} and {% include %} tags
    #[arg(short = 'x', long)]
    add_extension: bool,

    /// Update old relation methods, i.e. get_bar => bar, get_baz_list => baz_set.all
    #[arg(short = 'r', long)]
    update_relations: bool,

    /// Update old file methods, i.e. get_foo_url => foo.url, get_foo_size => foo.size
    #[arg(short = 'f', long)]
    update_file_fields: bool,

    /// Also copy templates named like old-style generic templates to a singularized guess
    #[arg(short = 'g', long)]
    rename_generic: bool,

    /// Use the given config file for special-case exceptions
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Template files or directories to work on
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,
}

impl RuleArgs {
    fn rule_set(&self) -> RuleSet {
        RuleSet {
            add_extension: self.add_extension,
            update_relations: self.update_relations,
            update_file_fields: self.update_file_fields,
            rename_generic: self.rename_generic,
        }
    }

    fn options(&self) -> Result<PortOptions, PortError> {
        match &self.config {
            Some(path) => load_config(path),
            None => load_config_if_present(Path::new(DEFAULT_CONFIG)),
        }
    }
}

#[derive(Args, Debug)]
struct PortArgs {
    #[command(flatten)]
    rules: RuleArgs,

    /// Write ported templates into this directory instead of in place
    #[arg(short = 'o', long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Run everything as normal but don't save any changes; print diffs instead
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Output nothing to the console
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Report every rewrite with its position
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[command(flatten)]
    rules: RuleArgs,

    /// Print human-readable reports instead of JSON diagnostics
    #[arg(short, long)]
    pretty: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Port(args) => port::run(args),
        Command::Check(args) => check::run(args),
    };

    if let Err(err) = result {
        logging::error(err);
        exit(1);
    }
}
