mod commands;
mod config;
mod logging;

use checklist_core::{DoctorateTab, FilterMode, GeneralEducationTab, Generation};
use clap::{Parser, Subcommand, ValueEnum};
use config::{CliConfig, Family};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "checklist")]
#[command(about = "Admission checklist status tool")]
struct Cli {
    /// Admission family (defaults to CHECKLIST_FAMILY, then doctorate)
    #[arg(long, global = true, value_enum)]
    family: Option<Family>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every tab of a checklist record
    Classify {
        /// Record file (.json, .yaml or .yml)
        file: PathBuf,
        /// Tree to classify
        #[arg(long, value_enum, default_value_t = GenerationArg::Current)]
        generation: GenerationArg,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the status catalog
    Catalog {
        /// Print the listing projection only
        #[arg(long)]
        listing: bool,
    },
    /// Check that a record survives a round trip unchanged
    Check {
        /// Record file (.json, .yaml or .yml)
        file: PathBuf,
    },
    /// Print the record files kept by a listing filter
    Filter {
        /// Record files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long, value_enum)]
        mode: ModeArg,
        /// Selection, e.g. "decision_sic=A_COMPLETER,AUTORISE;frais_dossier=PAYES"
        #[arg(long)]
        select: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GenerationArg {
    Initial,
    Current,
}

impl From<GenerationArg> for Generation {
    fn from(arg: GenerationArg) -> Self {
        match arg {
            GenerationArg::Initial => Generation::Initial,
            GenerationArg::Current => Generation::Current,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Inclusion,
    Exclusion,
}

impl From<ModeArg> for FilterMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Inclusion => FilterMode::Inclusion,
            ModeArg::Exclusion => FilterMode::Exclusion,
        }
    }
}

// Expands `$call` with `$tab` bound to the tab enum of `$family`.
macro_rules! for_family {
    ($family:expr, $tab:ident => $call:expr) => {
        match $family {
            Family::Doctorate => {
                type $tab = DoctorateTab;
                $call
            }
            Family::General => {
                type $tab = GeneralEducationTab;
                $call
            }
        }
    };
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::from_env()?;
    logging::init(config.log_level())?;

    let cli = Cli::parse();
    let family = cli.family.unwrap_or(config.family());

    let output = match cli.command {
        Some(Commands::Classify {
            file,
            generation,
            json,
        }) => {
            for_family!(family, Tab => commands::classify::<Tab>(&file, generation.into(), json))?
        }
        Some(Commands::Catalog { listing }) => {
            for_family!(family, Tab => commands::catalog::<Tab>(listing))
        }
        Some(Commands::Check { file }) => {
            for_family!(family, Tab => commands::check::<Tab>(&file))?
        }
        Some(Commands::Filter {
            files,
            mode,
            select,
        }) => for_family!(family, Tab => commands::filter::<Tab>(&files, mode.into(), &select))?,
        None => "Use 'checklist --help' for commands\n".to_owned(),
    };

    print!("{output}");
    Ok(())
}
