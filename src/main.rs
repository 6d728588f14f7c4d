use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use seagrid::cli::commands;
use seagrid::config::{ToolConfig, DEFAULT_CONFIG_FILE};
use seagrid::document::MergeOptions;
use seagrid::grid::GridPosition;
use seagrid::map::Difficulty;
use seagrid::templates::{FeatureDensity, WeatherIntensity};

#[derive(Parser)]
#[command(name = "seagrid")]
#[command(about = "Build, validate, merge and diff tactical sea maps")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and export the built-in map templates
    Templates {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Generate a custom map
    Custom {
        /// Map name
        #[arg(short, long)]
        name: String,

        #[arg(long, value_enum, default_value_t = Difficulty::Intermediate)]
        difficulty: Difficulty,

        #[arg(long, value_enum, default_value_t = WeatherIntensity::Moderate)]
        weather: WeatherIntensity,

        #[arg(long, value_enum, default_value_t = FeatureDensity::Normal)]
        density: FeatureDensity,

        /// Output file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a map file
    Validate { file: PathBuf },

    /// Show a summary of a map file
    Info { file: PathBuf },

    /// List map files in a directory
    List {
        /// Map directory (defaults to export_directory from the config)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Show the differences between two map files as JSON
    Diff { original: PathBuf, modified: PathBuf },

    /// Merge an overlay map into a base map
    Merge {
        base: PathBuf,
        overlay: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Keep only the base map's features
        #[arg(long)]
        no_features: bool,

        /// Take region weather from the overlay (requires --prefer-overlay)
        #[arg(long)]
        weather: bool,

        /// Use the overlay's name and description
        #[arg(long)]
        prefer_overlay: bool,
    },

    /// Check a ship movement path against a map file
    Path {
        file: PathBuf,

        /// Path step as x,y (repeat in order)
        #[arg(short, long = "step", value_parser = commands::parse_position, required = true)]
        steps: Vec<GridPosition>,
    },

    /// Show the region layout of the grid
    Grid,
}

#[derive(Subcommand)]
enum TemplateAction {
    /// List available templates
    List,

    /// Show a template's regions, features and validation result
    Show { id: String },

    /// Export a template as a map document
    Export {
        id: String,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        author: Option<String>,

        #[arg(short, long)]
        game_id: Option<String>,
    },
}

fn init_logging(config: &ToolConfig) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = if config.json_logs() {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn main() {
    let cli = Cli::parse();

    let config = match ToolConfig::load_or_default(Path::new(&cli.config)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(&config);

    let outcome = match cli.command {
        Commands::Templates { action } => match action {
            TemplateAction::List => {
                commands::list_templates();
                Ok(true)
            }
            TemplateAction::Show { id } => commands::show_template(&id).map(|_| true),
            TemplateAction::Export {
                id,
                output,
                author,
                game_id,
            } => commands::export_template(
                &config,
                &id,
                output.as_deref(),
                author.as_deref(),
                game_id.as_deref(),
            )
            .map(|_| true),
        },

        Commands::Custom {
            name,
            difficulty,
            weather,
            density,
            output,
        } => commands::create_custom(
            &config,
            &name,
            difficulty,
            weather,
            density,
            output.as_deref(),
        )
        .map(|_| true),

        Commands::Validate { file } => Ok(commands::validate_file(&file)),

        Commands::Info { file } => commands::show_info(&file).map(|_| true),

        Commands::List { dir } => {
            let dir = dir.unwrap_or_else(|| config.export_dir());
            commands::list_files(&dir).map(|_| true)
        }

        Commands::Diff { original, modified } => {
            commands::diff_files(&original, &modified).map(|_| true)
        }

        Commands::Merge {
            base,
            overlay,
            output,
            no_features,
            weather,
            prefer_overlay,
        } => {
            let options = MergeOptions {
                merge_features: !no_features,
                merge_weather: weather,
                prefer_overlay,
            };
            commands::merge_files(&config, &base, &overlay, &output, &options).map(|_| true)
        }

        Commands::Path { file, steps } => commands::check_path(&file, &steps),

        Commands::Grid => commands::show_grid().map(|_| true),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
