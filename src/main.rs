//! VCAT Test Vector Builder
//!
//! Generates video manifests, playlists, a catalog and a catalog index from
//! a folder containing a `media` subfolder with video assets.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vcat_testvector_builder::config_file::{self, ConfigFile};
use vcat_testvector_builder::{
    build, run_pass, BuildError, BuilderConfig, FfmpegInspector, Overrides, Pass, Result,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "vcat-testvector-builder";

#[derive(Parser, Debug)]
#[command(
    name = "vcat-testvector-builder",
    version,
    about = "Build VCAT test vector manifests, playlists, catalog and index from a folder",
    after_help = "Examples:\n  \
        vcat-testvector-builder --input-folder /path/to/folder\n  \
        vcat-testvector-builder --codec av1 --append-index\n  \
        vcat-testvector-builder index --append-index"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    options: BuildOptions,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every pass: manifests, playlists, catalog, index (default)
    Build,
    /// Write a manifest for every file under media/
    Manifests,
    /// Wrap every *_video_manifest.json in a playlist
    Playlists,
    /// Catalog every *_playlist.json in the manifest folder
    Catalog,
    /// Index every *_catalog.json in the input folder
    Index,
    /// Write a configuration file with the built-in defaults
    InitConfig {
        #[arg(default_value = config_file::DEFAULT_CONFIG_FILE)]
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
struct BuildOptions {
    /// Folder containing a 'media' subfolder with video assets
    #[arg(long, global = true)]
    input_folder: Option<PathBuf>,

    /// Creator attribution written into every header
    #[arg(long, global = true)]
    created_by: Option<String>,

    /// Output filename for the catalog
    #[arg(long, global = true)]
    catalog_filename: Option<String>,

    /// Description for the catalog
    #[arg(long, global = true)]
    description: Option<String>,

    /// Only process videos in media/<codec>; names the catalog vcat_<codec>_testvector_playlist_catalog.json
    #[arg(long, global = true)]
    codec: Option<String>,

    /// Merge into the existing index instead of overwriting it
    #[arg(long, alias = "append_index", global = true)]
    append_index: bool,

    /// ffmpeg binary used to inspect media
    #[arg(long, global = true)]
    ffmpeg: Option<PathBuf>,

    /// Configuration file (defaults to ./vcat.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

impl BuildOptions {
    fn overrides(&self) -> Overrides {
        Overrides {
            input_folder: self.input_folder.clone(),
            created_by: self.created_by.clone(),
            catalog_filename: self.catalog_filename.clone(),
            description: self.description.clone(),
            codec: self.codec.clone(),
            append_index: self.append_index,
            ffmpeg: self.ffmpeg.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = config_file::load(cli.options.config.as_deref());
    let logging = loaded
        .as_ref()
        .ok()
        .and_then(|c| c.logging.clone());
    init_logging(
        logging.as_ref().map(|l| l.level.as_str()).unwrap_or("info"),
        logging.as_ref().and_then(|l| l.format.as_deref()) == Some("json"),
    );

    tracing::debug!("{} v{} starting", APP_NAME, VERSION);

    match loaded.and_then(|file| run(cli, file)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, file: ConfigFile) -> Result<()> {
    let pass = match cli.command.unwrap_or(Command::Build) {
        Command::InitConfig { path } => {
            config_file::generate_default_config(&path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            return Ok(());
        }
        Command::Build => None,
        Command::Manifests => Some(Pass::Manifests),
        Command::Playlists => Some(Pass::Playlists),
        Command::Catalog => Some(Pass::Catalog),
        Command::Index => Some(Pass::Index),
    };

    let settings = file.into_settings();
    let config = BuilderConfig::resolve(&settings, cli.options.overrides())?;
    tracing::debug!("Configuration resolved: {:?}", config);
    let inspector = FfmpegInspector::new(config.ffmpeg.clone());

    match pass {
        None => {
            let summary = build(&config, &inspector)?;
            tracing::info!("Build complete!\n{}", summary);
        }
        Some(pass) => {
            run_pass(pass, &config, &inspector)?;
        }
    }
    Ok(())
}

/// Setup problems (missing folders, bad configuration) are reported as
/// such; anything else aborted a build that had already started.
fn failure_message(err: &BuildError) -> String {
    if err.is_fatal() {
        format!("Error: {}", err)
    } else {
        format!("Build aborted: {}", err)
    }
}

/// Initialize logging with tracing
fn init_logging(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("vcat_testvector_builder={}", level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }
}
