//! Skinpack binary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use skinpack_lib::commands;
use skinpack_lib::core::error::SkinPackResult;
use skinpack_lib::core::state::{AppState, Settings};

/// Resolve Minecraft skins and build offline skin resource packs.
#[derive(Parser, Debug)]
#[command(name = "skinpack")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a JSON settings file
    #[arg(short, long, env = "SKINPACK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve GET /api/skin
    Serve {
        /// Overrides the configured port
        #[arg(long)]
        port: Option<u16>,
        /// Overrides the configured bind address
        #[arg(long)]
        bind: Option<String>,
    },
    /// Download the skin of a username
    Fetch {
        username: String,
        /// Output file (default `<username>.png`)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Print the resolution trace as JSON
        #[arg(long)]
        debug: bool,
    },
    /// Build a resource pack from a 64x64 PNG skin
    Pack {
        /// Skin PNG to pack
        #[arg(long)]
        skin: PathBuf,
        /// Target version id, see `versions`
        #[arg(long)]
        version: Option<String>,
        /// Output file (default `skin_pack.zip`)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List selectable Minecraft versions
    Versions,
}

#[tokio::main]
async fn main() -> ExitCode {
    skinpack_lib::init_tracing();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> SkinPackResult<()> {
    let mut settings = Settings::load(args.config.as_deref())?;

    match args.command {
        Command::Serve { port, bind } => {
            if let Some(port) = port {
                settings.port = port;
            }
            if let Some(bind) = bind {
                settings.bind_address = bind;
            }
            skinpack_lib::serve(settings).await
        }
        Command::Fetch {
            username,
            out,
            debug,
        } => {
            let state = AppState::from_settings(settings)?;
            let response = commands::fetch_skin(&state, &username, out, debug).await?;
            if debug {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", response.path.display());
            }
            Ok(())
        }
        Command::Pack { skin, version, out } => {
            let state = AppState::from_settings(settings)?;
            let response =
                commands::build_pack(&state, &skin, version.as_deref(), out).await?;
            println!("{}", response.path.display());
            Ok(())
        }
        Command::Versions => {
            for version in commands::list_versions() {
                let format = match (version.pack_format, version.min_format, version.max_format) {
                    (Some(format), _, _) => format!("pack_format {format}"),
                    (None, Some(min), Some(max)) => format!("min_format {min}, max_format {max}"),
                    _ => String::new(),
                };
                println!("{:<16} {format}", version.id);
            }
            Ok(())
        }
    }
}
