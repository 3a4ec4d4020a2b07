//! mbc - Build and upload tool for maubot-style plugins
//!
//! Commands:
//! - `mbc build` - Build a plugin bundle, optionally uploading it
//! - `mbc upload` - Upload an already-built bundle
//! - `mbc inspect` - Show the metadata and contents of a bundle

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod build;
mod config;
mod inspect;
mod upload;

#[derive(Parser)]
#[command(name = "mbc")]
#[command(author, version, about = "Build tool for maubot-style plugins", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a plugin bundle
    Build {
        /// Path to the root of the plugin project (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Path to output the built plugin to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Upload the plugin to a server after building
        #[arg(short, long)]
        upload: bool,

        /// Server to upload the built plugin to
        #[arg(short, long)]
        server: Option<String>,
    },

    /// Upload an already-built plugin bundle
    Upload {
        /// Path to the bundle file
        path: PathBuf,

        /// Server to upload the plugin to
        #[arg(short, long)]
        server: Option<String>,
    },

    /// Show the metadata and contents of a plugin bundle
    Inspect {
        /// Path to the bundle file
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            path,
            output,
            upload,
            server,
        } => build::run(&path, output, upload, server.as_deref()),
        Commands::Upload { path, server } => upload::run(&path, server.as_deref()),
        Commands::Inspect { path } => inspect::run(&path),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
