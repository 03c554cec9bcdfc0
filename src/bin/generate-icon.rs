//! Generates the FocusFlow icon set for a Tauri application.

use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use focusflow_icon::{
    ComposeError, ExportError, Exporter, FontSource, IconComposer, IconStyle, PackageOutcome,
    StyleError, list_generated_assets,
};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(version, about = "Draw the FocusFlow app icon and export every platform format")]
struct Args {
    /// Directory that receives the icon files.
    #[arg(long, default_value = "src-tauri/icons")]
    out_dir: PathBuf,

    /// Side length of the master image in pixels.
    #[arg(long, default_value_t = 1024)]
    size: u32,

    /// JSON style file; missing fields keep their defaults.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Font file tried before the built-in font list.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Style(#[from] StyleError),

    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let style = match &args.style {
        Some(path) => IconStyle::load(path)?,
        None => IconStyle::default(),
    };

    let mut fonts = FontSource::default_chain();
    if let Some(font) = args.font {
        fonts.insert(0, FontSource::File(font));
    }

    let composer = IconComposer::with_fonts(style, fonts);
    let master = composer.compose(args.size)?;

    let report = Exporter::new(&args.out_dir)
        .export_with(&master, |path| println!("Saved: {}", path.display()))?;

    match &report.icns {
        PackageOutcome::Created(_) => {}
        PackageOutcome::ToolMissing => println!("iconutil not available, skipped icon.icns"),
        PackageOutcome::Failed(reason) => println!("Skipped icon.icns: {reason}"),
    }

    println!();
    println!("Icon generation complete!");
    println!("Generated files:");
    for name in list_generated_assets(&args.out_dir)? {
        println!("  - {name}");
    }
    Ok(())
}
