use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use log::{error, info};

use raycast::error::Result;
use raycast::output::save_image_as_ppm;
use raycast::parser;

mod cli;

use cli::Args;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{}", err);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            // Wrong or malformed arguments: usage message, exit code 1.
            eprint!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("raycast - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    info!("Image resolution: {}x{}", args.width, args.height);

    let reader = BufReader::new(File::open(&args.scene)?);
    let mut scene = parser::parse(reader)?;
    // View-plane dimensions left at zero fall back to 1.0 once the whole
    // scene is parsed.
    scene.camera.resolve_defaults();
    info!(
        "Scene loaded: {} primitives, view plane {}x{}",
        scene.primitives.len(),
        scene.camera.width,
        scene.camera.height
    );

    let image = scene.camera.render(&scene.primitives, args.width, args.height);

    save_image_as_ppm(&image, &args.output)
}

/// Initialize the logger with the specified level
fn init_logger(level: log::LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
