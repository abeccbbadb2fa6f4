use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use plistsplit::{RunContext, extract_plist};

use super::args::CliArgs;

// Warnings (rotated or partially trimmed frames) are always shown; `--log` adds debug output.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("plistsplit={}", level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    let params = args.to_params();
    let ctx = RunContext::from_current_dir()?;

    let report = match extract_plist(&params, &ctx) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    info!("Descriptor: {:?}", report.descriptor);
    info!("Texture: {:?}", report.texture);
    info!("Output directory: {:?}", report.output_dir);
    info!("Written: {}", report.extract.written.len());
    info!("Skipped: {}", report.extract.skipped.len());
    info!("Warnings: {}", report.warnings.len());
    if let Some(manifest) = &report.manifest {
        info!("Manifest: {:?}", manifest);
    }

    Ok(())
}
