use anyhow::Context;
use trispin::{logging, Settings};

fn main() {
    logging::init();

    if let Err(err) = try_main() {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let settings = Settings::default();
    tracing::info!(shader_dir = %settings.shader_dir.display(), "starting trispin");

    trispin::run(settings).context("startup failed")?;
    Ok(())
}
