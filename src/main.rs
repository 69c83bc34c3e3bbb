use anyhow::{Context, Result};
use gojen::cli::commands::NewCommand;
use gojen::cli::output::*;
use gojen::cli::{Cli, Command};
use gojen::{ProjectConfig, ProjectSetup, SetupOptions, SystemToolchain};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; RUST_LOG overrides the verbosity flag
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let options = SetupOptions { ci: cli.ci };

    // Execute command
    let result = match &cli.command {
        Some(Command::New(cmd)) => new_project(cmd, &cli.dir, options).await,
        None => setup_existing(&cli.dir, options).await,
    };

    if let Err(e) = result {
        log_error(&mut std::io::stdout(), &e)?;
        debug!("{:?}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn new_project(cmd: &NewCommand, dir: &Path, options: SetupOptions) -> Result<()> {
    if ProjectConfig::path_in(dir).exists() {
        println!("{} config already exists", WARN);
    } else {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        cmd.to_config()
            .write_to(dir)
            .context("Failed to write config")?;
        println!("{} config written", CHECK);
    }

    let config = setup(dir, options).await?;

    println!(
        "{} initialized new project with name {}",
        ROCKET,
        style(config.name()).bold()
    );
    Ok(())
}

async fn setup_existing(dir: &Path, options: SetupOptions) -> Result<()> {
    if !ProjectConfig::path_in(dir).exists() {
        println!(
            "{} gojen.json does not exist in {}, initialise one using\n\n$ gojen new",
            CROSS,
            dir.display()
        );
        std::process::exit(1);
    }

    let config = setup(dir, options).await?;
    println!(
        "{} {} set up {}",
        CHECK,
        style(config.name()).bold(),
        style("successfully").green()
    );
    Ok(())
}

async fn setup(dir: &Path, options: SetupOptions) -> Result<ProjectConfig> {
    let config = ProjectConfig::load(dir).context("Failed to load project config")?;

    let toolchain = SystemToolchain::new(dir);
    let mut stdout = std::io::stdout();
    ProjectSetup::new(dir, &config, &toolchain, options)
        .run(&mut stdout)
        .await
        .context("Project setup failed")?;

    Ok(config)
}
