use std::{io::IsTerminal, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use tablegen::{Config, DirSink, Generator, OutputKinds};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "tablegen")]
#[command(author, version, about, long_about = None)]
pub struct Opts {
    #[clap(index = 1, help = "Schema source (CREATE TABLE / CREATE INDEX / INSERT)")]
    pub schema: PathBuf,
    #[clap(short = 's', help = "Write the schema with translation markers removed")]
    pub dump: bool,
    #[clap(short = 't', help = "Generate table interface and implementation modules")]
    pub tables: bool,
    #[clap(short = 'd', help = "Generate sample data modules")]
    pub data: bool,
    #[clap(short = 'p', help = "Generate the currency patch scripts")]
    pub patch: bool,
    #[clap(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,
    #[clap(long, help = "Directory receiving the generated files")]
    pub output_dir: Option<PathBuf>,
    #[clap(long, help = "specify output file for log traces")]
    pub tracing_output: Option<String>,
}

impl Opts {
    /// Selected output kinds; tables and patches when none is given.
    pub fn output_kinds(&self) -> OutputKinds {
        OutputKinds {
            dump: self.dump,
            tables: self.tables,
            data: self.data,
            patch: self.patch,
        }
        .or_default()
    }
}

pub fn init_tracing(opts: &Opts) -> Result<WorkerGuard, std::io::Error> {
    let ((non_blocking, guard), should_emit_ansi) = if let Some(file) = &opts.tracing_output {
        (
            tracing_appender::non_blocking(
                std::fs::File::options()
                    .append(true)
                    .create(true)
                    .open(file)?,
            ),
            false,
        )
    } else {
        (
            tracing_appender::non_blocking(std::io::stderr()),
            IsTerminal::is_terminal(&std::io::stderr()),
        )
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
        .from_env_lossy();

    if let Err(e) = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_line_number(true)
                .with_ansi(should_emit_ansi),
        )
        .with(env_filter)
        .try_init()
    {
        eprintln!("Unable to setup tracing appender: {e:?}");
    }
    Ok(guard)
}

pub fn run(opts: &Opts) -> anyhow::Result<()> {
    let mut config = match &opts.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(dir) = &opts.output_dir {
        config.output_dir = dir.clone();
    }
    tracing::debug!(?config, kinds = ?opts.output_kinds(), "starting generation");

    let mut sink = DirSink::new(&config.output_dir).with_context(|| {
        format!(
            "failed to prepare output directory {}",
            config.output_dir.display()
        )
    })?;
    let generator = Generator::new(config, opts.output_kinds(), &chrono::Local::now())?;
    let artifacts = generator
        .run_file(&opts.schema, &mut sink)
        .with_context(|| format!("failed to generate from {}", opts.schema.display()))?;

    for artifact in &artifacts {
        println!("Generate {} ({})", artifact.name, artifact.description);
    }
    println!("Done");
    Ok(())
}
