mod app;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let opts = app::Opts::parse();
    let _guard = app::init_tracing(&opts)?;
    app::run(&opts)
}
