use std::{fs::File, path::PathBuf};

use clap::Parser;
use fragbench::{
    babel::Babel, config::Config, driver, qmca::Qmca, remote::HttpStore,
};
use log::info;

/// Aggregate per-fragment benchmark energies into one CSV table.
#[derive(Parser)]
struct Cli {
    /// The TOML configuration file describing the dataset.
    #[arg(short, long, default_value = "fragbench.toml")]
    config: String,

    /// Where to write the output table.
    #[arg(short, long, default_value = "records.csv")]
    output: PathBuf,

    /// The number of worker threads, overriding the config file.
    #[arg(short, long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut cfg = Config::load(&cli.config);
    if let Some(threads) = cli.threads {
        cfg.jobs = threads;
    }
    let store = HttpStore::new(&cfg);
    let toolkit = Babel::new(&cfg.obabel);
    let est = Qmca::new(&cfg.qmca);
    let records = driver::run(&cfg, &store, &toolkit, &est)?;
    let out = File::create(&cli.output)?;
    driver::write_csv(out, &cfg.theories, &records)?;
    info!("wrote {} records to {}", records.len(), cli.output.display());
    Ok(())
}
