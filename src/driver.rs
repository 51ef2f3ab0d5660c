use std::io::Write;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use crate::{
    assemble::assemble, babel::Toolkit, config::Config, qmca::Estimator,
    remote::Store, string, Record, Theory,
};

/// assemble records for fragments 1..=`cfg.frags` on a pool of `cfg.jobs`
/// workers. results come back in fragment-id order no matter which worker
/// finishes first, and the first failed fragment aborts the whole run
pub fn run<S, T, E>(
    cfg: &Config,
    store: &S,
    toolkit: &T,
    est: &E,
) -> Result<Vec<Record>>
where
    S: Store,
    T: Toolkit,
    E: Estimator,
{
    let pool =
        rayon::ThreadPoolBuilder::new().num_threads(cfg.jobs).build()?;
    info!("collecting {} fragments on {} workers", cfg.frags, cfg.jobs);
    let pb = ProgressBar::new(cfg.frags as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] \
                 [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("#>-"),
    );
    let records = pool.install(|| {
        // an exclusive range is an indexed parallel iterator, which is what
        // makes collect put the records back in fragment-id order
        (1..cfg.frags + 1)
            .into_par_iter()
            .map(|id| {
                let rec = assemble(cfg, store, toolkit, est, id);
                pb.inc(1);
                rec
            })
            .collect::<Result<Vec<Record>>>()
    })?;
    pb.finish();
    Ok(records)
}

/// write the table of `records` to `w`: one header row, then one row per
/// fragment with the identifier columns followed by `T`, `DMC(T)`, and
/// `DMC(T)_err` for each theory `T` in `theories`
pub fn write_csv<W: Write>(
    w: W,
    theories: &[Theory],
    records: &[Record],
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    let mut header = string!["fragment", "smiles", "inchi", "xyz"];
    for t in theories {
        header.push(t.to_string());
        header.push(format!("DMC({t})"));
        header.push(format!("DMC({t})_err"));
    }
    wtr.write_record(&header)?;
    for rec in records {
        let mut row = vec![
            rec.fragment.to_string(),
            rec.smiles.clone(),
            rec.inchi.clone(),
            rec.xyz.clone(),
        ];
        for e in &rec.energies {
            row.push(e.base.to_string());
            row.push(e.dmc.to_string());
            row.push(e.dmc_err.to_string());
        }
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}
