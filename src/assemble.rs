use anyhow::{Context, Result};
use log::debug;

use crate::{
    babel::Toolkit,
    config::Config,
    frag_name,
    qmca::Estimator,
    remote::{self, Store},
    scf, Energies, Record,
};

/// assemble the full [Record] for fragment `id`: fetch the geometry, derive
/// its identifiers, then collect the base and DMC energies for every
/// configured theory in order. any failure along the way fails the whole
/// fragment; there are no partial records
pub fn assemble<S, T, E>(
    cfg: &Config,
    store: &S,
    toolkit: &T,
    est: &E,
    id: usize,
) -> Result<Record>
where
    S: Store,
    T: Toolkit,
    E: Estimator,
{
    let name = frag_name(id);
    debug!("assembling {name}");
    let root = format!("{}/{name}", cfg.dataset);
    let xyz = store.fetch(&format!("{root}/{name}.xyz"))?;
    let (smiles, inchi) = toolkit
        .identify(&name, &xyz)
        .with_context(|| format!("identifying {name}"))?;
    let mut energies = Vec::with_capacity(cfg.theories.len());
    for &theory in &cfg.theories {
        let out = store.fetch(&format!("{root}/{theory}/frag{id:05}.out"))?;
        let base = scf::scf_energy(&out)
            .with_context(|| format!("{name} at {theory}"))?;
        let dmc_dir = format!("{root}/{theory}/DMC");
        let scalar = remote::last_scalar(store, &dmc_dir)?;
        let raw = store.fetch(&format!("{dmc_dir}/{scalar}"))?;
        let (dmc, dmc_err) = est
            .energy(&scalar, &raw)
            .with_context(|| format!("{name} at DMC({theory})"))?;
        energies.push(Energies {
            theory,
            base,
            dmc,
            dmc_err,
        });
    }
    Ok(Record {
        fragment: id,
        smiles,
        inchi,
        xyz,
        energies,
    })
}
