use anyhow::{bail, ensure, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SCF_RE: Regex = Regex::new(
        r"converged SCF energy = ([+-]?\d+\.\d+(?:[eE][+-]?\d+)?)"
    )
    .unwrap();
}

/// extract the converged SCF energy from the solver output in `output`.
/// these are single-point calculations, so exactly one energy line is
/// expected; zero or several are both errors
pub fn scf_energy(output: &str) -> Result<f64> {
    let mut caps = SCF_RE.captures_iter(output);
    let Some(cap) = caps.next() else {
        bail!("no converged SCF energy in output");
    };
    ensure!(caps.next().is_none(), "multiple converged SCF energies");
    Ok(cap[1].parse()?)
}
