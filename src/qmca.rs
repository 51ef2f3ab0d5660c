use std::{fs, process::Command};

use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;

/// turn one raw DMC scalar trace into an energy and its standard error
pub trait Estimator: Sync {
    /// `filename` is the name the trace had in the remote store and `raw` is
    /// its content
    fn energy(&self, filename: &str, raw: &str) -> Result<(f64, f64)>;
}

/// adapter around the external qmca statistics tool
pub struct Qmca {
    exe: String,
}

lazy_static! {
    static ref EV_RE: Regex = Regex::new(
        r"series 0\s+([+-]?\d+\.\d+(?:[eE][+-]?\d+)?)\s+\+/-\s+(\d+\.\d+(?:[eE][+-]?\d+)?)"
    )
    .unwrap();
}

impl Qmca {
    pub fn new(exe: &str) -> Self {
        Self {
            exe: exe.to_string(),
        }
    }

    /// parse the mean and standard error out of the energy/variance report
    /// printed by `qmca -q ev`
    pub fn parse_ev(output: &str) -> Result<(f64, f64)> {
        let Some(cap) = EV_RE.captures(output) else {
            bail!("no series 0 energy in qmca output:\n{output}");
        };
        Ok((cap[1].parse()?, cap[2].parse()?))
    }
}

impl Estimator for Qmca {
    /// write `raw` to `filename` in a fresh scratch directory and run
    /// `qmca -q ev` on it. qmca derives the series number from the file
    /// name, so the name from the remote store is kept; the scratch
    /// directory keeps concurrent workers out of each other's way and is
    /// removed when it drops
    fn energy(&self, filename: &str, raw: &str) -> Result<(f64, f64)> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(filename);
        fs::write(&path, raw)?;
        let out = Command::new(&self.exe)
            .arg("-q")
            .arg("ev")
            .arg(&path)
            .output()
            .with_context(|| format!("running {}", self.exe))?;
        Self::parse_ev(&String::from_utf8_lossy(&out.stdout))
    }
}
