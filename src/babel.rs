use std::{fs, path::Path, process::Command};

use anyhow::{bail, Context, Result};

/// derive chemical identifiers from raw atomic coordinates
pub trait Toolkit: Sync {
    /// return the canonical SMILES and InChI strings for the molecule with
    /// the header-less XYZ coordinates in `coords`
    fn identify(&self, name: &str, coords: &str) -> Result<(String, String)>;
}

/// build a standard XYZ document from header-less coordinate lines: atom
/// count, name, then the coordinates unchanged
pub fn xyz_doc(name: &str, coords: &str) -> String {
    let coords = coords.trim();
    let natoms = coords.lines().count();
    format!("{natoms}\n{name}\n{coords}\n")
}

/// the first whitespace-separated token in `s`, if any. obabel echoes the
/// input filename after the identifier, so only the token is wanted
fn first_token(s: &str) -> Option<String> {
    s.split_whitespace().next().map(str::to_string)
}

/// adapter around the external Open Babel converter, which handles bond
/// inference as well as identifier generation
pub struct Babel {
    exe: String,
}

impl Babel {
    pub fn new(exe: &str) -> Self {
        Self {
            exe: exe.to_string(),
        }
    }

    /// convert the XYZ file at `path` to `fmt` and return the identifier
    fn convert(&self, path: &Path, fmt: &str) -> Result<String> {
        let out = Command::new(&self.exe)
            .arg("-ixyz")
            .arg(path)
            .arg(format!("-o{fmt}"))
            .output()
            .with_context(|| format!("running {}", self.exe))?;
        let stdout = String::from_utf8_lossy(&out.stdout);
        match first_token(&stdout) {
            Some(tok) => Ok(tok),
            None => bail!(
                "empty {fmt} conversion for {}: {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr)
            ),
        }
    }
}

impl Toolkit for Babel {
    fn identify(&self, name: &str, coords: &str) -> Result<(String, String)> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(format!("{name}.xyz"));
        fs::write(&path, xyz_doc(name, coords))?;
        let smiles = self.convert(&path, "smi")?;
        let inchi = self.convert(&path, "inchi")?;
        Ok((smiles, inchi))
    }
}
