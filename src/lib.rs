use std::fmt;

use serde::{Deserialize, Serialize};

pub mod assemble;
pub mod babel;
pub mod config;
pub mod driver;
pub mod qmca;
pub mod remote;
pub mod scf;


/// from [StackOverflow](https://stackoverflow.com/a/45145246)
#[macro_export]
macro_rules! string {
    // match a list of expressions separated by comma:
    ($($str:expr),*) => ({
        // create a Vec with this list of expressions,
        // calling String::from on each:
        vec![$(String::from($str),)*] as Vec<String>
    });
}

/// the base levels of theory in the dataset. the name of each variant is also
/// the name of its directory in the remote store
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Theory {
    #[serde(rename = "HF")]
    Hf,
    #[serde(rename = "PBE")]
    Pbe,
    #[serde(rename = "PBE0")]
    Pbe0,
    #[serde(rename = "B3LYP")]
    B3lyp,
}

impl Theory {
    pub const ALL: [Self; 4] = [Self::Hf, Self::Pbe, Self::Pbe0, Self::B3lyp];
}

impl fmt::Display for Theory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theory::Hf => "HF",
            Theory::Pbe => "PBE",
            Theory::Pbe0 => "PBE0",
            Theory::B3lyp => "B3LYP",
        })
    }
}

/// the energies obtained at one level of theory: the mean-field energy from
/// the solver output and the DMC energy with its standard error, all in
/// Hartrees
#[derive(Clone, Debug, PartialEq)]
pub struct Energies {
    pub theory: Theory,
    pub base: f64,
    pub dmc: f64,
    pub dmc_err: f64,
}

/// one row of the output table. `energies` holds exactly one entry per
/// configured [Theory], in configuration order, and is never touched after
/// assembly
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub fragment: usize,
    pub smiles: String,
    pub inchi: String,
    pub xyz: String,
    pub energies: Vec<Energies>,
}

/// return the canonical fragment directory name for `id`: id 1 becomes
/// `frag_00001`
pub fn frag_name(id: usize) -> String {
    format!("frag_{id:05}")
}
