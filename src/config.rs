use serde::Deserialize;

use crate::Theory;

#[derive(Deserialize, Debug, PartialEq)]
pub struct Config {
    /// number of fragments in the dataset. ids run from 1 to `frags`
    pub frags: usize,

    /// base levels of theory to collect, in output-column order
    pub theories: Vec<Theory>,

    /// path to the dataset root on the remote endpoint
    pub dataset: String,

    /// base URL for plain file retrieval
    pub endpoint: String,

    /// base URL of the directory-listing API
    pub listing: String,

    /// path to the qmca executable
    #[serde(default = "default_qmca")]
    pub qmca: String,

    /// path to the obabel executable
    #[serde(default = "default_obabel")]
    pub obabel: String,

    /// number of worker threads for the batch driver
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// per-attempt HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// seconds to sleep between attempts after a transport failure
    #[serde(default = "default_sleep_int")]
    pub sleep_int: u64,

    /// cap on retries after transport failures. absent means retry forever
    #[serde(default)]
    pub max_retries: Option<usize>,
}

fn default_qmca() -> String {
    String::from("qmca")
}

fn default_obabel() -> String {
    String::from("obabel")
}

fn default_jobs() -> usize {
    16
}

fn default_timeout() -> u64 {
    30
}

fn default_sleep_int() -> u64 {
    5
}

impl Config {
    pub fn load(filename: &str) -> Self {
        let contents = std::fs::read_to_string(filename)
            .expect("failed to load config file");
        toml::from_str(&contents).expect("failed to deserialize config file")
    }
}
