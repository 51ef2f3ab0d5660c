use std::{sync::Mutex, thread, time::Duration};

use anyhow::{bail, ensure, Context, Result};
use lazy_static::lazy_static;
use log::{trace, warn};
use regex::Regex;
use serde::Deserialize;

use crate::config::Config;

/// access to the remote dataset: raw file contents and directory listings
pub trait Store: Sync {
    /// return the text content of the file at `path`
    fn fetch(&self, path: &str) -> Result<String>;

    /// return the entry names in the directory at `path`
    fn list(&self, path: &str) -> Result<Vec<String>>;
}

/// one entry in a listing response. the API returns more fields per entry,
/// but only the name matters here
#[derive(Deserialize)]
struct Entry {
    name: String,
}

#[derive(Deserialize)]
struct Listing {
    #[serde(rename = "DATA")]
    data: Vec<Entry>,
}

pub struct HttpStore {
    agent: ureq::Agent,
    /// the listing API allows one request per client at a time, so every
    /// call takes this handle in turn
    ls: Mutex<ureq::Agent>,
    endpoint: String,
    listing: String,
    sleep_int: u64,
    max_retries: Option<usize>,
}

impl HttpStore {
    pub fn new(cfg: &Config) -> Self {
        let timeout = Duration::from_secs(cfg.timeout);
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            ls: Mutex::new(ureq::AgentBuilder::new().timeout(timeout).build()),
            endpoint: cfg.endpoint.clone(),
            listing: cfg.listing.clone(),
            sleep_int: cfg.sleep_int,
            max_retries: cfg.max_retries,
        }
    }

    /// GET `url` with `agent`, sleeping `self.sleep_int` seconds and retrying
    /// after a transport failure, up to `self.max_retries` times if that is
    /// set. an HTTP error status is returned immediately with the response
    /// body attached
    fn get(&self, agent: &ureq::Agent, url: &str) -> Result<String> {
        let mut tries = 0;
        loop {
            match agent.get(url).call() {
                Ok(resp) => {
                    return resp
                        .into_string()
                        .with_context(|| format!("reading body of {url}"))
                }
                Err(ureq::Error::Status(code, resp)) => {
                    let body = resp.into_string().unwrap_or_default();
                    bail!("GET {url} returned {code}: {body}");
                }
                Err(ureq::Error::Transport(e)) => {
                    tries += 1;
                    if let Some(max) = self.max_retries {
                        if tries > max {
                            bail!("GET {url} failed {tries} times: {e}");
                        }
                    }
                    warn!(
                        "GET {url} failed with '{e}', retrying in {}s",
                        self.sleep_int
                    );
                    thread::sleep(Duration::from_secs(self.sleep_int));
                }
            }
        }
    }
}

impl Store for HttpStore {
    fn fetch(&self, path: &str) -> Result<String> {
        trace!("fetching {path}");
        self.get(&self.agent, &format!("{}{path}", self.endpoint))
    }

    fn list(&self, path: &str) -> Result<Vec<String>> {
        trace!("listing {path}");
        let agent = self.ls.lock().unwrap();
        let body = self.get(&agent, &format!("{}?path={path}", self.listing))?;
        let listing: Listing = serde_json::from_str(&body)
            .with_context(|| format!("parsing listing of {path}"))?;
        Ok(listing.data.into_iter().map(|e| e.name).collect())
    }
}

lazy_static! {
    /// scalar output from the final DMC series. earlier series are
    /// equilibration steps
    static ref LAST_STEP: Regex = Regex::new(r"\.s001\.scalar\.dat$").unwrap();
}

/// return the name of the final-series scalar file in the directory at `dir`
pub fn last_scalar<S: Store>(store: &S, dir: &str) -> Result<String> {
    let entries = store.list(dir)?;
    let mut hits: Vec<String> =
        entries.into_iter().filter(|e| LAST_STEP.is_match(e)).collect();
    ensure!(
        hits.len() == 1,
        "expected one final-series scalar file in {dir}, found {}",
        hits.len()
    );
    Ok(hits.pop().unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string;

    struct OneDir(Vec<String>);

    impl Store for OneDir {
        fn fetch(&self, _path: &str) -> Result<String> {
            unimplemented!()
        }

        fn list(&self, _path: &str) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_last_scalar() {
        let store = OneDir(string![
            "frag00001.s000.scalar.dat",
            "frag00001.s001.scalar.dat",
            "frag00001.qmc"
        ]);
        let got =
            last_scalar(&store, "/benchmark/frag_00001/HF/DMC").unwrap();
        assert_eq!(got, "frag00001.s001.scalar.dat");
    }

    #[test]
    fn test_last_scalar_missing() {
        let store = OneDir(string!["frag00001.s000.scalar.dat"]);
        assert!(last_scalar(&store, "/benchmark/frag_00001/HF/DMC").is_err());
    }

    #[test]
    fn test_parse_listing() {
        let body = r#"{"DATA": [
            {"DATA_TYPE": "file", "name": "frag00001.s000.scalar.dat"},
            {"DATA_TYPE": "file", "name": "frag00001.s001.scalar.dat"}
        ]}"#;
        let got: Listing = serde_json::from_str(body).unwrap();
        let names: Vec<_> = got.data.into_iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            string!["frag00001.s000.scalar.dat", "frag00001.s001.scalar.dat"]
        );
    }
}
