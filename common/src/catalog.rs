//! # Host Catalog
//!
//! Produces the ordered list of hosts for a run: the built-in defaults first,
//! followed by whatever the optional host list file adds. Order is preserved
//! and duplicates are kept, since each entry gets its own slot in the grid.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CatalogError;
use crate::host::Host;

const BUILTIN_HOSTS: &[(&str, bool)] = &[
    ("1.1.1.1", false),
    ("8.8.8.8", false),
    ("google.com", true),
    ("ya.ru", true),
];

pub struct HostCatalog {
    hosts_file: Option<PathBuf>,
}

impl HostCatalog {
    pub fn new(hosts_file: Option<PathBuf>) -> Self {
        Self { hosts_file }
    }

    /// Loads the built-in hosts plus the entries of the host list file.
    ///
    /// A missing file yields the built-ins only. A file that exists but
    /// cannot be read is an error.
    pub fn load(&self) -> Result<Vec<Host>, CatalogError> {
        let mut hosts: Vec<Host> = builtin_hosts();

        if let Some(path) = &self.hosts_file {
            let extra: Vec<Host> = read_host_file(path)?;
            debug!("{} hosts added from {}", extra.len(), path.display());
            hosts.extend(extra);
        }

        Ok(hosts)
    }
}

pub fn builtin_hosts() -> Vec<Host> {
    BUILTIN_HOSTS
        .iter()
        .map(|(address, requires_dns)| Host::with_dns(*address, *requires_dns))
        .collect()
}

/// Parses host list text: one address per line, `#` starts a comment line.
pub fn parse_host_list(contents: &str) -> Vec<Host> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Host::new)
        .collect()
}

fn read_host_file(path: &Path) -> Result<Vec<Host>, CatalogError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(parse_host_list(&contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("no host list at {}, using built-in hosts", path.display());
            Ok(Vec::new())
        }
        Err(source) => Err(CatalogError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
