use std::path::PathBuf;

pub const DEFAULT_HOSTS_FILE: &str = "hosts.txt";
pub const DEFAULT_COLUMNS: usize = 4;
pub const DEFAULT_ECHO_COUNT: u16 = 3;
pub const DEFAULT_MAX_HOPS: u16 = 30;

/// Settings for a single diagnostic run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Optional list of extra hosts, one per line.
    ///
    /// A path that does not exist is treated the same as `None`.
    pub hosts_file: Option<PathBuf>,
    /// Number of grid columns drawn side by side.
    pub columns: usize,
    /// Echo requests sent by the reachability probe.
    pub echo_count: u16,
    /// Hop limit for the path trace.
    pub max_hops: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts_file: Some(PathBuf::from(DEFAULT_HOSTS_FILE)),
            columns: DEFAULT_COLUMNS,
            echo_count: DEFAULT_ECHO_COUNT,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}
