use std::path::PathBuf;

use clap::{ArgAction, Parser};
use pingrid_common::config::{
    Config, DEFAULT_COLUMNS, DEFAULT_ECHO_COUNT, DEFAULT_HOSTS_FILE, DEFAULT_MAX_HOPS,
};

#[derive(Parser)]
#[command(name = "pingrid", version)]
#[command(about = "Ping and trace a set of hosts concurrently in a live terminal grid.")]
pub struct CommandLine {
    /// Extra hosts to probe, one per line; ignored if missing
    #[arg(short = 'f', long = "hosts", value_name = "PATH", default_value = DEFAULT_HOSTS_FILE)]
    pub hosts_file: PathBuf,

    /// Number of grid columns
    #[arg(short, long, default_value_t = DEFAULT_COLUMNS, value_parser = parse_columns)]
    pub columns: usize,

    /// Echo requests sent per host
    #[arg(short = 'n', long = "count", default_value_t = DEFAULT_ECHO_COUNT)]
    pub echo_count: u16,

    /// Hop limit for the path trace
    #[arg(short, long, default_value_t = DEFAULT_MAX_HOPS)]
    pub max_hops: u16,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            hosts_file: Some(self.hosts_file.clone()),
            columns: self.columns,
            echo_count: self.echo_count,
            max_hops: self.max_hops,
        }
    }
}

fn parse_columns(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("column count must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
