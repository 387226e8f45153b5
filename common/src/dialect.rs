//! # Command Dialects
//!
//! The reachability probe and the path trace are external tools whose flags
//! differ between platforms. The operating system is inspected once at
//! startup and turned into a [`CommandDialect`], which the diagnostic runner
//! consults for every invocation.

use std::fmt;

use crate::config::Config;

/// The two diagnostics run for every host, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    Reachability,
    PathTrace,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Reachability => f.write_str("reachability"),
            Diagnostic::PathTrace => f.write_str("path trace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Unix,
    Windows,
}

impl OsFamily {
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Maps an OS identifier as reported by `std::env::consts::OS`.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => OsFamily::Windows,
            _ => OsFamily::Unix,
        }
    }
}

/// A program plus its fixed arguments. The target address is appended last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Full argument vector for one target, excluding the program itself.
    pub fn argv(&self, address: &str) -> Vec<String> {
        let mut argv: Vec<String> = self.args.clone();
        argv.push(address.to_string());
        argv
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDialect {
    pub reachability: CommandSpec,
    pub path_trace: CommandSpec,
}

impl CommandDialect {
    /// Resolves the dialect for the platform this process runs on.
    pub fn detect(cfg: &Config) -> Self {
        Self::for_family(OsFamily::detect(), cfg)
    }

    pub fn for_family(family: OsFamily, cfg: &Config) -> Self {
        let count: String = cfg.echo_count.to_string();
        let hops: String = cfg.max_hops.to_string();

        match family {
            OsFamily::Unix => Self {
                reachability: CommandSpec::new("ping", ["-c".to_string(), count]),
                path_trace: CommandSpec::new("traceroute", ["-m".to_string(), hops]),
            },
            OsFamily::Windows => Self {
                reachability: CommandSpec::new("ping", ["-n".to_string(), count]),
                path_trace: CommandSpec::new("tracert", ["-h".to_string(), hops]),
            },
        }
    }

    pub fn command_for(&self, diagnostic: Diagnostic) -> &CommandSpec {
        match diagnostic {
            Diagnostic::Reachability => &self.reachability,
            Diagnostic::PathTrace => &self.path_trace,
        }
    }
}
