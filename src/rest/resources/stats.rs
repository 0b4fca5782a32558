//! Live server statistics.

use std::fmt;
use std::str::FromStr;

use crate::rest::resource::{panel_resource, FieldValue};
use crate::rest::{Fields, ParsedValue};

/// Daemon-reported state of a server process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerState {
    /// The process is running.
    Running,
    /// The process is stopped.
    Offline,
    /// The process is booting.
    Starting,
    /// The process is shutting down.
    Stopping,
}

impl PowerState {
    /// Returns the wire name of this state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Offline => "offline",
            Self::Starting => "starting",
            Self::Stopping => "stopping",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(Self::Running),
            "offline" => Ok(Self::Offline),
            "starting" => Ok(Self::Starting),
            "stopping" => Ok(Self::Stopping),
            other => Err(format!("unknown power state '{other}'")),
        }
    }
}

impl FieldValue for PowerState {
    const EXPECTED: &'static str = "power state";

    fn from_parsed(value: &ParsedValue) -> Option<Self> {
        value.as_str()?.parse().ok()
    }
}

panel_resource! {
    /// Resource usage of a server, from the client API.
    Stats => StatsAttributes {
        /// Current process state.
        current_state: PowerState,
        /// Whether the server is suspended.
        is_suspended: bool,
        /// Raw usage counters; see [`Stats::usage`].
        resources: Fields,
    }
}

/// Usage counters reported under `resources`.
///
/// Counters the daemon did not report read as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResourceUsage {
    /// Memory in bytes.
    pub memory_bytes: u64,
    /// CPU usage in percent of one core.
    pub cpu_absolute: f64,
    /// Disk usage in bytes.
    pub disk_bytes: u64,
    /// Bytes received.
    pub network_rx_bytes: u64,
    /// Bytes sent.
    pub network_tx_bytes: u64,
    /// Process uptime in milliseconds.
    pub uptime: u64,
}

impl Stats {
    /// Returns the usage counters.
    #[must_use]
    pub fn usage(&self) -> ResourceUsage {
        let Some(resources) = self.attributes.resources.as_ref() else {
            return ResourceUsage::default();
        };
        let counter = |name: &str| resources.get(name).and_then(ParsedValue::as_u64).unwrap_or(0);

        ResourceUsage {
            memory_bytes: counter("memory_bytes"),
            cpu_absolute: resources
                .get("cpu_absolute")
                .and_then(ParsedValue::as_f64)
                .unwrap_or(0.0),
            disk_bytes: counter("disk_bytes"),
            network_rx_bytes: counter("network_rx_bytes"),
            network_tx_bytes: counter("network_tx_bytes"),
            uptime: counter("uptime"),
        }
    }

    /// Returns `true` if the server process is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.attributes.current_state == Some(PowerState::Running)
    }
}
