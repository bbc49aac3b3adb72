//! Environment diagnostics for `info`.
//!
//! Collects a read-only snapshot of the host: operating system, CPU count,
//! memory, shell, and the versions of the tools and browsers a front-end
//! template usually needs. Anything that cannot be probed is reported as
//! `Not Found`.

use std::env;
use std::fmt;
use std::fs;
use std::process::Command;
use std::thread;

use log::trace;
use regex::Regex;

pub const NOT_FOUND: &str = "Not Found";

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub label: String,
    pub value: String,
}

/// A titled group of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub entries: Vec<Entry>,
}

/// The full diagnostics report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvReport {
    pub sections: Vec<Section>,
}

/// A tool whose version is probed by running it.
struct Probe {
    label: &'static str,
    program: &'static str,
    args: &'static [&'static str],
}

const PROBES: &[(&str, &[Probe])] = &[
    (
        "Binaries",
        &[
            Probe { label: "Node", program: "node", args: &["--version"] },
            Probe { label: "Yarn", program: "yarn", args: &["--version"] },
            Probe { label: "npm", program: "npm", args: &["--version"] },
        ],
    ),
    (
        "Browsers",
        &[
            Probe { label: "Chrome", program: "google-chrome", args: &["--version"] },
            Probe { label: "Edge", program: "microsoft-edge", args: &["--version"] },
            Probe { label: "Firefox", program: "firefox", args: &["--version"] },
            Probe {
                label: "Safari",
                program: "defaults",
                args: &["read", "/Applications/Safari.app/Contents/Info", "CFBundleShortVersionString"],
            },
        ],
    ),
    (
        "Managers",
        &[Probe { label: "Gradle", program: "gradle", args: &["--version"] }],
    ),
    (
        "Utilities",
        &[Probe { label: "Git", program: "git", args: &["--version"] }],
    ),
    (
        "Languages",
        &[
            Probe { label: "Java", program: "java", args: &["-version"] },
            Probe { label: "Groovy", program: "groovy", args: &["--version"] },
        ],
    ),
];

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Pull the first dotted version number out of a tool's output.
pub fn extract_version(output: &str) -> Option<String> {
    let re = Regex::new(r"\d+(\.\d+)+").ok()?;
    re.find(output).map(|m| m.as_str().to_string())
}

fn probe_version(program: &str, args: &[&str]) -> String {
    let output = match Command::new(program).args(args).output() {
        Ok(output) => output,
        Err(e) => {
            trace!("{} not available: {}", program, e);
            return NOT_FOUND.to_string();
        }
    };

    // java prints its version on stderr
    let text = format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    extract_version(&text).unwrap_or_else(|| NOT_FOUND.to_string())
}

/// Available and total memory in bytes from the contents of `/proc/meminfo`.
pub fn parse_meminfo(text: &str) -> Option<(u64, u64)> {
    let field = |name: &str| {
        text.lines()
            .find_map(|line| line.strip_prefix(name)?.strip_prefix(':'))
            .and_then(|rest| rest.split_whitespace().next()?.parse::<u64>().ok())
            .map(|kib| kib * 1024)
    };
    Some((field("MemAvailable")?, field("MemTotal")?))
}

fn gib(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / GIB)
}

fn memory() -> String {
    if let Some((available, total)) = fs::read_to_string("/proc/meminfo")
        .ok()
        .as_deref()
        .and_then(parse_meminfo)
    {
        return format!("{} / {}", gib(available), gib(total));
    }

    // macOS exposes only the total without extra tooling
    Command::new("sysctl")
        .args(["-n", "hw.memsize"])
        .output()
        .ok()
        .and_then(|o| String::from_utf8_lossy(&o.stdout).trim().parse::<u64>().ok())
        .map(gib)
        .unwrap_or_else(|| NOT_FOUND.to_string())
}

fn system_section() -> Section {
    let cpus = thread::available_parallelism()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| NOT_FOUND.to_string());
    let shell = env::var("SHELL")
        .or_else(|_| env::var("ComSpec"))
        .unwrap_or_else(|_| NOT_FOUND.to_string());

    Section {
        title: "System".to_string(),
        entries: vec![
            Entry {
                label: "OS".to_string(),
                value: format!("{} {}", env::consts::OS, env::consts::ARCH),
            },
            Entry {
                label: "CPU".to_string(),
                value: format!("({}) {}", cpus, env::consts::ARCH),
            },
            Entry {
                label: "Memory".to_string(),
                value: memory(),
            },
            Entry {
                label: "Shell".to_string(),
                value: shell,
            },
        ],
    }
}

/// Probe the host and build the report.
pub fn collect() -> EnvReport {
    let mut sections = vec![system_section()];

    for (title, probes) in PROBES {
        sections.push(Section {
            title: title.to_string(),
            entries: probes
                .iter()
                .map(|probe| Entry {
                    label: probe.label.to_string(),
                    value: probe_version(probe.program, probe.args),
                })
                .collect(),
        });
    }

    EnvReport { sections }
}

impl fmt::Display for EnvReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "  {}:", section.title)?;
            for entry in &section.entries {
                writeln!(f, "    {}: {}", entry.label, entry.value)?;
            }
        }
        Ok(())
    }
}
