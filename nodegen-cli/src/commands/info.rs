use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use colored::Colorize;
use regex::Regex;
use sysinfo::{CpuRefreshKind, RefreshKind, System};
use tokio::process::Command;
use tracing::debug;

use crate::cli::BIN_NAME;

/// How long a single `--version` probe may run.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v?(\d+\.\d+(?:\.\d+)?)").expect("version regex is valid"));

/// Runtime binaries looked up on `PATH`: (label, executable).
pub const BINARIES: &[(&str, &str)] = &[("Node", "node"), ("npm", "npm"), ("Yarn", "yarn")];

/// Packages looked up in the local `node_modules`.
pub const NPM_PACKAGES: &[&str] = &["express"];

/// Packages looked up in the global npm root.
pub const NPM_GLOBAL_PACKAGES: &[&str] = &["DuyDangCode_NodeJs"];

struct BrowserProbe {
    name: &'static str,
    /// Executable names searched on `PATH`.
    commands: &'static [&'static str],
    /// Well-known install locations.
    paths: &'static [&'static str],
    /// Whether the executable answers `--version` without opening a window.
    versioned: bool,
}

const BROWSERS: &[BrowserProbe] = &[
    BrowserProbe {
        name: "Chrome",
        commands: &["google-chrome", "google-chrome-stable", "chromium", "chromium-browser"],
        paths: &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ],
        versioned: true,
    },
    BrowserProbe {
        name: "Edge",
        commands: &["microsoft-edge", "microsoft-edge-stable"],
        paths: &[
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
            r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe",
            r"C:\Program Files\Microsoft\Edge\Application\msedge.exe",
        ],
        versioned: true,
    },
    BrowserProbe {
        name: "Internet Explorer",
        commands: &[],
        paths: &[r"C:\Program Files\Internet Explorer\iexplore.exe"],
        versioned: false,
    },
    BrowserProbe {
        name: "Firefox",
        commands: &["firefox"],
        paths: &[
            "/Applications/Firefox.app/Contents/MacOS/firefox",
            r"C:\Program Files\Mozilla Firefox\firefox.exe",
        ],
        versioned: true,
    },
    BrowserProbe {
        name: "Safari",
        commands: &[],
        paths: &["/Applications/Safari.app/Contents/MacOS/Safari"],
        versioned: false,
    },
];

/// Outcome of looking up one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Found {
        version: Option<String>,
        location: Option<PathBuf>,
        /// Further installations beyond `location`.
        duplicates: Vec<PathBuf>,
    },
    NotFound,
}

impl Probe {
    pub fn value(value: impl Into<String>) -> Self {
        Probe::Found {
            version: Some(value.into()),
            location: None,
            duplicates: Vec::new(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Probe::Found { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub label: String,
    pub probe: Probe,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub entries: Vec<Entry>,
}

impl Section {
    pub fn entry(&self, label: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.label == label)
    }
}

/// Host environment details printed by `nodegen --info`.
#[derive(Debug, Clone)]
pub struct EnvReport {
    pub tool: &'static str,
    pub version: &'static str,
    pub running_from: Option<PathBuf>,
    pub sections: Vec<Section>,
}

impl EnvReport {
    /// Probe the host. `base` is the directory whose `node_modules` is
    /// inspected for local packages. Nothing is written to disk.
    pub async fn collect(base: &Path) -> EnvReport {
        let npm = which::which("npm").ok();

        let sections = vec![
            Section {
                title: "System",
                entries: system_entries(),
            },
            Section {
                title: "Binaries",
                entries: binary_entries().await,
            },
            Section {
                title: "Browsers",
                entries: browser_entries().await,
            },
            Section {
                title: "npmPackages",
                entries: NPM_PACKAGES
                    .iter()
                    .map(|pkg| Entry {
                        label: pkg.to_string(),
                        probe: package_probe(&base.join("node_modules"), pkg),
                    })
                    .collect(),
            },
            Section {
                title: "npmGlobalPackages",
                entries: global_package_entries(npm.as_deref()).await,
            },
        ];

        EnvReport {
            tool: BIN_NAME,
            version: env!("CARGO_PKG_VERSION"),
            running_from: std::env::current_exe().ok(),
            sections,
        }
    }

    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }
}

impl fmt::Display for EnvReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "\nEnvironment Info:".bold())?;
        writeln!(f)?;
        writeln!(f, "  current version of {}: {}", self.tool, self.version)?;
        if let Some(path) = &self.running_from {
            writeln!(f, "  running from {}", path.display())?;
        }

        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "  {}:", section.title)?;
            for entry in &section.entries {
                writeln!(f, "    {}: {}", entry.label, entry.probe)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Probe::NotFound => write!(f, "Not Found"),
            Probe::Found {
                version,
                location,
                duplicates,
            } => {
                match (version, location) {
                    (Some(v), Some(l)) => write!(f, "{v} - {}", l.display())?,
                    (Some(v), None) => write!(f, "{v}")?,
                    (None, Some(l)) => write!(f, "{}", l.display())?,
                    (None, None) => write!(f, "Found")?,
                }
                if !duplicates.is_empty() {
                    let others: Vec<_> = duplicates.iter().map(|d| d.display().to_string()).collect();
                    write!(f, " (also {})", others.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

fn system_entries() -> Vec<Entry> {
    let os = match (System::long_os_version(), System::kernel_version()) {
        (Some(os), Some(kernel)) => Probe::value(format!("{os} (kernel {kernel})")),
        (Some(os), None) => Probe::value(os),
        (None, Some(kernel)) => Probe::value(kernel),
        (None, None) => Probe::NotFound,
    };

    let sys = System::new_with_specifics(
        RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()),
    );
    let cpus = sys.cpus();
    let cpu = match cpus.first() {
        Some(first) => Probe::value(format!(
            "({}) {} {}",
            cpus.len(),
            std::env::consts::ARCH,
            first.brand().trim()
        )),
        None => Probe::NotFound,
    };

    vec![
        Entry {
            label: "OS".into(),
            probe: os,
        },
        Entry {
            label: "CPU".into(),
            probe: cpu,
        },
    ]
}

async fn binary_entries() -> Vec<Entry> {
    let mut entries = Vec::with_capacity(BINARIES.len());
    for (label, exe) in BINARIES {
        let locations: Vec<PathBuf> = which::which_all(exe)
            .map(|found| found.collect())
            .unwrap_or_default();
        entries.push(Entry {
            label: label.to_string(),
            probe: located(locations, true).await,
        });
    }
    entries
}

async fn browser_entries() -> Vec<Entry> {
    let mut entries = Vec::with_capacity(BROWSERS.len());
    for browser in BROWSERS {
        let mut locations: Vec<PathBuf> = Vec::new();
        for cmd in browser.commands {
            if let Ok(found) = which::which_all(cmd) {
                locations.extend(found);
            }
        }
        locations.extend(
            browser
                .paths
                .iter()
                .map(PathBuf::from)
                .filter(|p| p.is_file()),
        );
        locations.dedup();

        let versioned = browser.versioned && !cfg!(windows);
        entries.push(Entry {
            label: browser.name.to_string(),
            probe: located(locations, versioned).await,
        });
    }
    entries
}

/// Build a probe from every location an item was found at; the first one
/// is asked for its version.
async fn located(mut locations: Vec<PathBuf>, versioned: bool) -> Probe {
    if locations.is_empty() {
        return Probe::NotFound;
    }
    let location = locations.remove(0);
    let version = if versioned {
        version_of(&location).await
    } else {
        None
    };
    Probe::Found {
        version,
        location: Some(location),
        duplicates: locations,
    }
}

async fn version_of(program: &Path) -> Option<String> {
    let text = run_probe(program, &["--version"]).await?;
    parse_version(&text)
}

/// Run `program args` and return its stdout, or stderr when stdout is empty.
async fn run_probe(program: &Path, args: &[&str]) -> Option<String> {
    let result = tokio::time::timeout(PROBE_TIMEOUT, async {
        Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
    })
    .await;

    match result {
        Ok(Ok(output)) => {
            let text = if output.stdout.is_empty() {
                String::from_utf8_lossy(&output.stderr).into_owned()
            } else {
                String::from_utf8_lossy(&output.stdout).into_owned()
            };
            Some(text)
        }
        Ok(Err(e)) => {
            debug!(program = %program.display(), error = %e, "probe failed");
            None
        }
        Err(_) => {
            debug!(program = %program.display(), "probe timed out");
            None
        }
    }
}

/// Extract the first dotted version number from command output.
pub fn parse_version(text: &str) -> Option<String> {
    VERSION_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Look up `name` under a `node_modules` directory by reading its
/// `package.json`.
pub fn package_probe(node_modules: &Path, name: &str) -> Probe {
    let package_dir = node_modules.join(name);
    let manifest = package_dir.join("package.json");
    let Ok(content) = std::fs::read_to_string(&manifest) else {
        return Probe::NotFound;
    };

    let version = serde_json::from_str::<serde_json::Value>(&content)
        .ok()
        .and_then(|json| json.get("version")?.as_str().map(str::to_string));

    Probe::Found {
        version,
        location: Some(package_dir),
        duplicates: Vec::new(),
    }
}

async fn global_package_entries(npm: Option<&Path>) -> Vec<Entry> {
    let global_root = match npm {
        Some(npm) => run_probe(npm, &["root", "-g"])
            .await
            .map(|out| PathBuf::from(out.trim()))
            .filter(|p| p.is_dir()),
        None => None,
    };

    NPM_GLOBAL_PACKAGES
        .iter()
        .map(|pkg| Entry {
            label: pkg.to_string(),
            probe: match &global_root {
                Some(root) => package_probe(root, pkg),
                None => Probe::NotFound,
            },
        })
        .collect()
}
