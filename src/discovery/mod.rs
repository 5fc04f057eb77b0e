//! Instance discovery through the OS-wide object broker
//!
//! The broker (the COM running object table on Windows) maps symbolic
//! monikers to live automation objects. Discovery enumerates every
//! registered moniker, keeps the ones whose display name carries a known
//! debugger-host prog id, probes each survivor for the typed automation
//! capability, and turns the result into a selectable instance list.

use std::fmt;

use tracing::{debug, warn};

use crate::catalog::HostDescriptor;
use crate::core::types::LauncherResult;
use crate::host::DebuggerHost;

/// Placeholder shown when a host has no open solution
pub const NO_SOLUTION_LABEL: &str = "[No active solution]";

/// Access to the OS-wide registry of live automation objects
///
/// `monikers` yields one opaque reference per registered object with no
/// filtering; name inspection and capability probing are separate verbs so
/// the qualification policy stays in [`discover`], where it is testable.
pub trait ObjectBroker {
    type Moniker;
    type Host: DebuggerHost;
    type Iter: Iterator<Item = Self::Moniker>;

    /// A fresh, finite, non-restartable enumeration of every live entry
    fn monikers(&self) -> LauncherResult<Self::Iter>;

    /// Human-readable display name of an entry, if it can be resolved
    fn display_name(&self, moniker: &Self::Moniker) -> Option<String>;

    /// The live object behind an entry, if it exposes the debugger-host
    /// automation capability
    fn probe(&self, moniker: &Self::Moniker) -> Option<Self::Host>;
}

/// A debugger host instance found during a scan
///
/// The automation handle is a non-owning reference to an object whose
/// lifetime belongs to the external host process; it is only valid for the
/// duration of the scan/attach sequence.
pub struct DiscoveredInstance<H> {
    pub host: H,
    pub host_label: &'static str,
    pub solution_label: String,
}

impl<H> fmt::Display for DiscoveredInstance<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.host_label, self.solution_label)
    }
}

/// Whether a broker display name belongs to the given prog id
///
/// Qualifying names start with `"!" + prog_id` at position 0, exact and
/// case-sensitive. Names that merely contain the prog id elsewhere are
/// decoys and do not qualify.
pub fn matches_prog_id(display_name: &str, prog_id: &str) -> bool {
    display_name
        .strip_prefix('!')
        .is_some_and(|rest| rest.starts_with(prog_id))
}

/// Scans the broker for every catalog entry and builds the instance list
///
/// Ordering: catalog order outer, broker enumeration order inner. Entries
/// whose display name cannot be resolved or whose probe fails are skipped;
/// only broker enumeration failures propagate.
pub fn discover<B: ObjectBroker>(
    broker: &B,
    catalog: &[HostDescriptor],
) -> LauncherResult<Vec<DiscoveredInstance<B::Host>>> {
    let mut instances = Vec::new();

    for descriptor in catalog {
        for moniker in broker.monikers()? {
            let Some(name) = broker.display_name(&moniker) else {
                debug!("skipping moniker without resolvable display name");
                continue;
            };

            if !matches_prog_id(&name, descriptor.prog_id) {
                continue;
            }

            let Some(host) = broker.probe(&moniker) else {
                warn!(moniker = %name, "registered object does not expose the automation capability, skipping");
                continue;
            };

            let solution_label = solution_label_of(&host);
            debug!(moniker = %name, solution = %solution_label, "discovered {}", descriptor.label);
            instances.push(DiscoveredInstance {
                host,
                host_label: descriptor.label,
                solution_label,
            });
        }
    }

    Ok(instances)
}

fn solution_label_of<H: DebuggerHost>(host: &H) -> String {
    match host.solution_path() {
        Ok(path) if !path.is_empty() => path,
        _ => NO_SOLUTION_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{LauncherError, LauncherResult};
    use crate::host::DebuggeeProcess;

    struct FakeProcess;

    impl DebuggeeProcess for FakeProcess {
        fn pid(&self) -> u32 {
            0
        }
        fn name(&self) -> LauncherResult<String> {
            Ok(String::new())
        }
        fn attach(&self) -> LauncherResult<()> {
            Ok(())
        }
    }

    struct FakeHost {
        solution: Option<String>,
    }

    impl DebuggerHost for FakeHost {
        type Process = FakeProcess;

        fn solution_path(&self) -> LauncherResult<String> {
            self.solution
                .clone()
                .ok_or_else(|| LauncherError::host_call("Solution.FullName", "unavailable"))
        }
        fn processes(&self) -> LauncherResult<Vec<FakeProcess>> {
            Ok(Vec::new())
        }
        fn continue_execution(&self) -> LauncherResult<()> {
            Ok(())
        }
        fn reveal_output_pane(&self) -> LauncherResult<()> {
            Ok(())
        }
    }

    /// Broker over a fixed table of (display name, probe success, solution)
    struct FakeBroker {
        entries: Vec<(Option<String>, bool, Option<String>)>,
    }

    impl ObjectBroker for FakeBroker {
        type Moniker = usize;
        type Host = FakeHost;
        type Iter = std::ops::Range<usize>;

        fn monikers(&self) -> LauncherResult<Self::Iter> {
            Ok(0..self.entries.len())
        }

        fn display_name(&self, moniker: &usize) -> Option<String> {
            self.entries[*moniker].0.clone()
        }

        fn probe(&self, moniker: &usize) -> Option<FakeHost> {
            let (_, probeable, ref solution) = self.entries[*moniker];
            probeable.then(|| FakeHost {
                solution: solution.clone(),
            })
        }
    }

    const CATALOG: &[HostDescriptor] = &[
        HostDescriptor {
            prog_id: "VisualStudio.DTE.17.0",
            label: "Visual Studio 2022",
        },
        HostDescriptor {
            prog_id: "VisualStudio.DTE.16.0",
            label: "Visual Studio 2019",
        },
    ];

    fn entry(name: &str) -> (Option<String>, bool, Option<String>) {
        (Some(name.to_string()), true, Some("C:\\app.sln".to_string()))
    }

    #[test]
    fn test_matches_prog_id() {
        assert!(matches_prog_id(
            "!VisualStudio.DTE.17.0:1234",
            "VisualStudio.DTE.17.0"
        ));
        assert!(matches_prog_id(
            "!VisualStudio.DTE.17.0",
            "VisualStudio.DTE.17.0"
        ));
    }

    #[test]
    fn test_decoys_are_excluded() {
        let prog_id = "VisualStudio.DTE.17.0";
        // No bang prefix
        assert!(!matches_prog_id("VisualStudio.DTE.17.0:1234", prog_id));
        // Prog id not at position 0 after the bang
        assert!(!matches_prog_id("!x!VisualStudio.DTE.17.0:1", prog_id));
        assert!(!matches_prog_id("!Clone.VisualStudio.DTE.17.0", prog_id));
        // Case-sensitive
        assert!(!matches_prog_id("!visualstudio.dte.17.0:1", prog_id));
    }

    #[test]
    fn test_discover_keeps_only_matching_entries() {
        let broker = FakeBroker {
            entries: vec![
                entry("!VisualStudio.DTE.17.0:100"),
                entry("!SomeOtherApp.Document"),
                entry("!VisualStudio.DTE.17.0:200"),
                entry("contains VisualStudio.DTE.17.0 but no bang"),
            ],
        };

        let instances = discover(&broker, CATALOG).unwrap();
        assert_eq!(instances.len(), 2);
        assert!(instances.iter().all(|i| i.host_label == "Visual Studio 2022"));
    }

    #[test]
    fn test_discover_order_catalog_outer_broker_inner() {
        let broker = FakeBroker {
            entries: vec![
                entry("!VisualStudio.DTE.16.0:1"),
                entry("!VisualStudio.DTE.17.0:2"),
                entry("!VisualStudio.DTE.16.0:3"),
            ],
        };

        let instances = discover(&broker, CATALOG).unwrap();
        let labels: Vec<&str> = instances.iter().map(|i| i.host_label).collect();
        // 17.0 first (catalog order), then the two 16.0 in broker order
        assert_eq!(
            labels,
            vec!["Visual Studio 2022", "Visual Studio 2019", "Visual Studio 2019"]
        );
    }

    #[test]
    fn test_discover_skips_probe_failures() {
        let broker = FakeBroker {
            entries: vec![
                (Some("!VisualStudio.DTE.17.0:1".to_string()), false, None),
                entry("!VisualStudio.DTE.17.0:2"),
            ],
        };

        let instances = discover(&broker, CATALOG).unwrap();
        assert_eq!(instances.len(), 1);
    }

    #[test]
    fn test_discover_skips_unresolvable_display_names() {
        let broker = FakeBroker {
            entries: vec![
                (None, true, Some("C:\\app.sln".to_string())),
                entry("!VisualStudio.DTE.17.0:2"),
            ],
        };

        let instances = discover(&broker, CATALOG).unwrap();
        assert_eq!(instances.len(), 1);
    }

    #[test]
    fn test_solution_label_placeholder() {
        // Empty solution path and unreadable solution path both fall back
        let broker = FakeBroker {
            entries: vec![
                (
                    Some("!VisualStudio.DTE.17.0:1".to_string()),
                    true,
                    Some(String::new()),
                ),
                (Some("!VisualStudio.DTE.17.0:2".to_string()), true, None),
                entry("!VisualStudio.DTE.17.0:3"),
            ],
        };

        let instances = discover(&broker, CATALOG).unwrap();
        assert_eq!(instances[0].solution_label, NO_SOLUTION_LABEL);
        assert_eq!(instances[1].solution_label, NO_SOLUTION_LABEL);
        assert_eq!(instances[2].solution_label, "C:\\app.sln");
    }

    #[test]
    fn test_instance_display() {
        let instance = DiscoveredInstance {
            host: FakeHost { solution: None },
            host_label: "Visual Studio 2022",
            solution_label: "C:\\app.sln".to_string(),
        };
        assert_eq!(instance.to_string(), "Visual Studio 2022 - C:\\app.sln");
    }
}
