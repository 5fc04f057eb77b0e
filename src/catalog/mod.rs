//! Catalog of supported debugger host versions
//!
//! Each entry maps a COM automation prog id to the friendly product name
//! shown to the operator. The table is ordered newest version first; the
//! scanner walks it in order, so newer IDE versions are listed before older
//! ones when several are running.

/// A supported debugger host program identifier with its display label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostDescriptor {
    /// COM prog id as registered in the running object table
    pub prog_id: &'static str,
    /// Human-readable product name
    pub label: &'static str,
}

/// All Visual Studio versions this tool knows how to attach, newest first
pub const SUPPORTED_HOSTS: &[HostDescriptor] = &[
    HostDescriptor {
        prog_id: "VisualStudio.DTE.17.0",
        label: "Visual Studio 2022",
    },
    HostDescriptor {
        prog_id: "VisualStudio.DTE.16.0",
        label: "Visual Studio 2019",
    },
    HostDescriptor {
        prog_id: "VisualStudio.DTE.15.0",
        label: "Visual Studio 2017",
    },
    HostDescriptor {
        prog_id: "VisualStudio.DTE.14.0",
        label: "Visual Studio 2015",
    },
    HostDescriptor {
        prog_id: "VisualStudio.DTE.12.0",
        label: "Visual Studio 2013",
    },
    HostDescriptor {
        prog_id: "VisualStudio.DTE.11.0",
        label: "Visual Studio 2012",
    },
    HostDescriptor {
        prog_id: "VisualStudio.DTE.10.0",
        label: "Visual Studio 2010",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn version_of(prog_id: &str) -> f64 {
        prog_id
            .rsplit("DTE.")
            .next()
            .and_then(|v| v.parse().ok())
            .expect("prog id carries a version suffix")
    }

    #[test]
    fn test_catalog_not_empty() {
        assert!(!SUPPORTED_HOSTS.is_empty());
    }

    #[test]
    fn test_catalog_ordered_newest_first() {
        for pair in SUPPORTED_HOSTS.windows(2) {
            assert!(
                version_of(pair[0].prog_id) > version_of(pair[1].prog_id),
                "{} should sort before {}",
                pair[0].prog_id,
                pair[1].prog_id
            );
        }
    }

    #[test]
    fn test_catalog_entries_well_formed() {
        for host in SUPPORTED_HOSTS {
            assert!(host.prog_id.starts_with("VisualStudio.DTE."));
            assert!(host.label.starts_with("Visual Studio "));
        }
    }

    #[test]
    fn test_catalog_prog_ids_unique() {
        for (i, a) in SUPPORTED_HOSTS.iter().enumerate() {
            for b in &SUPPORTED_HOSTS[i + 1..] {
                assert_ne!(a.prog_id, b.prog_id);
            }
        }
    }
}
