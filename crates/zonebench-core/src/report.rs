use crate::results::{ProbeKey, ResultSet};
use zonebench_abstract::{AddrClass, Metric};

const CELL_WIDTH: usize = 12;

/// Heading printed above a rendered matrix, e.g. `Latency (Public IP)`.
pub fn title(metric: Metric, class: AddrClass) -> String {
    format!("{} ({})", metric.label(), class.label())
}

/// Render one (metric, class) matrix as a fixed-width bordered table.
///
/// Pure function of the result set: node names label both axes, cells are
/// right-aligned to a fixed width, the diagonal is blank, and a cell with no
/// recorded outcome renders empty (as opposed to a failed probe's `N/A`).
pub fn render(set: &ResultSet, metric: Metric, class: AddrClass, names: &[String]) -> String {
    assert_eq!(set.dim(), names.len(), "matrix dimension mismatch");

    let label_width = names.iter().map(|n| n.len()).max().unwrap_or(0);
    let row_prefix_width = label_width + 4; // "| name |" up to the first cell
    let body_width = names.len() * (CELL_WIDTH + 3);

    let mut out = String::new();

    // Header: column labels offset past the row-label column.
    out.push_str(&" ".repeat(row_prefix_width));
    out.push_str(&"-".repeat(body_width));
    out.push('\n');
    out.push_str(&" ".repeat(row_prefix_width));
    for name in names {
        out.push_str(&format!("| {name:^CELL_WIDTH$} "));
    }
    out.push_str("|\n");
    out.push_str(&"-".repeat(row_prefix_width + body_width));
    out.push('\n');

    for (i, name) in names.iter().enumerate() {
        out.push_str(&format!("| {name:<label_width$} |"));
        for j in 0..names.len() {
            if i == j {
                out.push_str(&" ".repeat(CELL_WIDTH + 2));
                out.push('|');
                continue;
            }
            let cell = set
                .get(ProbeKey {
                    source: i,
                    target: j,
                    metric,
                    class,
                })
                .map(|o| o.to_string())
                .unwrap_or_default();
            out.push_str(&format!(" {cell:>CELL_WIDTH$} |"));
        }
        out.push('\n');
    }
    out.push_str(&"-".repeat(row_prefix_width + body_width));
    out.push('\n');

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonebench_abstract::ProbeOutcome;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn full_latency_set(dim: usize) -> ResultSet {
        let mut set = ResultSet::new(dim);
        for i in 0..dim {
            for j in 0..dim {
                if i != j {
                    set.record(
                        ProbeKey {
                            source: i,
                            target: j,
                            metric: Metric::Latency,
                            class: AddrClass::Public,
                        },
                        ProbeOutcome::Latency { ms: 1.5 },
                    );
                }
            }
        }
        set
    }

    #[test]
    fn table_has_one_row_per_node_and_blank_diagonal() {
        let labels = names(&["vm1", "vm2", "vm3"]);
        let set = full_latency_set(3);
        let table = render(&set, Metric::Latency, AddrClass::Public, &labels);

        let rows: Vec<&str> = table
            .lines()
            .filter(|l| l.starts_with("| vm"))
            .collect();
        assert_eq!(rows.len(), 3);
        for (i, row) in rows.iter().enumerate() {
            // A row is the label cell plus one cell per node.
            let cells: Vec<&str> = row.trim_matches('|').split('|').collect();
            assert_eq!(cells.len(), 4);
            for (j, cell) in cells.iter().skip(1).enumerate() {
                if i == j {
                    assert!(cell.trim().is_empty(), "diagonal must be blank");
                } else {
                    assert_eq!(cell.trim(), "1.500 ms");
                }
            }
        }
    }

    #[test]
    fn render_is_pure() {
        let labels = names(&["a", "b"]);
        let set = full_latency_set(2);
        let first = render(&set, Metric::Latency, AddrClass::Public, &labels);
        let second = render(&set, Metric::Latency, AddrClass::Public, &labels);
        assert_eq!(first, second);
    }

    #[test]
    fn skipped_metric_renders_blank_not_na() {
        let labels = names(&["a", "b"]);
        let set = full_latency_set(2); // bandwidth never recorded
        let table = render(&set, Metric::Bandwidth, AddrClass::Public, &labels);
        assert!(!table.contains("N/A"));
        for row in table.lines().filter(|l| l.starts_with("| ")) {
            let cells: Vec<&str> = row.trim_matches('|').split('|').collect();
            for cell in cells.iter().skip(1) {
                assert!(cell.trim().is_empty());
            }
        }
    }

    #[test]
    fn failed_probe_renders_na() {
        let labels = names(&["a", "b"]);
        let mut set = ResultSet::new(2);
        set.record(
            ProbeKey {
                source: 0,
                target: 1,
                metric: Metric::Bandwidth,
                class: AddrClass::Private,
            },
            ProbeOutcome::Unparsed,
        );
        let table = render(&set, Metric::Bandwidth, AddrClass::Private, &labels);
        assert!(table.contains("N/A"));
    }

    #[test]
    fn titles_name_metric_and_class() {
        assert_eq!(title(Metric::Latency, AddrClass::Public), "Latency (Public IP)");
        assert_eq!(
            title(Metric::Bandwidth, AddrClass::Private),
            "Bandwidth (Private IP)"
        );
    }
}
