use std::collections::BTreeMap;
use zonebench_abstract::{AddrClass, Metric, ProbeOutcome};

/// Identifies one cell across the four matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProbeKey {
    pub source: usize,
    pub target: usize,
    pub metric: Metric,
    pub class: AddrClass,
}

/// All probe outcomes of a run, keyed by (source, target, metric, class).
///
/// One flat map instead of four index-addressed grids: a cell either has an
/// outcome or was never attempted, so there is no partially-initialized
/// state to misread. Diagonal keys are never inserted.
#[derive(Debug, Clone)]
pub struct ResultSet {
    dim: usize,
    cells: BTreeMap<ProbeKey, ProbeOutcome>,
}

impl ResultSet {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            cells: BTreeMap::new(),
        }
    }

    /// Number of nodes (rows/columns of each matrix).
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn record(&mut self, key: ProbeKey, outcome: ProbeOutcome) {
        debug_assert!(key.source != key.target, "no self-to-self probes");
        debug_assert!(key.source < self.dim && key.target < self.dim);
        let previous = self.cells.insert(key, outcome);
        debug_assert!(previous.is_none(), "cell populated twice");
    }

    pub fn get(&self, key: ProbeKey) -> Option<ProbeOutcome> {
        self.cells.get(&key).copied()
    }

    /// Number of populated cells for one (metric, class) matrix.
    pub fn populated(&self, metric: Metric, class: AddrClass) -> usize {
        self.cells
            .keys()
            .filter(|k| k.metric == metric && k.class == class)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_absent_until_recorded() {
        let mut set = ResultSet::new(3);
        let key = ProbeKey {
            source: 0,
            target: 1,
            metric: Metric::Latency,
            class: AddrClass::Public,
        };
        assert_eq!(set.get(key), None);
        set.record(key, ProbeOutcome::Latency { ms: 0.5 });
        assert_eq!(set.get(key), Some(ProbeOutcome::Latency { ms: 0.5 }));
        assert_eq!(set.populated(Metric::Latency, AddrClass::Public), 1);
        assert_eq!(set.populated(Metric::Bandwidth, AddrClass::Public), 0);
    }
}
