use std::fmt;

/// Outcome of one probe between an ordered node pair over one address class.
///
/// Parse failures degrade to `Unparsed` rather than propagating; a cell that
/// was never attempted (metric skipped, source unusable) has no outcome at
/// all and is left out of the result set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeOutcome {
    /// Aggregate send rate reported by the throughput test.
    Bandwidth { mbps: f64 },
    /// 99th-percentile round-trip time reported by the ping-pong test.
    Latency { ms: f64 },
    /// The probe ran but its output did not match the expected format.
    Unparsed,
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Bandwidth { mbps } => write!(f, "{mbps:.2} Mbps"),
            ProbeOutcome::Latency { ms } => write!(f, "{ms:.3} ms"),
            ProbeOutcome::Unparsed => write!(f, "N/A"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProbeOutcome;

    #[test]
    fn bandwidth_renders_two_decimals() {
        let cell = ProbeOutcome::Bandwidth { mbps: 5000.0 };
        assert_eq!(cell.to_string(), "5000.00 Mbps");
    }

    #[test]
    fn latency_renders_three_decimals() {
        let cell = ProbeOutcome::Latency { ms: 1.2345 };
        assert_eq!(cell.to_string(), "1.234 ms");
    }

    #[test]
    fn unparsed_renders_na() {
        assert_eq!(ProbeOutcome::Unparsed.to_string(), "N/A");
    }
}
