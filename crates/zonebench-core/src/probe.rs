use serde::Deserialize;
use tracing::error;
use zonebench_abstract::{ProbeConfig, ProbeOutcome};

/// iperf3 client invocation against `target`. JSON output so the aggregate
/// send rate can be read structurally.
pub fn bandwidth_command(cfg: &ProbeConfig, target: &str) -> String {
    format!(
        "iperf3 --client {target} --time {} --interval 1 --omit {} --parallel {} --json",
        cfg.bandwidth_secs, cfg.bandwidth_omit_secs, cfg.bandwidth_streams
    )
}

/// sockperf ping-pong invocation against `target`. `--full-rtt` makes the
/// percentile table report round-trip rather than half-trip times.
pub fn latency_command(cfg: &ProbeConfig, target: &str) -> String {
    format!(
        "sockperf ping-pong --tcp --time {} --msg-size {} --mps=max --full-rtt -i {target}",
        cfg.latency_secs, cfg.latency_msg_size
    )
}

#[derive(Deserialize)]
struct IperfReport {
    end: IperfEnd,
}

#[derive(Deserialize)]
struct IperfEnd {
    sum_sent: IperfSum,
}

#[derive(Deserialize)]
struct IperfSum {
    bits_per_second: f64,
}

/// Extract the aggregate send rate from an iperf3 JSON report and convert it
/// to Mbps. Anything that does not deserialize degrades to `Unparsed`.
pub fn parse_bandwidth_report(output: &str) -> ProbeOutcome {
    match serde_json::from_str::<IperfReport>(output) {
        Ok(report) => ProbeOutcome::Bandwidth {
            mbps: report.end.sum_sent.bits_per_second / 1_000_000.0,
        },
        Err(e) => {
            error!("Failed to parse iperf3 output: {e}");
            ProbeOutcome::Unparsed
        }
    }
}

const PERCENTILE_MARKER: &str = "percentile 99.000";

/// Extract the 99th-percentile round-trip time (reported in µs, converted to
/// ms) from sockperf's summary table. A missing or malformed percentile line
/// degrades to `Unparsed`.
pub fn parse_latency_report(output: &str) -> ProbeOutcome {
    let micros = output
        .lines()
        .find(|line| line.contains(PERCENTILE_MARKER))
        .and_then(|line| line.split_whitespace().last())
        .and_then(|token| token.parse::<f64>().ok());

    match micros {
        Some(us) => ProbeOutcome::Latency { ms: us / 1000.0 },
        None => {
            error!("Failed to find '{PERCENTILE_MARKER}' in sockperf output");
            ProbeOutcome::Unparsed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_iperf_report_converts_to_mbps() {
        let json = r#"{"end":{"sum_sent":{"bits_per_second":5000000000}}}"#;
        let outcome = parse_bandwidth_report(json);
        assert_eq!(outcome.to_string(), "5000.00 Mbps");
    }

    #[test]
    fn iperf_report_with_extra_fields_still_parses() {
        let json = r#"{"start":{},"intervals":[],"end":{"sum_sent":{"bytes":1,"bits_per_second":123456789.0},"sum_received":{}}}"#;
        assert_eq!(parse_bandwidth_report(json).to_string(), "123.46 Mbps");
    }

    #[test]
    fn truncated_iperf_output_degrades_to_na() {
        assert_eq!(parse_bandwidth_report("iperf3: error - unable"), ProbeOutcome::Unparsed);
        assert_eq!(parse_bandwidth_report(r#"{"end":{}}"#), ProbeOutcome::Unparsed);
    }

    #[test]
    fn sockperf_percentile_line_converts_to_ms() {
        let output = "\
sockperf: Summary: Round trip is 1234.567 usec
sockperf: ---> <MAX> observation =  5000.000
sockperf: ---> percentile 99.999 =  4000.000
sockperf: ---> percentile 99.000 =  1500.250
sockperf: ---> percentile 50.000 =  1200.000
";
        let outcome = parse_latency_report(output);
        assert_eq!(outcome.to_string(), "1.500 ms");
    }

    #[test]
    fn missing_percentile_line_degrades_to_na() {
        let output = "sockperf: Summary: Round trip is 1234.567 usec\n";
        assert_eq!(parse_latency_report(output), ProbeOutcome::Unparsed);
    }

    #[test]
    fn garbage_percentile_token_degrades_to_na() {
        let output = "sockperf: ---> percentile 99.000 =  not-a-number\n";
        assert_eq!(parse_latency_report(output), ProbeOutcome::Unparsed);
    }

    #[test]
    fn commands_embed_configured_parameters() {
        let cfg = ProbeConfig::default();
        let bw = bandwidth_command(&cfg, "10.0.0.2");
        assert_eq!(
            bw,
            "iperf3 --client 10.0.0.2 --time 10 --interval 1 --omit 1 --parallel 32 --json"
        );
        let lat = latency_command(&cfg, "10.0.0.2");
        assert_eq!(
            lat,
            "sockperf ping-pong --tcp --time 30 --msg-size 1500 --mps=max --full-rtt -i 10.0.0.2"
        );
    }
}
