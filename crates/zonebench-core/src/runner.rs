use crate::channel::{CommandChannel, SessionFactory};
use crate::probe::{
    bandwidth_command, latency_command, parse_bandwidth_report, parse_latency_report,
};
use crate::results::{ProbeKey, ResultSet};
use tracing::{error, info};
use zonebench_abstract::{AddrClass, Metric, Node, ProbeConfig, ProbeOutcome};

/// Run every enabled probe for every ordered pair of distinct nodes.
///
/// One session per node, bound to its public address and reused for all
/// probes with that node as source. A node whose session cannot be
/// established is logged and excluded as a source (its row stays blank); it
/// remains a probe target for everyone else. Individual probe failures
/// degrade to `N/A` cells; nothing here aborts the run.
pub fn run_all(
    nodes: &[Node],
    factory: &dyn SessionFactory,
    cfg: &ProbeConfig,
    skip_bandwidth: bool,
    skip_latency: bool,
) -> ResultSet {
    let mut sessions: Vec<Option<Box<dyn CommandChannel>>> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if node.public_ip.is_none() {
            error!("No public address for {}; excluding it as a probe source", node.name);
            sessions.push(None);
            continue;
        }
        match factory.connect(node) {
            Ok(session) => sessions.push(Some(session)),
            Err(e) => {
                error!("Failed to open session to {}: {e}", node.name);
                sessions.push(None);
            }
        }
    }

    let mut results = ResultSet::new(nodes.len());

    for (i, source) in nodes.iter().enumerate() {
        let Some(session) = sessions[i].as_mut() else {
            continue;
        };
        for (j, target) in nodes.iter().enumerate() {
            if i == j {
                continue;
            }
            // Fixed order: bandwidth public/private, then latency
            // public/private. The session serializes commands, so probes on
            // one source never overlap.
            if !skip_bandwidth {
                for class in [AddrClass::Public, AddrClass::Private] {
                    info!(
                        "Running Bandwidth test from {} to {} via {}",
                        source.name,
                        target.name,
                        class.label()
                    );
                    let outcome = probe_target(session.as_mut(), cfg, target, Metric::Bandwidth, class);
                    results.record(key(i, j, Metric::Bandwidth, class), outcome);
                }
            }
            if !skip_latency {
                for class in [AddrClass::Public, AddrClass::Private] {
                    info!(
                        "Running Latency   test from {} to {} via {}",
                        source.name,
                        target.name,
                        class.label()
                    );
                    let outcome = probe_target(session.as_mut(), cfg, target, Metric::Latency, class);
                    results.record(key(i, j, Metric::Latency, class), outcome);
                }
            }
        }
    }

    results
}

fn key(source: usize, target: usize, metric: Metric, class: AddrClass) -> ProbeKey {
    ProbeKey {
        source,
        target,
        metric,
        class,
    }
}

fn probe_target(
    session: &mut dyn CommandChannel,
    cfg: &ProbeConfig,
    target: &Node,
    metric: Metric,
    class: AddrClass,
) -> ProbeOutcome {
    let Some(address) = target.address(class) else {
        error!(
            "No {} for target {}; recording N/A",
            class.label(),
            target.name
        );
        return ProbeOutcome::Unparsed;
    };

    let command = match metric {
        Metric::Bandwidth => bandwidth_command(cfg, address),
        Metric::Latency => latency_command(cfg, address),
    };

    match session.run(&command) {
        Ok(output) => match metric {
            Metric::Bandwidth => parse_bandwidth_report(&output.stdout),
            Metric::Latency => parse_latency_report(&output.stdout),
        },
        Err(e) => {
            error!("{} probe to {} failed: {e}", metric.label(), target.name);
            ProbeOutcome::Unparsed
        }
    }
}
