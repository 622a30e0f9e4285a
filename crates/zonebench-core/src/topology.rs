use tracing::{error, info};
use zonebench_abstract::{Node, TopologyError};

/// Addresses the provider knows for one node. Either side may be missing
/// (e.g. a VM without a public IP).
#[derive(Debug, Clone, Default)]
pub struct NodeAddresses {
    pub public: Option<String>,
    pub private: Option<String>,
}

/// Read-only view of the provisioned topology. Provisioning itself is a
/// provider capability the orchestrator never inspects.
pub trait TopologyProvider {
    /// Fails with `TopologyError::EndpointNotFound` when no network
    /// interface or address exists for the name.
    fn addresses(&self, node_name: &str) -> Result<NodeAddresses, TopologyError>;
}

/// Resolve every logical name to a `Node`, querying the provider exactly once
/// per name. Addresses are fixed for the life of the fleet, so the runner
/// works off this cache instead of re-querying per probe.
///
/// A name the provider cannot resolve is logged and kept as an addressless
/// node: the runner will exclude it as a probe source, and probes targeting
/// it degrade to N/A. Provider failures other than `EndpointNotFound`
/// propagate.
pub fn resolve_nodes(
    provider: &dyn TopologyProvider,
    names: &[String],
) -> Result<Vec<Node>, TopologyError> {
    let mut nodes = Vec::with_capacity(names.len());
    for name in names {
        let addrs = match provider.addresses(name) {
            Ok(addrs) => addrs,
            Err(e @ TopologyError::EndpointNotFound(_)) => {
                error!("{e}; excluding it as a probe source");
                nodes.push(Node::new(name.clone()));
                continue;
            }
            Err(e) => return Err(e),
        };
        info!(
            "Resolved {}: public={} private={}",
            name,
            addrs.public.as_deref().unwrap_or("-"),
            addrs.private.as_deref().unwrap_or("-")
        );
        nodes.push(Node {
            name: name.clone(),
            public_ip: addrs.public,
            private_ip: addrs.private,
        });
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct MapProvider {
        map: HashMap<String, NodeAddresses>,
        queries: RefCell<Vec<String>>,
    }

    impl TopologyProvider for MapProvider {
        fn addresses(&self, node_name: &str) -> Result<NodeAddresses, TopologyError> {
            self.queries.borrow_mut().push(node_name.to_string());
            self.map
                .get(node_name)
                .cloned()
                .ok_or_else(|| TopologyError::EndpointNotFound(node_name.to_string()))
        }
    }

    fn provider_with(entries: &[(&str, Option<&str>, Option<&str>)]) -> MapProvider {
        let map = entries
            .iter()
            .map(|(name, public, private)| {
                (
                    name.to_string(),
                    NodeAddresses {
                        public: public.map(str::to_string),
                        private: private.map(str::to_string),
                    },
                )
            })
            .collect();
        MapProvider {
            map,
            queries: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn resolves_each_name_exactly_once() {
        let provider = provider_with(&[
            ("vm1", Some("1.1.1.1"), Some("10.0.0.1")),
            ("vm2", Some("1.1.1.2"), Some("10.0.0.2")),
        ]);
        let names = vec!["vm1".to_string(), "vm2".to_string()];
        let nodes = resolve_nodes(&provider, &names).unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].public_ip.as_deref(), Some("1.1.1.1"));
        assert_eq!(nodes[1].private_ip.as_deref(), Some("10.0.0.2"));
        assert_eq!(*provider.queries.borrow(), names);
    }

    #[test]
    fn unknown_node_is_kept_addressless() {
        let provider = provider_with(&[("vm1", Some("1.1.1.1"), Some("10.0.0.1"))]);
        let names = vec!["vm1".to_string(), "ghost".to_string()];
        let nodes = resolve_nodes(&provider, &names).unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].name, "ghost");
        assert!(nodes[1].public_ip.is_none());
        assert!(nodes[1].private_ip.is_none());
    }

    #[test]
    fn non_lookup_provider_failures_propagate() {
        struct BrokenProvider;
        impl TopologyProvider for BrokenProvider {
            fn addresses(&self, _: &str) -> Result<NodeAddresses, TopologyError> {
                Err(TopologyError::Provider("az exited 1".to_string()))
            }
        }
        let err = resolve_nodes(&BrokenProvider, &["vm1".to_string()]).unwrap_err();
        assert!(matches!(err, TopologyError::Provider(_)));
    }

    #[test]
    fn private_only_node_still_resolves() {
        let provider = provider_with(&[("inner", None, Some("10.0.0.9"))]);
        let nodes = resolve_nodes(&provider, &["inner".to_string()]).unwrap();
        assert!(nodes[0].public_ip.is_none());
        assert_eq!(nodes[0].private_ip.as_deref(), Some("10.0.0.9"));
    }
}
