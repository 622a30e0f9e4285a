use crate::exec::run_captured;
use tracing::info;
use zonebench_abstract::{FleetSpec, Node, TopologyError};
use zonebench_core::{NodeAddresses, TopologyProvider, resolve_nodes};

const VM_IMAGE: &str = "Canonical:ubuntu-24_04-lts:server:latest";

/// Topology provider backed by the logged-in Azure CLI. Every operation is a
/// thin sequential wrapper over one `az` invocation.
pub struct AzCliTopology {
    binary: String,
    resource_group: String,
}

impl AzCliTopology {
    pub fn new(resource_group: impl Into<String>) -> Self {
        Self {
            binary: "az".to_string(),
            resource_group: resource_group.into(),
        }
    }

    /// Fail fast when the CLI is missing or not logged in, before any
    /// provisioning work starts.
    pub fn check_cli(&self) -> Result<(), TopologyError> {
        match self.az(&["account", "show", "--query", "id", "-o", "tsv"]) {
            Ok(_) => Ok(()),
            Err(TopologyError::Provider(_)) => Err(TopologyError::Unavailable(
                "Azure CLI is installed but not logged in. Please run \"az login\".".to_string(),
            )),
            Err(e) => Err(e),
        }
    }

    /// Bring up one VM per zone (skipping machines that already exist) and
    /// resolve the resulting addresses. `az vm create` owns the network
    /// plumbing; this orchestrator only names the pieces.
    pub fn provision(&self, fleet: &FleetSpec) -> Result<Vec<Node>, TopologyError> {
        self.ensure_resource_group(&fleet.location)?;

        for (name, zone) in fleet.node_names().iter().zip(&fleet.zones) {
            if self.vm_exists(name) {
                info!("VM {name} already exists. Skipping creation.");
                continue;
            }
            info!("Creating VM {name} in zone {zone}...");
            self.az(&[
                "vm",
                "create",
                "--resource-group",
                &self.resource_group,
                "--name",
                name,
                "--location",
                &fleet.location,
                "--zone",
                &zone.to_string(),
                "--size",
                &fleet.vm_size,
                "--image",
                VM_IMAGE,
                "--vnet-address-prefix",
                &fleet.network_cidr,
                "--subnet-address-prefix",
                &fleet.network_cidr,
                "--accelerated-networking",
                if fleet.accelerated_networking { "true" } else { "false" },
                "--admin-username",
                &fleet.credentials.username,
                "--admin-password",
                &fleet.credentials.password,
                "--public-ip-sku",
                "Standard",
            ])?;
            info!("VM {name} has been created.");
        }

        resolve_nodes(self, &fleet.node_names())
    }

    /// Start deleting the whole resource group; deletion is not awaited.
    pub fn teardown(&self) -> Result<(), TopologyError> {
        self.az(&[
            "group",
            "delete",
            "--name",
            &self.resource_group,
            "--yes",
            "--no-wait",
        ])?;
        info!(
            "Resource group {} deletion initiated; no need to wait for it to complete.",
            self.resource_group
        );
        Ok(())
    }

    fn ensure_resource_group(&self, location: &str) -> Result<(), TopologyError> {
        let exists = self.az(&["group", "exists", "--name", &self.resource_group])?;
        if exists.trim() != "true" {
            self.az(&[
                "group",
                "create",
                "--name",
                &self.resource_group,
                "--location",
                location,
            ])?;
            info!("Resource group {} has been created.", self.resource_group);
        }
        Ok(())
    }

    fn vm_exists(&self, name: &str) -> bool {
        self.az(&[
            "vm",
            "show",
            "--resource-group",
            &self.resource_group,
            "--name",
            name,
        ])
        .is_ok()
    }

    fn query_ip(&self, name: &str, field: &str) -> Result<Option<String>, TopologyError> {
        let out = self
            .az(&[
                "vm",
                "show",
                "-d",
                "--resource-group",
                &self.resource_group,
                "--name",
                name,
                "--query",
                field,
                "-o",
                "tsv",
            ])
            .map_err(|e| match e {
                TopologyError::Provider(msg) if msg.contains("ResourceNotFound") => {
                    TopologyError::EndpointNotFound(name.to_string())
                }
                other => other,
            })?;
        let ip = out.trim();
        Ok(if ip.is_empty() {
            None
        } else {
            Some(ip.to_string())
        })
    }

    fn az(&self, args: &[&str]) -> Result<String, TopologyError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let output = run_captured(&self.binary, &args)
            .map_err(|e| TopologyError::Unavailable(format!("failed to run {}: {e}", self.binary)))?;
        if !output.success() {
            return Err(TopologyError::Provider(format!(
                "az {} exited {}: {}",
                args.first().map(String::as_str).unwrap_or(""),
                output.exit_status,
                output.stderr.trim()
            )));
        }
        Ok(output.stdout)
    }
}

impl TopologyProvider for AzCliTopology {
    fn addresses(&self, node_name: &str) -> Result<NodeAddresses, TopologyError> {
        Ok(NodeAddresses {
            public: self.query_ip(node_name, "publicIps")?,
            private: self.query_ip(node_name, "privateIps")?,
        })
    }
}
