use crate::config::Credentials;
use serde::{Deserialize, Serialize};

/// Everything the topology provider needs to bring up the fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetSpec {
    /// Cloud region the fleet lives in.
    pub location: String,
    /// VM size for every node.
    pub vm_size: String,
    /// Address space for the shared network.
    pub network_cidr: String,
    /// Availability zones; one node is placed in each.
    pub zones: Vec<u8>,
    pub accelerated_networking: bool,
    pub credentials: Credentials,
}

impl FleetSpec {
    /// Node names are derived from zone numbers so repeat invocations find
    /// the same machines.
    pub fn node_names(&self) -> Vec<String> {
        self.zones.iter().map(|z| format!("azping-vm{z}")).collect()
    }
}

/// Per-field overrides loaded from a TOML file, applied over the
/// flag-derived spec.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FleetOverride {
    pub location: Option<String>,
    pub vm_size: Option<String>,
    pub network_cidr: Option<String>,
    pub zones: Option<Vec<u8>>,
    pub accelerated_networking: Option<bool>,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl FleetOverride {
    pub fn apply_to(&self, spec: &mut FleetSpec) {
        if let Some(v) = &self.location {
            spec.location = v.clone();
        }
        if let Some(v) = &self.vm_size {
            spec.vm_size = v.clone();
        }
        if let Some(v) = &self.network_cidr {
            spec.network_cidr = v.clone();
        }
        if let Some(v) = &self.zones {
            spec.zones = v.clone();
        }
        if let Some(v) = self.accelerated_networking {
            spec.accelerated_networking = v;
        }
        if let Some(v) = &self.admin_username {
            spec.credentials.username = v.clone();
        }
        if let Some(v) = &self.admin_password {
            spec.credentials.password = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_spec() -> FleetSpec {
        FleetSpec {
            location: "southeastasia".to_string(),
            vm_size: "Standard_D8lds_v5".to_string(),
            network_cidr: "192.168.100.0/24".to_string(),
            zones: vec![1, 2, 3],
            accelerated_networking: true,
            credentials: Credentials::new("repairman", "secret"),
        }
    }

    #[test]
    fn node_names_follow_zones() {
        let spec = base_spec();
        assert_eq!(
            spec.node_names(),
            vec!["azping-vm1", "azping-vm2", "azping-vm3"]
        );
    }

    #[test]
    fn override_only_touches_present_fields() {
        let mut spec = base_spec();
        let over = FleetOverride {
            location: Some("westeurope".to_string()),
            zones: Some(vec![1, 2]),
            ..Default::default()
        };
        over.apply_to(&mut spec);
        assert_eq!(spec.location, "westeurope");
        assert_eq!(spec.zones, vec![1, 2]);
        assert_eq!(spec.vm_size, "Standard_D8lds_v5");
        assert_eq!(spec.credentials.username, "repairman");
    }
}
