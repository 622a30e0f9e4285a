use serde::{Deserialize, Serialize};

/// A compute endpoint under test. Addresses are resolved once per run and
/// stay fixed for the node's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub public_ip: Option<String>,
    pub private_ip: Option<String>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            public_ip: None,
            private_ip: None,
        }
    }

    /// Address of the given class, if it was resolved.
    pub fn address(&self, class: AddrClass) -> Option<&str> {
        match class {
            AddrClass::Public => self.public_ip.as_deref(),
            AddrClass::Private => self.private_ip.as_deref(),
        }
    }
}

/// Which of a node's two addresses a probe targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddrClass {
    Public,
    Private,
}

impl AddrClass {
    pub fn label(&self) -> &'static str {
        match self {
            AddrClass::Public => "Public IP",
            AddrClass::Private => "Private IP",
        }
    }
}

/// The two measurements taken per ordered node pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Bandwidth,
    Latency,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Bandwidth => "Bandwidth",
            Metric::Latency => "Latency",
        }
    }
}
