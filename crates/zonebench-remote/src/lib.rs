mod azcli;
mod exec;
mod ping;
mod ssh;

pub use azcli::AzCliTopology;
pub use ping::IcmpPing;
pub use ssh::SshFactory;
