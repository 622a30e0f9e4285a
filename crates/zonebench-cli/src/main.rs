use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use zonebench_abstract::{
    AddrClass, Credentials, FleetOverride, FleetSpec, Metric, Node, ProbeConfig, ReadinessConfig,
};
use zonebench_core::{ResultSet, report, resolve_nodes, run_all, wait_until_ready};
use zonebench_remote::{AzCliTopology, IcmpPing, SshFactory};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Pairwise latency/bandwidth benchmark across an availability-zone VM fleet"
)]
struct Args {
    /// Resource group holding (or to hold) the fleet.
    #[arg(long)]
    resource_group_name: String,

    /// Region the fleet lives in.
    #[arg(long, default_value = "southeastasia")]
    location: String,

    /// VM size for every node.
    #[arg(long, default_value = "Standard_D8lds_v5")]
    vm_type: String,

    /// Address space for the fleet's network.
    #[arg(long, default_value = "192.168.100.0/24")]
    network_cidr: String,

    /// Availability zones; one node per zone.
    #[arg(long, value_delimiter = ',', default_values_t = [1, 2, 3])]
    zones: Vec<u8>,

    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    enable_accelerated_networking: bool,

    /// Admin username for the fleet.
    #[arg(long, default_value = "repairman")]
    admin_username: String,

    /// Admin password for the fleet.
    #[arg(long, default_value = "f5Q7tjAa2XheJE8NqDRnMP")]
    admin_password: String,

    /// TOML file of fleet overrides applied over the flags.
    #[arg(long)]
    fleet: Option<PathBuf>,

    /// Run benchmarks against an already-provisioned fleet (setup skipped).
    #[arg(long, default_value_t = false)]
    run: bool,

    /// Print node addresses and login details, then exit.
    #[arg(long, default_value_t = false)]
    show_info: bool,

    /// Start deleting the resource group, then exit.
    #[arg(long, default_value_t = false)]
    force_delete: bool,

    #[arg(long, default_value_t = false)]
    skip_bandwidth_test: bool,

    #[arg(long, default_value_t = false)]
    skip_latency_test: bool,
}

fn main() -> Result<()> {
    if std::env::args().len() == 1 {
        Args::command().print_help()?;
        std::process::exit(1);
    }
    let args = Args::parse();
    tracing_subscriber::fmt::init();
    info!("zonebench starting...");

    let topology = AzCliTopology::new(&args.resource_group_name);
    topology.check_cli()?;

    if args.force_delete {
        topology.teardown()?;
        return Ok(());
    }

    let fleet = args.fleet_spec()?;

    if args.show_info {
        return show_info(&topology, &fleet);
    }

    if args.run {
        let nodes = resolve_nodes(&topology, &fleet.node_names())?;
        let results = benchmark(&args, &nodes, &fleet, true);
        print_matrices(&results, &nodes);
        return Ok(());
    }

    let nodes = topology.provision(&fleet)?;

    info!("All VMs created. Checking network reachability...");
    let public_ips: Vec<String> = nodes.iter().filter_map(|n| n.public_ip.clone()).collect();
    wait_until_ready(&IcmpPing::new(), &public_ips, &ReadinessConfig::default());

    let results = benchmark(&args, &nodes, &fleet, false);
    print_matrices(&results, &nodes);
    info!("Location: {}", fleet.location);
    Ok(())
}

fn benchmark(args: &Args, nodes: &[Node], fleet: &FleetSpec, skip_setup: bool) -> ResultSet {
    let factory = SshFactory::new(fleet.credentials.clone(), skip_setup);
    run_all(
        nodes,
        &factory,
        &ProbeConfig::default(),
        args.skip_bandwidth_test,
        args.skip_latency_test,
    )
}

fn print_matrices(results: &ResultSet, nodes: &[Node]) {
    let names: Vec<String> = nodes.iter().map(|n| n.name.clone()).collect();
    for metric in [Metric::Latency, Metric::Bandwidth] {
        for class in [AddrClass::Public, AddrClass::Private] {
            println!("{}:", report::title(metric, class));
            print!("{}", report::render(results, metric, class, &names));
            println!();
        }
    }
}

fn show_info(topology: &AzCliTopology, fleet: &FleetSpec) -> Result<()> {
    let nodes = resolve_nodes(topology, &fleet.node_names())?;
    let creds = &fleet.credentials;
    for node in &nodes {
        let ip = node.public_ip.as_deref().unwrap_or("-");
        info!(
            "VM Name: {}, IP: {}, Username: {}, Password: {}",
            node.name, ip, creds.username, creds.password
        );
        info!(
            "To login {} with one command: expect -c 'spawn ssh {}@{}; expect \"password:\"; send \"{}\\r\"; interact'",
            node.name, creds.username, ip, creds.password
        );
    }
    Ok(())
}

impl Args {
    fn fleet_spec(&self) -> Result<FleetSpec> {
        let mut spec = FleetSpec {
            location: self.location.clone(),
            vm_size: self.vm_type.clone(),
            network_cidr: self.network_cidr.clone(),
            zones: self.zones.clone(),
            accelerated_networking: self.enable_accelerated_networking,
            credentials: Credentials::new(&self.admin_username, &self.admin_password),
        };
        if let Some(path) = &self.fleet {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read fleet file {}", path.display()))?;
            let over: FleetOverride =
                toml::from_str(&text).context("Fleet file is not valid TOML")?;
            over.apply_to(&mut spec);
        }
        Ok(spec)
    }
}
