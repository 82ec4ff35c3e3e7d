mod report;

use clap::{Parser, Subcommand};
use report::{find_resource, violations, HarnessError, ResourceReport};
use tracing::{error, info};
use xing_api::ResourceDescriptor;

#[derive(Parser)]
#[command(name = "api-harness")]
#[command(about = "Inspect xing-api resources and check their contract")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List resources and their methods
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check that resources are sealed and only expose call specs
    Validate {
        /// Only validate this resource
        #[arg(short, long)]
        resource: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let descriptors = xing_api::resources::descriptors();

    match cli.command {
        Commands::List { json } => list_resources(&descriptors, json)?,
        Commands::Validate { resource } => validate_resources(&descriptors, resource.as_deref())?,
    }

    Ok(())
}

fn list_resources(descriptors: &[ResourceDescriptor], json: bool) -> Result<(), HarnessError> {
    let reports: Vec<ResourceReport> = descriptors.iter().map(ResourceReport::from).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        println!("{}{}", report.name, if report.sealed { "" } else { " (open)" });
        for method in &report.methods {
            let marker = if method.public { "pub " } else { "" };
            println!("  {}fn {}() -> {}", marker, method.name, method.return_type);
        }
    }
    Ok(())
}

fn validate_resources(
    descriptors: &[ResourceDescriptor],
    resource: Option<&str>,
) -> Result<(), HarnessError> {
    let selected: Vec<ResourceDescriptor> = match resource {
        Some(name) => {
            let descriptor =
                find_resource(descriptors, name).ok_or_else(|| HarnessError::UnknownResource {
                    name: name.to_string(),
                })?;
            vec![descriptor.clone()]
        }
        None => descriptors.to_vec(),
    };

    let failures = violations(&selected);
    for descriptor in &selected {
        if !failures.iter().any(|(name, _)| *name == descriptor.name) {
            println!("ok    {}", descriptor.name);
        }
    }
    for (name, violation) in &failures {
        error!("{} violates the resource contract", name);
        println!("FAIL  {}: {}", name, violation);
    }

    if failures.is_empty() {
        info!("{} resource(s) satisfy the contract", selected.len());
        Ok(())
    } else {
        Err(HarnessError::ContractViolations {
            count: failures.len(),
        })
    }
}
