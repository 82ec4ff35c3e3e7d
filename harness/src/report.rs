use serde::Serialize;
use thiserror::Error;
use xing_api::contract::{self, ContractViolation};
use xing_api::{ResourceDescriptor, Visibility};

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Unknown resource: {name}")]
    UnknownResource { name: String },

    #[error("{count} resource(s) violate the contract")]
    ContractViolations { count: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct MethodReport {
    pub name: &'static str,
    pub public: bool,
    pub return_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ResourceReport {
    pub name: &'static str,
    pub sealed: bool,
    pub methods: Vec<MethodReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<String>,
}

impl From<&ResourceDescriptor> for ResourceReport {
    fn from(descriptor: &ResourceDescriptor) -> Self {
        Self {
            name: descriptor.name,
            sealed: descriptor.sealed,
            methods: descriptor
                .methods
                .iter()
                .map(|method| MethodReport {
                    name: method.name,
                    public: method.visibility == Visibility::Public,
                    return_type: method.return_type,
                })
                .collect(),
            violation: contract::validate_descriptor(descriptor)
                .err()
                .map(|violation| violation.to_string()),
        }
    }
}

/// Looks a resource up by name. `contact_requests`, `ContactRequests` and
/// `ContactRequestsResource` all match the same resource.
pub fn find_resource<'a>(
    descriptors: &'a [ResourceDescriptor],
    name: &str,
) -> Option<&'a ResourceDescriptor> {
    let wanted = normalize(name);
    descriptors.iter().find(|descriptor| {
        let candidate = normalize(descriptor.name);
        candidate == wanted || candidate.strip_suffix("resource") == Some(wanted.as_str())
    })
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Validates `descriptors`, returning the failures.
pub fn violations(
    descriptors: &[ResourceDescriptor],
) -> Vec<(&'static str, ContractViolation)> {
    contract::validate_all(descriptors)
        .into_iter()
        .filter_map(|(name, result)| result.err().map(|violation| (name, violation)))
        .collect()
}
