//! Structural contract every resource must satisfy.
//!
//! 1. The resource must be sealed (not implementable outside this crate).
//! 2. Every public method must return a [`CallSpec`].
//!
//! Generic arguments are not compared: `CallSpec<ProfileVisits, HttpError>`
//! and `CallSpec<(), HttpError>` both satisfy rule 2, a `String` does not.

use crate::call::CallSpec;
use crate::resource::Resource;
use std::any::type_name;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: &'static str,
    pub visibility: Visibility,
    pub return_type: &'static str,
}

impl MethodDescriptor {
    pub fn returning<T: ?Sized>(name: &'static str, visibility: Visibility) -> Self {
        Self {
            name,
            visibility,
            return_type: type_name::<T>(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub name: &'static str,
    pub sealed: bool,
    pub methods: Vec<MethodDescriptor>,
}

impl ResourceDescriptor {
    pub fn sealed(name: &'static str) -> Self {
        Self {
            name,
            sealed: true,
            methods: Vec::new(),
        }
    }

    pub fn open(name: &'static str) -> Self {
        Self {
            name,
            sealed: false,
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    pub fn public_methods(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods
            .iter()
            .filter(|method| method.visibility == Visibility::Public)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("Resource should be final: {resource} is not sealed")]
    NotFinal { resource: &'static str },

    #[error("{resource}::{method} must return {expected}, but returns {actual}")]
    ReturnTypeMismatch {
        resource: &'static str,
        method: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Path of the call spec type with generic arguments stripped.
pub fn call_spec_type() -> &'static str {
    erase_generics(type_name::<CallSpec<(), ()>>())
}

fn erase_generics(type_name: &str) -> &str {
    type_name
        .split_once('<')
        .map_or(type_name, |(base, _)| base)
        .trim()
}

/// Checks `descriptor` and returns the first violation found.
pub fn validate_descriptor(descriptor: &ResourceDescriptor) -> Result<(), ContractViolation> {
    if !descriptor.sealed {
        warn!("Resource {} is not sealed", descriptor.name);
        return Err(ContractViolation::NotFinal {
            resource: descriptor.name,
        });
    }

    let expected = call_spec_type();
    for method in descriptor.public_methods() {
        if erase_generics(method.return_type) != expected {
            warn!(
                "{}::{} returns {} instead of a call spec",
                descriptor.name, method.name, method.return_type
            );
            return Err(ContractViolation::ReturnTypeMismatch {
                resource: descriptor.name,
                method: method.name,
                expected,
                actual: method.return_type,
            });
        }
    }

    debug!(
        "Resource {} satisfies the contract ({} public methods)",
        descriptor.name,
        descriptor.public_methods().count()
    );
    Ok(())
}

pub fn validate<R: Resource>() -> Result<(), ContractViolation> {
    validate_descriptor(&R::descriptor())
}

/// Validates every descriptor, keeping each result next to its resource name.
pub fn validate_all(
    descriptors: &[ResourceDescriptor],
) -> Vec<(&'static str, Result<(), ContractViolation>)> {
    descriptors
        .iter()
        .map(|descriptor| (descriptor.name, validate_descriptor(descriptor)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{self, ContactRequestsResource, ProfileVisitsResource};
    use crate::response::HttpError;

    fn example() -> ResourceDescriptor {
        ResourceDescriptor::sealed("Example").with_method(MethodDescriptor::returning::<
            CallSpec<String, HttpError>,
        >("fetch", Visibility::Public))
    }

    #[test]
    fn test_sealed_resource_with_call_spec_methods_passes() {
        assert_eq!(validate_descriptor(&example()), Ok(()));
    }

    #[test]
    fn test_open_resource_fails_finality_rule() {
        let descriptor = ResourceDescriptor::open("BadExample").with_method(
            MethodDescriptor::returning::<CallSpec<(), HttpError>>("fetch", Visibility::Public),
        );

        let violation = validate_descriptor(&descriptor).unwrap_err();
        assert_eq!(
            violation,
            ContractViolation::NotFinal {
                resource: "BadExample"
            }
        );
        assert!(violation.to_string().contains("Resource should be final"));
    }

    #[test]
    fn test_public_method_with_wrong_return_type_fails() {
        let descriptor = ResourceDescriptor::sealed("WrongReturn").with_method(
            MethodDescriptor::returning::<String>("fetch", Visibility::Public),
        );

        let violation = validate_descriptor(&descriptor).unwrap_err();
        match &violation {
            ContractViolation::ReturnTypeMismatch {
                resource,
                method,
                expected,
                actual,
            } => {
                assert_eq!(*resource, "WrongReturn");
                assert_eq!(*method, "fetch");
                assert!(expected.ends_with("CallSpec"));
                assert!(actual.ends_with("String"));
            }
            other => panic!("unexpected violation: {:?}", other),
        }
        assert!(violation.to_string().contains("WrongReturn::fetch must return"));
    }

    #[test]
    fn test_private_methods_are_not_checked() {
        let descriptor = example()
            .with_method(MethodDescriptor::returning::<String>("helper", Visibility::Private));
        assert!(validate_descriptor(&descriptor).is_ok());
    }

    #[test]
    fn test_lookalike_type_is_rejected() {
        mod other {
            #[allow(dead_code)]
            pub struct CallSpec<T>(pub T);
        }

        let descriptor = ResourceDescriptor::sealed("Lookalike").with_method(
            MethodDescriptor::returning::<other::CallSpec<()>>("fetch", Visibility::Public),
        );
        assert!(matches!(
            validate_descriptor(&descriptor),
            Err(ContractViolation::ReturnTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_first_violation_wins() {
        let descriptor = ResourceDescriptor::sealed("Twice")
            .with_method(MethodDescriptor::returning::<u32>("first", Visibility::Public))
            .with_method(MethodDescriptor::returning::<bool>("second", Visibility::Public));

        match validate_descriptor(&descriptor) {
            Err(ContractViolation::ReturnTypeMismatch { method, .. }) => {
                assert_eq!(method, "first")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_sealed_resource_passes() {
        assert!(validate_descriptor(&ResourceDescriptor::sealed("Empty")).is_ok());
    }

    #[test]
    fn test_generated_descriptors_record_declared_types() {
        let descriptor = ContactRequestsResource::descriptor();
        assert_eq!(descriptor.name, "ContactRequestsResource");
        assert!(descriptor.sealed);

        let names: Vec<_> = descriptor.methods.iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            vec![
                "list_contact_requests",
                "send_contact_request",
                "accept_contact_request",
                "decline_contact_request",
            ]
        );
        assert!(descriptor.methods[0].return_type.contains("ContactRequests"));
        assert!(validate::<ProfileVisitsResource>().is_ok());
    }

    #[test]
    fn test_all_registered_resources_satisfy_contract() {
        let results = validate_all(&resources::descriptors());
        assert_eq!(results.len(), 3);
        for (name, result) in results {
            assert!(result.is_ok(), "{} violates the contract: {:?}", name, result);
        }
    }
}
