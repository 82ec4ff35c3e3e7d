mod contact_requests;
mod profile_message;
mod profile_visits;

pub use contact_requests::ContactRequestsResource;
pub use profile_message::ProfileMessageResource;
pub use profile_visits::ProfileVisitsResource;

use crate::contract::ResourceDescriptor;
use crate::resource::Resource;

/// Descriptors of every resource this crate defines.
pub fn descriptors() -> Vec<ResourceDescriptor> {
    vec![
        ContactRequestsResource::descriptor(),
        ProfileMessageResource::descriptor(),
        ProfileVisitsResource::descriptor(),
    ]
}
