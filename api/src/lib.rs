pub mod call;
pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod resource;
pub mod resources;
pub mod response;
pub mod types;

pub use call::{CallSpec, CallSpecBuilder};
pub use client::{AuthMode, XingApi, XingApiBuilder};
pub use config::ApiConfig;
pub use contract::{ContractViolation, MethodDescriptor, ResourceDescriptor, Visibility};
pub use error::{ApiError, ApiResult};
pub use resource::Resource;
pub use resources::{ContactRequestsResource, ProfileMessageResource, ProfileVisitsResource};
pub use response::{FieldError, HttpError, Response};
pub use types::{
    ContactRequest, ContactRequestPage, ContactRequests, ProfileMessage, ProfileMessageEnvelope,
    ProfileVisit, ProfileVisits,
};

pub mod prelude {
    pub use crate::call::*;
    pub use crate::client::*;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::resource::Resource;
    pub use crate::resources::*;
    pub use crate::response::*;
    pub use crate::types::*;
}
