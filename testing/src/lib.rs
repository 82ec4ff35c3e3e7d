//! Test scaffolding for `xing-api` resources.
//!
//! [`ResourceTestCase`] validates a resource's contract, starts a
//! [`MockServer`] and binds the resource to a logged-out client pointed at it.

pub mod mock_server;
pub mod test_case;

pub use mock_server::{MockResponse, MockServer, MockServerError, RecordedRequest};
pub use test_case::{assert_resource_contract, ResourceTestCase};
