use crate::mock_server::{MockResponse, MockServer};
use tracing::debug;
use xing_api::contract;
use xing_api::{CallSpec, HttpError, Resource, ResourceDescriptor, XingApi};

/// Panics with the first contract violation of `descriptor`, if any.
pub fn assert_resource_contract(descriptor: &ResourceDescriptor) {
    if let Err(violation) = contract::validate_descriptor(descriptor) {
        panic!("{}", violation);
    }
}

/// Per-test fixture for a resource: a validated resource handle bound to a
/// logged-out client that talks to a fresh [`MockServer`].
///
/// ```no_run
/// use xing_api::ProfileVisitsResource;
/// use xing_api_testing::ResourceTestCase;
///
/// # async fn run() {
/// let case = ResourceTestCase::<ProfileVisitsResource>::setup().await;
/// case.assert_void_spec(case.resource.create_profile_visit("123_abc")).await;
/// # }
/// ```
pub struct ResourceTestCase<R: Resource> {
    pub server: MockServer,
    pub api: XingApi,
    pub resource: R,
}

impl<R: Resource> ResourceTestCase<R> {
    /// Validates `R` before anything else; a violation panics and the test
    /// body never runs.
    pub async fn setup() -> Self {
        let descriptor = R::descriptor();
        assert_resource_contract(&descriptor);

        let server = MockServer::start()
            .await
            .unwrap_or_else(|err| panic!("Failed to start mock server: {}", err));
        let api = XingApi::builder()
            .api_endpoint(server.url("/"))
            .logged_out()
            .build()
            .unwrap_or_else(|err| panic!("Failed to build API client: {}", err));
        let resource = api.resource::<R>();

        debug!("Set up {} against {}", descriptor.name, server.url("/"));
        Self {
            server,
            api,
            resource,
        }
    }

    /// Asserts that `spec` treats `204 No Content` as success without a body.
    pub async fn assert_void_spec(&self, spec: CallSpec<(), HttpError>) {
        self.server.enqueue(MockResponse::new().with_status(204));

        let response = spec
            .execute()
            .await
            .unwrap_or_else(|err| panic!("Executing void spec failed: {}", err));

        assert!(
            response.is_success(),
            "Expected a successful response, got {}",
            response.code()
        );
        assert!(
            response.body().is_none(),
            "Expected no body for a {} response",
            response.code()
        );
    }
}
