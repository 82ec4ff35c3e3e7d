use crate::resource::resource;
use crate::response::HttpError;
use crate::types::ContactRequests;
use reqwest::Method;

resource! {
    /// Incoming contact requests of a user.
    pub struct ContactRequestsResource;

    /// Lists contact requests the user has received, newest first.
    pub fn list_contact_requests(
        &self,
        user_id: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> CallSpec<ContactRequests, HttpError> {
        self.api
            .spec(Method::GET, "/v1/users/{user_id}/contact_requests")
            .path_param("user_id", user_id)
            .query_param_opt("limit", limit)
            .query_param_opt("offset", offset)
            .build()
    }

    /// Sends a contact request to `user_id`, optionally with a personal message.
    pub fn send_contact_request(
        &self,
        user_id: &str,
        message: Option<&str>,
    ) -> CallSpec<(), HttpError> {
        let spec = self
            .api
            .spec(Method::POST, "/v1/users/{user_id}/contact_requests")
            .path_param("user_id", user_id);
        match message {
            Some(message) => spec.form_field("message", message).build_void(),
            None => spec.build_void(),
        }
    }

    pub fn accept_contact_request(
        &self,
        user_id: &str,
        sender_id: &str,
    ) -> CallSpec<(), HttpError> {
        self.api
            .spec(Method::PUT, "/v1/users/{user_id}/contact_requests/{sender_id}/accept")
            .path_param("user_id", user_id)
            .path_param("sender_id", sender_id)
            .build_void()
    }

    pub fn decline_contact_request(
        &self,
        user_id: &str,
        sender_id: &str,
    ) -> CallSpec<(), HttpError> {
        self.api
            .spec(Method::DELETE, "/v1/users/{user_id}/contact_requests/{sender_id}")
            .path_param("user_id", user_id)
            .path_param("sender_id", sender_id)
            .build_void()
    }
}
