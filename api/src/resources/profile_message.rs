use crate::resource::resource;
use crate::response::HttpError;
use crate::types::ProfileMessageEnvelope;
use reqwest::Method;

resource! {
    /// The short status message shown on a user's profile.
    pub struct ProfileMessageResource;

    pub fn get_profile_message(&self, user_id: &str) -> CallSpec<ProfileMessageEnvelope, HttpError> {
        self.api
            .spec(Method::GET, "/v1/users/{user_id}/profile_message")
            .path_param("user_id", user_id)
            .build()
    }

    /// Replaces the current user's profile message. `public` controls
    /// whether users outside the network can see it.
    pub fn update_profile_message(&self, message: &str, public: bool) -> CallSpec<(), HttpError> {
        self.api
            .spec(Method::PUT, "/v1/users/me/profile_message")
            .form_field("message", message)
            .form_field("public", public)
            .build_void()
    }
}
