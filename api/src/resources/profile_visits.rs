use crate::resource::resource;
use crate::response::HttpError;
use crate::types::ProfileVisits;
use reqwest::Method;

resource! {
    /// Who looked at a profile, and leaving a visit on someone else's.
    pub struct ProfileVisitsResource;

    pub fn list_profile_visits(
        &self,
        user_id: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> CallSpec<ProfileVisits, HttpError> {
        self.api
            .spec(Method::GET, "/v1/users/{user_id}/visits")
            .path_param("user_id", user_id)
            .query_param_opt("limit", limit)
            .query_param_opt("offset", offset)
            .build()
    }

    /// Records that the current user visited `user_id`'s profile.
    pub fn create_profile_visit(&self, user_id: &str) -> CallSpec<(), HttpError> {
        self.api
            .spec(Method::POST, "/v1/users/{user_id}/visits")
            .path_param("user_id", user_id)
            .build_void()
    }
}
