//! Location directory endpoints.

use joldosh_shared::Location;

use crate::error::ApiError;
use crate::http::ApiClient;

/// All active locations, optionally filtered by a search string.
pub async fn list(api: &ApiClient, search: Option<&str>) -> Result<Vec<Location>, ApiError> {
    let lang = api.session().language();
    let mut query: Vec<(&str, &str)> = vec![("lang", lang.as_str())];
    if let Some(search) = search {
        query.push(("search", search));
    }
    api.get_list("/locations/", &query).await
}

/// The most frequently used locations.
pub async fn popular(api: &ApiClient) -> Result<Vec<Location>, ApiError> {
    let lang = api.session().language();
    api.get_list("/locations/popular/", &[("lang", lang.as_str())]).await
}

pub async fn by_id(api: &ApiClient, id: i64) -> Result<Location, ApiError> {
    let lang = api.session().language();
    api.get_json(&format!("/locations/{id}/"), &[("lang", lang.as_str())])
        .await
}
