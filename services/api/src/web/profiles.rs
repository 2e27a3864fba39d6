//! services/api/src/web/profiles.rs
//!
//! CRUD handlers for the family member profiles of the signed-in account.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use persona_cart_core::domain::{AgeGroup, Gender, Preferences, Profile, ProfileDraft};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::state::{AppState, CurrentUser};

//=========================================================================================
// Payloads
//=========================================================================================

/// Body of create and update requests.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub name: String,
    #[schema(value_type = String, example = "Adult")]
    pub age_group: AgeGroup,
    #[schema(value_type = String, example = "Female")]
    pub gender: Gender,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub preferences: Preferences,
}

impl ProfilePayload {
    fn into_draft(self) -> Result<ProfileDraft, ApiError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::BadRequest("Profile name is required".to_string()));
        }
        Ok(ProfileDraft {
            name,
            age_group: self.age_group,
            gender: self.gender,
            avatar: self.avatar,
            preferences: self.preferences,
        })
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    #[schema(value_type = String)]
    pub age_group: AgeGroup,
    #[schema(value_type = String)]
    pub gender: Gender,
    pub avatar: Option<String>,
    #[schema(value_type = Object)]
    pub preferences: Preferences,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            owner_id: p.owner_id,
            name: p.name,
            age_group: p.age_group,
            gender: p.gender,
            avatar: p.avatar,
            preferences: p.preferences,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct DeleteProfileResponse {
    pub success: bool,
    pub deleted: ProfileResponse,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// List all profiles of the signed-in account.
#[utoipa::path(
    get,
    path = "/profiles",
    responses(
        (status = 200, description = "The account's profiles", body = [ProfileResponse]),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn list_profiles_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let profiles = state.db.list_profiles(user.user_id).await?;
    Ok(Json(profiles.into_iter().map(ProfileResponse::from).collect()))
}

/// Get a single profile by id.
#[utoipa::path(
    get,
    path = "/profiles/{id}",
    params(("id" = Uuid, Path, description = "Profile id")),
    responses(
        (status = 200, description = "The profile", body = ProfileResponse),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.db.get_profile(user.user_id, id).await?;
    Ok(Json(profile.into()))
}

/// Create a new profile with a generated id.
#[utoipa::path(
    post,
    path = "/profiles",
    request_body = ProfilePayload,
    responses(
        (status = 201, description = "Profile created", body = ProfileResponse),
        (status = 400, description = "Invalid profile")
    )
)]
pub async fn create_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ProfilePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = payload.into_draft()?;
    let profile = state.db.create_profile(user.user_id, draft).await?;
    info!(profile_id = %profile.id, owner_id = %user.user_id, "Profile created");
    Ok((StatusCode::CREATED, Json(ProfileResponse::from(profile))))
}

/// Replace the details of an existing profile.
#[utoipa::path(
    put,
    path = "/profiles/{id}",
    params(("id" = Uuid, Path, description = "Profile id")),
    request_body = ProfilePayload,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Invalid profile"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn update_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProfilePayload>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let draft = payload.into_draft()?;
    let profile = state.db.update_profile(user.user_id, id, draft).await?;
    Ok(Json(profile.into()))
}

/// Delete a profile and return what was removed.
#[utoipa::path(
    delete,
    path = "/profiles/{id}",
    params(("id" = Uuid, Path, description = "Profile id")),
    responses(
        (status = 200, description = "Profile deleted", body = DeleteProfileResponse),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn delete_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteProfileResponse>, ApiError> {
    let deleted = state.db.delete_profile(user.user_id, id).await?;
    info!(profile_id = %id, owner_id = %user.user_id, "Profile deleted");
    Ok(Json(DeleteProfileResponse {
        success: true,
        deleted: deleted.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_reads_camel_case_and_defaults_preferences() {
        let payload: ProfilePayload =
            serde_json::from_str(r#"{"name":" Leo ","ageGroup":"Teen","gender":"Male"}"#).unwrap();
        let draft = payload.into_draft().unwrap();
        assert_eq!(draft.name, "Leo");
        assert_eq!(draft.age_group, AgeGroup::Teen);
        assert_eq!(draft.preferences, Preferences::default());
    }

    #[test]
    fn blank_name_is_rejected() {
        let payload: ProfilePayload =
            serde_json::from_str(r#"{"name":"  ","ageGroup":"Adult","gender":"Other"}"#).unwrap();
        assert!(matches!(payload.into_draft(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn unknown_gender_does_not_parse() {
        let parsed = serde_json::from_str::<ProfilePayload>(
            r#"{"name":"A","ageGroup":"Adult","gender":"Unisex"}"#,
        );
        assert!(parsed.is_err());
    }
}
