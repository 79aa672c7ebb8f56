use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{
    controller::{
        admin::{self, ADMIN_TAG},
        auth::{self, AUTH_TAG},
        correction::{self, CORRECTION_TAG},
        doi::{self, DOI_TAG},
        fee::{self, FEE_TAG},
        manuscript::{self, MANUSCRIPT_TAG},
        payment::{self, PAYMENT_TAG},
        review::{self, REVIEW_TAG},
        user::{self, USER_TAG},
        volume::{self, VOLUME_TAG},
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Journal API", description = "Manuscript submission, review and publication"),
    tags(
        (name = AUTH_TAG, description = "OAuth login and session"),
        (name = USER_TAG, description = "Current user's role and notifications"),
        (name = ADMIN_TAG, description = "User and role administration"),
        (name = FEE_TAG, description = "Publication fees"),
        (name = DOI_TAG, description = "DOI validation and uniqueness"),
        (name = MANUSCRIPT_TAG, description = "Manuscript workflow"),
        (name = REVIEW_TAG, description = "Peer review"),
        (name = PAYMENT_TAG, description = "Fee payments"),
        (name = VOLUME_TAG, description = "Volumes, issues and issue publication"),
        (name = CORRECTION_TAG, description = "Errata, corrigenda and retractions"),
    )
)]
pub struct ApiDoc;

/// Builds the API router and the OpenAPI document describing it.
pub fn router() -> (Router<AppState>, utoipa::openapi::OpenApi) {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::login))
        .routes(routes!(auth::callback))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::get_user))
        .routes(routes!(user::set_active_role))
        .routes(routes!(user::get_notifications))
        .routes(routes!(user::mark_notification_read))
        .routes(routes!(admin::get_users))
        .routes(routes!(admin::grant_role, admin::revoke_role))
        .routes(routes!(fee::get_quote))
        .routes(routes!(fee::get_config, fee::update_config))
        .routes(routes!(doi::validate))
        .routes(routes!(doi::parse))
        .routes(routes!(doi::check_unique))
        .routes(routes!(manuscript::submit, manuscript::list))
        .routes(routes!(manuscript::get))
        .routes(routes!(manuscript::update_status))
        .routes(routes!(manuscript::update_copy_editing))
        .routes(routes!(manuscript::assign_issue))
        .routes(routes!(manuscript::assign_doi))
        .routes(routes!(manuscript::record_metric))
        .routes(routes!(review::assign, review::list))
        .routes(routes!(review::respond))
        .routes(routes!(payment::create))
        .routes(routes!(payment::confirm))
        .routes(routes!(payment::list))
        .routes(routes!(volume::create_volume, volume::list))
        .routes(routes!(volume::create_issue))
        .routes(routes!(volume::publish_issue))
        .routes(routes!(correction::create, correction::list))
        .routes(routes!(correction::publish))
        .split_for_parts()
}
