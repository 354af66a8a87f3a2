use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Json, Router, middleware};
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers, logging, problem};
use crate::domain::repo::{ProfilesRepository, UsersRepository};
use crate::domain::service::{ProfileService, UserService};
use crate::infra::storage::sea_orm_repo::{SeaOrmProfilesRepository, SeaOrmUsersRepository};

/// Service types used by the server binary.
pub type ConcreteUserService = UserService<SeaOrmUsersRepository, SeaOrmProfilesRepository>;
pub type ConcreteProfileService = ProfileService<SeaOrmProfilesRepository>;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Manager API",
        description = "API for managing users and their one-to-one profiles",
        version = "v1"
    ),
    paths(
        handlers::list_users,
        handlers::create_user,
        handlers::update_user,
        handlers::delete_user,
        handlers::list_profiles,
        handlers::get_profile,
        handlers::create_profile,
        handlers::update_profile,
        handlers::delete_profile,
    ),
    components(schemas(
        dto::UserDto,
        dto::ProfileDto,
        dto::UserRequest,
        dto::ProfileRequest,
        problem::Problem,
        problem::FieldViolation,
    )),
    tags(
        (name = "User Management", description = "APIs for managing users and their profiles"),
        (name = "User Profile Management", description = "APIs for managing standalone user profiles"),
    )
)]
struct ApiDoc;

async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the REST router. One explicit registration per route; the request
/// logging middleware wraps every handler.
pub fn router<U, P>(users: Arc<UserService<U, P>>, profiles: Arc<ProfileService<P>>) -> Router
where
    U: UsersRepository + 'static,
    P: ProfilesRepository + 'static,
{
    Router::new()
        .route(
            "/users",
            get(handlers::list_users::<U, P>).post(handlers::create_user::<U, P>),
        )
        .route(
            "/users/{id}",
            axum::routing::put(handlers::update_user::<U, P>)
                .delete(handlers::delete_user::<U, P>),
        )
        .route(
            "/profiles",
            get(handlers::list_profiles::<P>).post(handlers::create_profile::<P>),
        )
        .route(
            "/profiles/{id}",
            get(handlers::get_profile::<P>)
                .put(handlers::update_profile::<P>)
                .delete(handlers::delete_profile::<P>),
        )
        .route("/api-docs/openapi.json", get(openapi_spec))
        .layer(middleware::from_fn(logging::log_requests))
        .layer(Extension(users))
        .layer(Extension(profiles))
}
