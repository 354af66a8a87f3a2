use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path};
use axum::http::StatusCode;

use crate::api::rest::ApiResult;
use crate::api::rest::dto::{ProfileDto, ProfileRequest, UserDto, UserRequest};
use crate::api::rest::problem::Problem;
use crate::domain::repo::{ProfilesRepository, UsersRepository};
use crate::domain::service::{ProfileService, UserService};

#[utoipa::path(
    get,
    path = "/users",
    tag = "User Management",
    responses(
        (status = 200, description = "All users with their profiles", body = [UserDto]),
        (status = 500, description = "Storage failure", body = Problem),
    )
)]
pub async fn list_users<U, P>(
    Extension(service): Extension<Arc<UserService<U, P>>>,
) -> ApiResult<Json<Vec<UserDto>>>
where
    U: UsersRepository + 'static,
    P: ProfilesRepository + 'static,
{
    let users = service.list_users().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "User Management",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Validation failure", body = Problem),
    )
)]
pub async fn create_user<U, P>(
    Extension(service): Extension<Arc<UserService<U, P>>>,
    Json(req): Json<UserRequest>,
) -> ApiResult<(StatusCode, Json<UserDto>)>
where
    U: UsersRepository + 'static,
    P: ProfilesRepository + 'static,
{
    let user = service.create_user(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "User Management",
    params(("id" = i32, Path, description = "Id of the user to update")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Validation failure", body = Problem),
        (status = 404, description = "User not found", body = Problem),
    )
)]
pub async fn update_user<U, P>(
    Extension(service): Extension<Arc<UserService<U, P>>>,
    Path(id): Path<i32>,
    Json(req): Json<UserRequest>,
) -> ApiResult<Json<UserDto>>
where
    U: UsersRepository + 'static,
    P: ProfilesRepository + 'static,
{
    let user = service.update_user(id, req.into()).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "User Management",
    params(("id" = i32, Path, description = "Id of the user to delete")),
    responses(
        (status = 204, description = "User and any linked profile deleted"),
        (status = 404, description = "User not found", body = Problem),
    )
)]
pub async fn delete_user<U, P>(
    Extension(service): Extension<Arc<UserService<U, P>>>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode>
where
    U: UsersRepository + 'static,
    P: ProfilesRepository + 'static,
{
    service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/profiles",
    tag = "User Profile Management",
    responses(
        (status = 200, description = "All profiles", body = [ProfileDto]),
    )
)]
pub async fn list_profiles<P>(
    Extension(service): Extension<Arc<ProfileService<P>>>,
) -> ApiResult<Json<Vec<ProfileDto>>>
where
    P: ProfilesRepository + 'static,
{
    let profiles = service.list_profiles().await?;
    Ok(Json(profiles.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/profiles/{id}",
    tag = "User Profile Management",
    params(("id" = i32, Path, description = "Id of the profile")),
    responses(
        (status = 200, description = "The profile", body = ProfileDto),
        (status = 404, description = "Profile not found", body = Problem),
    )
)]
pub async fn get_profile<P>(
    Extension(service): Extension<Arc<ProfileService<P>>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ProfileDto>>
where
    P: ProfilesRepository + 'static,
{
    let profile = service.get_profile(id).await?;
    Ok(Json(profile.into()))
}

#[utoipa::path(
    post,
    path = "/profiles",
    tag = "User Profile Management",
    request_body = ProfileRequest,
    responses(
        (status = 201, description = "Profile created", body = ProfileDto),
        (status = 400, description = "Validation failure", body = Problem),
    )
)]
pub async fn create_profile<P>(
    Extension(service): Extension<Arc<ProfileService<P>>>,
    Json(req): Json<ProfileRequest>,
) -> ApiResult<(StatusCode, Json<ProfileDto>)>
where
    P: ProfilesRepository + 'static,
{
    let profile = service.create_profile(req.into()).await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

#[utoipa::path(
    put,
    path = "/profiles/{id}",
    tag = "User Profile Management",
    params(("id" = i32, Path, description = "Id of the profile to update")),
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileDto),
        (status = 400, description = "Validation failure", body = Problem),
        (status = 404, description = "Profile not found", body = Problem),
    )
)]
pub async fn update_profile<P>(
    Extension(service): Extension<Arc<ProfileService<P>>>,
    Path(id): Path<i32>,
    Json(req): Json<ProfileRequest>,
) -> ApiResult<Json<ProfileDto>>
where
    P: ProfilesRepository + 'static,
{
    let profile = service.update_profile(id, req.into()).await?;
    Ok(Json(profile.into()))
}

#[utoipa::path(
    delete,
    path = "/profiles/{id}",
    tag = "User Profile Management",
    params(("id" = i32, Path, description = "Id of the profile to delete")),
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 404, description = "Profile not found", body = Problem),
    )
)]
pub async fn delete_profile<P>(
    Extension(service): Extension<Arc<ProfileService<P>>>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode>
where
    P: ProfilesRepository + 'static,
{
    service.delete_profile(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
