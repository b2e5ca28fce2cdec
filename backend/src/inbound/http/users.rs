//! User API handlers.
//!
//! ```text
//! POST /api/v1/users
//! GET /api/v1/users?page=0&size=10&sort=name&order=asc
//! GET /api/v1/users/{id}
//! PUT /api/v1/users
//! DELETE /api/v1/users/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, NewUser, Profile, User, UserId, UserSortKey, UserUpdate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::pagination::{ListQuery, PageBody};
use crate::inbound::http::state::HttpState;

/// Request payload for registering a user.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserBody {
    /// Display name.
    pub name: String,
    /// Unique contact address.
    pub email: String,
    /// Credential blob; hashed upstream, opaque here.
    pub password: String,
    /// Optional contact number.
    pub telephone: Option<String>,
    /// Assigned role.
    pub profile: Profile,
}

impl From<RegisterUserBody> for NewUser {
    fn from(body: RegisterUserBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            password: body.password,
            telephone: body.telephone,
            profile: body.profile,
        }
    }
}

/// Request payload for updating a user. Omitted fields stay unchanged.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    /// Identifier of the user to update.
    #[schema(format = "uuid")]
    pub id: Uuid,
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement contact address.
    pub email: Option<String>,
    /// Replacement credential blob.
    pub password: Option<String>,
    /// Replacement contact number.
    pub telephone: Option<String>,
}

impl From<UpdateUserBody> for UserUpdate {
    fn from(body: UpdateUserBody) -> Self {
        Self {
            id: UserId::from_uuid(body.id),
            name: body.name,
            email: body.email,
            password: body.password,
            telephone: body.telephone,
        }
    }
}

/// User representation returned by the API. The credential blob never
/// leaves the server.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    /// Stable identifier.
    #[schema(format = "uuid")]
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Contact number, when known.
    pub telephone: Option<String>,
    /// Assigned role.
    pub profile: Profile,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            name: user.name,
            email: user.email,
            telephone: user.telephone,
            profile: user.profile,
        }
    }
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterUserBody,
    responses(
        (status = 201, description = "User registered", body = UserBody,
            headers(("Location" = String, description = "URL of the new user"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserBody>,
) -> ApiResult<HttpResponse> {
    let user = state.users.register(payload.into_inner().into()).await?;
    let body = UserBody::from(user);
    let location = format!("/api/v1/users/{}", body.id);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(body))
}

/// List active users. Deactivated users never appear here.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of active users, sorted by name by default",
            body = PageBody<UserBody>),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<PageBody<UserBody>>> {
    let page = query.page_request()?;
    let sort = query.sort_key::<UserSortKey>()?;
    let users = state.users.list(sort, page).await?;
    Ok(web::Json(PageBody::from_page(users, UserBody::from)))
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserBody),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<UserBody>> {
    let user = state.users.get(UserId::from_uuid(path.into_inner())).await?;
    Ok(web::Json(UserBody::from(user)))
}

/// Update a user. Fields absent from the payload keep their stored values.
#[utoipa::path(
    put,
    path = "/api/v1/users",
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "Updated user", body = UserBody),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users")]
pub async fn update_user(
    state: web::Data<HttpState>,
    payload: web::Json<UpdateUserBody>,
) -> ApiResult<web::Json<UserBody>> {
    let user = state.users.update(payload.into_inner().into()).await?;
    Ok(web::Json(UserBody::from(user)))
}

/// Soft-delete a user. Repeat deletions still return success.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deactivated"),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state
        .users
        .deactivate(UserId::from_uuid(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
