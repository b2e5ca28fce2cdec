//! Reply API handlers.
//!
//! ```text
//! POST /api/v1/replies
//! GET /api/v1/replies?topicId={uuid}&page=0&size=10&sort=createdAt
//! GET /api/v1/replies/{id}
//! PUT /api/v1/replies
//! DELETE /api/v1/replies/{id}
//! ```
//!
//! Reply listings include soft-deleted rows and accept an optional topic
//! scope.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{Error, NewReply, Reply, ReplyId, ReplySortKey, ReplyUpdate, TopicId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::pagination::{ListQuery, PageBody};
use crate::inbound::http::state::HttpState;

/// Request payload for posting a reply.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostReplyBody {
    /// Free-text body.
    pub message: String,
    /// Topic the reply answers; must reference an existing topic.
    #[schema(format = "uuid")]
    pub topic_id: Uuid,
    /// Respondent; must reference an existing user.
    #[schema(format = "uuid")]
    pub user_id: Uuid,
}

impl From<PostReplyBody> for NewReply {
    fn from(body: PostReplyBody) -> Self {
        Self {
            message: body.message,
            topic_id: TopicId::from_uuid(body.topic_id),
            user_id: UserId::from_uuid(body.user_id),
        }
    }
}

/// Request payload for updating a reply. Omitted fields stay unchanged;
/// `solution` drives the mark/unmark toggle.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReplyBody {
    /// Identifier of the reply to update.
    #[schema(format = "uuid")]
    pub reply_id: Uuid,
    /// Replacement body.
    pub message: Option<String>,
    /// Toggle target for the solution flag.
    pub solution: Option<bool>,
}

impl From<UpdateReplyBody> for ReplyUpdate {
    fn from(body: UpdateReplyBody) -> Self {
        Self {
            id: ReplyId::from_uuid(body.reply_id),
            message: body.message,
            solution: body.solution,
        }
    }
}

/// Reply representation returned by the API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplyBody {
    /// Stable identifier.
    #[schema(format = "uuid")]
    pub reply_id: Uuid,
    /// Free-text body.
    pub message: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Whether this reply is marked as a solution.
    pub solution: bool,
    /// Logical liveness flag.
    pub active: bool,
    /// Owning topic back-reference.
    #[schema(format = "uuid")]
    pub topic_id: Uuid,
    /// Respondent back-reference.
    #[schema(format = "uuid")]
    pub user_id: Uuid,
}

impl From<Reply> for ReplyBody {
    fn from(reply: Reply) -> Self {
        Self {
            reply_id: *reply.id.as_uuid(),
            message: reply.message,
            created_at: reply.created_at,
            solution: reply.solution,
            active: reply.active,
            topic_id: *reply.topic_id.as_uuid(),
            user_id: *reply.user_id.as_uuid(),
        }
    }
}

/// Listing query parameters for replies: the common paging set plus an
/// optional topic scope.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReplyListQuery {
    /// Restrict the listing to one topic.
    pub topic_id: Option<Uuid>,
    /// Zero-indexed page number. Defaults to the first page.
    pub page: Option<u32>,
    /// Page size between 1 and 100. Defaults to 10.
    pub size: Option<u32>,
    /// Sort key; only `createdAt` is offered.
    pub sort: Option<String>,
    /// Sort direction, `asc` (default) or `desc`.
    pub order: Option<String>,
}

impl ReplyListQuery {
    fn paging(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            size: self.size,
            sort: self.sort.clone(),
            order: self.order.clone(),
        }
    }
}

/// Post a new reply. Both references must resolve before anything is
/// written.
#[utoipa::path(
    post,
    path = "/api/v1/replies",
    request_body = PostReplyBody,
    responses(
        (status = 201, description = "Reply posted", body = ReplyBody,
            headers(("Location" = String, description = "URL of the new reply"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Referenced topic or user not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["replies"],
    operation_id = "postReply"
)]
#[post("/replies")]
pub async fn post_reply(
    state: web::Data<HttpState>,
    payload: web::Json<PostReplyBody>,
) -> ApiResult<HttpResponse> {
    let reply = state.replies.post(payload.into_inner().into()).await?;
    let body = ReplyBody::from(reply);
    let location = format!("/api/v1/replies/{}", body.reply_id);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(body))
}

/// List replies, optionally scoped to one topic. Soft-deleted replies are
/// included.
#[utoipa::path(
    get,
    path = "/api/v1/replies",
    params(ReplyListQuery),
    responses(
        (status = 200, description = "Page of replies, sorted by creation time by default",
            body = PageBody<ReplyBody>),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["replies"],
    operation_id = "listReplies"
)]
#[get("/replies")]
pub async fn list_replies(
    state: web::Data<HttpState>,
    query: web::Query<ReplyListQuery>,
) -> ApiResult<web::Json<PageBody<ReplyBody>>> {
    let paging = query.paging();
    let page = paging.page_request()?;
    let sort = paging.sort_key::<ReplySortKey>()?;
    let topic_id = query.topic_id.map(TopicId::from_uuid);
    let replies = state.replies.list(topic_id, sort, page).await?;
    Ok(web::Json(PageBody::from_page(replies, ReplyBody::from)))
}

/// Fetch one reply by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/replies/{id}",
    params(("id" = Uuid, Path, description = "Reply identifier")),
    responses(
        (status = 200, description = "Reply", body = ReplyBody),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["replies"],
    operation_id = "getReply"
)]
#[get("/replies/{id}")]
pub async fn get_reply(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ReplyBody>> {
    let reply = state
        .replies
        .get(ReplyId::from_uuid(path.into_inner()))
        .await?;
    Ok(web::Json(ReplyBody::from(reply)))
}

/// Update a reply. Fields absent from the payload keep their stored values.
#[utoipa::path(
    put,
    path = "/api/v1/replies",
    request_body = UpdateReplyBody,
    responses(
        (status = 200, description = "Updated reply", body = ReplyBody),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["replies"],
    operation_id = "updateReply"
)]
#[put("/replies")]
pub async fn update_reply(
    state: web::Data<HttpState>,
    payload: web::Json<UpdateReplyBody>,
) -> ApiResult<web::Json<ReplyBody>> {
    let reply = state.replies.update(payload.into_inner().into()).await?;
    Ok(web::Json(ReplyBody::from(reply)))
}

/// Soft-delete a reply. Repeat deletions still return success.
#[utoipa::path(
    delete,
    path = "/api/v1/replies/{id}",
    params(("id" = Uuid, Path, description = "Reply identifier")),
    responses(
        (status = 204, description = "Reply deactivated"),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["replies"],
    operation_id = "deleteReply"
)]
#[delete("/replies/{id}")]
pub async fn delete_reply(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state
        .replies
        .deactivate(ReplyId::from_uuid(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
