//! Topic API handlers.
//!
//! ```text
//! POST /api/v1/topics
//! GET /api/v1/topics?page=0&size=10&sort=createdAt&order=asc
//! GET /api/v1/topics/{id}
//! PUT /api/v1/topics
//! DELETE /api/v1/topics/{id}
//! ```
//!
//! Topic listings include soft-deleted rows; only users and courses filter
//! on the active flag.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    CourseId, Error, NewTopic, Topic, TopicId, TopicSortKey, TopicStatus, TopicUpdate, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::pagination::{ListQuery, PageBody};
use crate::inbound::http::state::HttpState;

/// Request payload for opening a topic.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenTopicBody {
    /// Headline shown in listings.
    pub title: String,
    /// Free-text body.
    pub message: String,
    /// Initial discussion state; defaults to `NO_RESPONSE` when omitted.
    #[serde(default)]
    pub status: TopicStatus,
    /// Author; must reference an existing user.
    #[schema(format = "uuid")]
    pub user_id: Uuid,
    /// Owning course; optional, must resolve when supplied.
    #[schema(format = "uuid")]
    pub course_id: Option<Uuid>,
}

impl From<OpenTopicBody> for NewTopic {
    fn from(body: OpenTopicBody) -> Self {
        Self {
            title: body.title,
            message: body.message,
            status: body.status,
            user_id: UserId::from_uuid(body.user_id),
            course_id: body.course_id.map(CourseId::from_uuid),
        }
    }
}

/// Request payload for updating a topic. Omitted fields stay unchanged.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTopicBody {
    /// Identifier of the topic to update.
    #[schema(format = "uuid")]
    pub topic_id: Uuid,
    /// Replacement headline.
    pub title: Option<String>,
    /// Replacement body.
    pub message: Option<String>,
    /// Replacement discussion state; any value may follow any other.
    pub status: Option<TopicStatus>,
}

impl From<UpdateTopicBody> for TopicUpdate {
    fn from(body: UpdateTopicBody) -> Self {
        Self {
            id: TopicId::from_uuid(body.topic_id),
            title: body.title,
            message: body.message,
            status: body.status,
        }
    }
}

/// Topic representation returned by the API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicBody {
    /// Stable identifier.
    #[schema(format = "uuid")]
    pub topic_id: Uuid,
    /// Headline shown in listings.
    pub title: String,
    /// Free-text body.
    pub message: String,
    /// Caller-managed discussion state.
    pub status: TopicStatus,
    /// Logical liveness flag.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Author back-reference.
    #[schema(format = "uuid")]
    pub user_id: Uuid,
    /// Owning course back-reference, when the topic belongs to one.
    #[schema(format = "uuid")]
    pub course_id: Option<Uuid>,
}

impl From<Topic> for TopicBody {
    fn from(topic: Topic) -> Self {
        Self {
            topic_id: *topic.id.as_uuid(),
            title: topic.title,
            message: topic.message,
            status: topic.status,
            active: topic.active,
            created_at: topic.created_at,
            user_id: *topic.user_id.as_uuid(),
            course_id: topic.course_id.map(|id| *id.as_uuid()),
        }
    }
}

/// Open a new topic. The author must exist; the course, when given, must
/// exist too.
#[utoipa::path(
    post,
    path = "/api/v1/topics",
    request_body = OpenTopicBody,
    responses(
        (status = 201, description = "Topic opened", body = TopicBody,
            headers(("Location" = String, description = "URL of the new topic"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Referenced user or course not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["topics"],
    operation_id = "openTopic"
)]
#[post("/topics")]
pub async fn open_topic(
    state: web::Data<HttpState>,
    payload: web::Json<OpenTopicBody>,
) -> ApiResult<HttpResponse> {
    let topic = state.topics.open(payload.into_inner().into()).await?;
    let body = TopicBody::from(topic);
    let location = format!("/api/v1/topics/{}", body.topic_id);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(body))
}

/// List topics, soft-deleted ones included.
#[utoipa::path(
    get,
    path = "/api/v1/topics",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of topics, sorted by creation time by default",
            body = PageBody<TopicBody>),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["topics"],
    operation_id = "listTopics"
)]
#[get("/topics")]
pub async fn list_topics(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<PageBody<TopicBody>>> {
    let page = query.page_request()?;
    let sort = query.sort_key::<TopicSortKey>()?;
    let topics = state.topics.list(sort, page).await?;
    Ok(web::Json(PageBody::from_page(topics, TopicBody::from)))
}

/// Fetch one topic by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/topics/{id}",
    params(("id" = Uuid, Path, description = "Topic identifier")),
    responses(
        (status = 200, description = "Topic", body = TopicBody),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["topics"],
    operation_id = "getTopic"
)]
#[get("/topics/{id}")]
pub async fn get_topic(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<TopicBody>> {
    let topic = state
        .topics
        .get(TopicId::from_uuid(path.into_inner()))
        .await?;
    Ok(web::Json(TopicBody::from(topic)))
}

/// Update a topic. Fields absent from the payload keep their stored values.
#[utoipa::path(
    put,
    path = "/api/v1/topics",
    request_body = UpdateTopicBody,
    responses(
        (status = 200, description = "Updated topic", body = TopicBody),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["topics"],
    operation_id = "updateTopic"
)]
#[put("/topics")]
pub async fn update_topic(
    state: web::Data<HttpState>,
    payload: web::Json<UpdateTopicBody>,
) -> ApiResult<web::Json<TopicBody>> {
    let topic = state.topics.update(payload.into_inner().into()).await?;
    Ok(web::Json(TopicBody::from(topic)))
}

/// Soft-delete a topic. Repeat deletions still return success.
#[utoipa::path(
    delete,
    path = "/api/v1/topics/{id}",
    params(("id" = Uuid, Path, description = "Topic identifier")),
    responses(
        (status = 204, description = "Topic deactivated"),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["topics"],
    operation_id = "deleteTopic"
)]
#[delete("/topics/{id}")]
pub async fn delete_topic(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state
        .topics
        .deactivate(TopicId::from_uuid(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::{
        MockCoursesService, MockRepliesService, MockTopicsService, MockUsersService,
    };

    fn state_with(topics: MockTopicsService) -> HttpState {
        HttpState {
            users: Arc::new(MockUsersService::new()),
            courses: Arc::new(MockCoursesService::new()),
            topics: Arc::new(topics),
            replies: Arc::new(MockRepliesService::new()),
        }
    }

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .service(open_topic)
                .service(list_topics)
                .service(get_topic)
                .service(update_topic)
                .service(delete_topic),
        )
    }

    #[rstest]
    #[actix_web::test]
    async fn open_defaults_the_status_when_omitted() {
        let mut topics = MockTopicsService::new();
        topics
            .expect_open()
            .withf(|draft| draft.status == TopicStatus::NoResponse && draft.course_id.is_some())
            .returning(|draft| Ok(Topic::open(draft)));

        let app = actix_test::init_service(test_app(state_with(topics))).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/topics")
            .set_json(json!({
                "title": "Lifetime puzzle",
                "message": "What does 'static mean here?",
                "userId": Uuid::new_v4(),
                "courseId": Uuid::new_v4(),
            }))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["status"], "NO_RESPONSE");
    }

    #[rstest]
    #[actix_web::test]
    async fn open_with_a_missing_reference_maps_to_404() {
        let mut topics = MockTopicsService::new();
        topics
            .expect_open()
            .returning(|_| Err(Error::not_found("user not found")));

        let app = actix_test::init_service(test_app(state_with(topics))).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/topics")
            .set_json(json!({
                "title": "Orphan",
                "message": "No author.",
                "userId": Uuid::new_v4(),
            }))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], "user not found");
    }

    #[rstest]
    #[actix_web::test]
    async fn update_accepts_any_status_value() {
        let mut topics = MockTopicsService::new();
        topics
            .expect_update()
            .withf(|update| update.status == Some(TopicStatus::Closed))
            .returning(|update| {
                let mut topic = Topic::open(NewTopic {
                    title: "t".to_owned(),
                    message: "m".to_owned(),
                    status: TopicStatus::Solved,
                    user_id: UserId::random(),
                    course_id: None,
                });
                topic.apply_update(&update);
                Ok(topic)
            });

        let app = actix_test::init_service(test_app(state_with(topics))).await;
        let request = actix_test::TestRequest::put()
            .uri("/api/v1/topics")
            .set_json(json!({ "topicId": Uuid::new_v4(), "status": "CLOSED" }))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert!(response.status().is_success());

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["status"], "CLOSED");
    }

    #[rstest]
    #[actix_web::test]
    async fn listing_exposes_inactive_topics() {
        let mut topics = MockTopicsService::new();
        topics.expect_list().returning(|_, page| {
            let mut inactive = Topic::open(NewTopic {
                title: "gone".to_owned(),
                message: "soft deleted".to_owned(),
                status: TopicStatus::default(),
                user_id: UserId::random(),
                course_id: None,
            });
            inactive.deactivate();
            Ok(pagination::Page::from_request(vec![inactive], page, 1))
        });

        let app = actix_test::init_service(test_app(state_with(topics))).await;
        let request = actix_test::TestRequest::get()
            .uri("/api/v1/topics")
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert!(response.status().is_success());

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["items"][0]["active"], false);
    }
}
