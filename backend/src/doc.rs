//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: all entity endpoints from the inbound layer plus the health
//! probes. The generated specification backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, Profile, TopicStatus};
use crate::inbound::http::courses::{CourseBody, RegisterCourseBody, UpdateCourseBody};
use crate::inbound::http::replies::{PostReplyBody, ReplyBody, UpdateReplyBody};
use crate::inbound::http::topics::{OpenTopicBody, TopicBody, UpdateTopicBody};
use crate::inbound::http::users::{RegisterUserBody, UpdateUserBody, UserBody};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Forum backend API",
        description = "HTTP interface for forum users, courses, topics, and replies."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::courses::register_course,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::topics::open_topic,
        crate::inbound::http::topics::list_topics,
        crate::inbound::http::topics::get_topic,
        crate::inbound::http::topics::update_topic,
        crate::inbound::http::topics::delete_topic,
        crate::inbound::http::replies::post_reply,
        crate::inbound::http::replies::list_replies,
        crate::inbound::http::replies::get_reply,
        crate::inbound::http::replies::update_reply,
        crate::inbound::http::replies::delete_reply,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Profile,
        TopicStatus,
        RegisterUserBody,
        UpdateUserBody,
        UserBody,
        RegisterCourseBody,
        UpdateCourseBody,
        CourseBody,
        OpenTopicBody,
        UpdateTopicBody,
        TopicBody,
        PostReplyBody,
        UpdateReplyBody,
        ReplyBody,
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "courses", description = "Operations related to courses"),
        (name = "topics", description = "Operations related to topics"),
        (name = "replies", description = "Operations related to replies"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
