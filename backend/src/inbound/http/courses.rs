//! Course API handlers.
//!
//! ```text
//! POST /api/v1/courses
//! GET /api/v1/courses?page=0&size=10&sort=name&order=asc
//! GET /api/v1/courses/{id}
//! PUT /api/v1/courses
//! DELETE /api/v1/courses/{id}
//! ```
//!
//! Deleting a course is a soft delete and answers 409 while topics still
//! reference the course.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Course, CourseId, CourseSortKey, CourseUpdate, Error, NewCourse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::pagination::{ListQuery, PageBody};
use crate::inbound::http::state::HttpState;

/// Request payload for registering a course.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCourseBody {
    /// Course title.
    pub name: String,
    /// Subject area label.
    pub category: String,
}

impl From<RegisterCourseBody> for NewCourse {
    fn from(body: RegisterCourseBody) -> Self {
        Self {
            name: body.name,
            category: body.category,
        }
    }
}

/// Request payload for updating a course. Omitted fields stay unchanged.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseBody {
    /// Identifier of the course to update.
    #[schema(format = "uuid")]
    pub course_id: Uuid,
    /// Replacement title.
    pub name: Option<String>,
    /// Replacement subject area label.
    pub category: Option<String>,
}

impl From<UpdateCourseBody> for CourseUpdate {
    fn from(body: UpdateCourseBody) -> Self {
        Self {
            id: CourseId::from_uuid(body.course_id),
            name: body.name,
            category: body.category,
        }
    }
}

/// Course representation returned by the API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseBody {
    /// Stable identifier.
    #[schema(format = "uuid")]
    pub course_id: Uuid,
    /// Course title.
    pub name: String,
    /// Subject area label.
    pub category: String,
    /// Logical liveness flag.
    pub active: bool,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Course> for CourseBody {
    fn from(course: Course) -> Self {
        Self {
            course_id: *course.id.as_uuid(),
            name: course.name,
            category: course.category,
            active: course.active,
            created_at: course.created_at,
        }
    }
}

/// Register a new course.
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = RegisterCourseBody,
    responses(
        (status = 201, description = "Course registered", body = CourseBody,
            headers(("Location" = String, description = "URL of the new course"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "registerCourse"
)]
#[post("/courses")]
pub async fn register_course(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterCourseBody>,
) -> ApiResult<HttpResponse> {
    let course = state.courses.register(payload.into_inner().into()).await?;
    let body = CourseBody::from(course);
    let location = format!("/api/v1/courses/{}", body.course_id);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(body))
}

/// List active courses. Deactivated courses never appear here.
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of active courses, sorted by name by default",
            body = PageBody<CourseBody>),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<PageBody<CourseBody>>> {
    let page = query.page_request()?;
    let sort = query.sort_key::<CourseSortKey>()?;
    let courses = state.courses.list(sort, page).await?;
    Ok(web::Json(PageBody::from_page(courses, CourseBody::from)))
}

/// Fetch one course by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id" = Uuid, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course", body = CourseBody),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<CourseBody>> {
    let course = state
        .courses
        .get(CourseId::from_uuid(path.into_inner()))
        .await?;
    Ok(web::Json(CourseBody::from(course)))
}

/// Update a course. Fields absent from the payload keep their stored values.
#[utoipa::path(
    put,
    path = "/api/v1/courses",
    request_body = UpdateCourseBody,
    responses(
        (status = 200, description = "Updated course", body = CourseBody),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[put("/courses")]
pub async fn update_course(
    state: web::Data<HttpState>,
    payload: web::Json<UpdateCourseBody>,
) -> ApiResult<web::Json<CourseBody>> {
    let course = state.courses.update(payload.into_inner().into()).await?;
    Ok(web::Json(CourseBody::from(course)))
}

/// Soft-delete a course. Blocked with 409 while topics reference it.
#[utoipa::path(
    delete,
    path = "/api/v1/courses/{id}",
    params(("id" = Uuid, Path, description = "Course identifier")),
    responses(
        (status = 204, description = "Course deactivated"),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Course still has associated topics", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state
        .courses
        .deactivate(CourseId::from_uuid(path.into_inner()))
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

    fn state_with(courses: MockCoursesService) -> HttpState {
        HttpState {
            users: Arc::new(MockUsersService::new()),
            courses: Arc::new(courses),
            topics: Arc::new(MockTopicsService::new()),
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
                .service(register_course)
                .service(list_courses)
                .service(get_course)
                .service(update_course)
                .service(delete_course),
        )
    }

    #[rstest]
    #[actix_web::test]
    async fn register_returns_created_with_location() {
        let mut courses = MockCoursesService::new();
        courses
            .expect_register()
            .returning(|draft| Ok(Course::register(draft)));

        let app = actix_test::init_service(test_app(state_with(courses))).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/courses")
            .set_json(json!({ "name": "Algorithms", "category": "CS" }))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        assert!(response.headers().contains_key(header::LOCATION));

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["name"], "Algorithms");
        assert_eq!(body["active"], true);
    }

    #[rstest]
    #[actix_web::test]
    async fn blocked_deletion_maps_to_409_with_the_reason() {
        let mut courses = MockCoursesService::new();
        courses.expect_deactivate().returning(|_| {
            Err(
                Error::conflict("cannot deactivate a course with associated topics")
                    .with_details(json!({ "code": "course_has_topics", "topics": 1 })),
            )
        });

        let app = actix_test::init_service(test_app(state_with(courses))).await;
        let request = actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/courses/{}", Uuid::new_v4()))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "conflict");
        assert_eq!(
            body["message"],
            "cannot deactivate a course with associated topics"
        );
        assert_eq!(body["details"]["code"], "course_has_topics");
    }

    #[rstest]
    #[actix_web::test]
    async fn unblocked_deletion_returns_no_content() {
        let mut courses = MockCoursesService::new();
        courses.expect_deactivate().returning(|_| Ok(()));

        let app = actix_test::init_service(test_app(state_with(courses))).await;
        let request = actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/courses/{}", Uuid::new_v4()))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
    }

    #[rstest]
    #[actix_web::test]
    async fn update_sends_only_supplied_fields_to_the_service() {
        let mut courses = MockCoursesService::new();
        courses
            .expect_update()
            .withf(|update| update.name.is_none() && update.category.as_deref() == Some("Maths"))
            .returning(|update| {
                let mut course = Course::register(NewCourse {
                    name: "Algorithms".to_owned(),
                    category: "CS".to_owned(),
                });
                course.apply_update(&update);
                Ok(course)
            });

        let app = actix_test::init_service(test_app(state_with(courses))).await;
        let request = actix_test::TestRequest::put()
            .uri("/api/v1/courses")
            .set_json(json!({ "courseId": Uuid::new_v4(), "category": "Maths" }))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert!(response.status().is_success());

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["category"], "Maths");
        assert_eq!(body["name"], "Algorithms");
    }
}
