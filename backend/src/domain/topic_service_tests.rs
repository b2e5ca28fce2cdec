//! Behaviour coverage for the topic lifecycle service.

use std::sync::Arc;

use pagination::{Page, PageRequest};
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockCourseRepository, MockTopicRepository, MockUserRepository};
use crate::domain::{
    Course, CourseId, ErrorCode, NewCourse, NewUser, Profile, TopicStatus, User, UserId,
};

fn author() -> User {
    User::register(NewUser {
        name: "Alan Turing".to_owned(),
        email: "alan@example.org".to_owned(),
        password: "$2a$10$hash".to_owned(),
        telephone: None,
        profile: Profile::User,
    })
}

fn algorithms() -> Course {
    Course::register(NewCourse {
        name: "Algorithms".to_owned(),
        category: "CS".to_owned(),
    })
}

fn draft(user_id: UserId, course_id: Option<CourseId>) -> NewTopic {
    NewTopic {
        title: "Lifetime puzzle".to_owned(),
        message: "What does 'static really mean here?".to_owned(),
        status: TopicStatus::default(),
        user_id,
        course_id,
    }
}

#[rstest]
#[tokio::test]
async fn open_requires_an_existing_author() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let mut topics = MockTopicRepository::new();
    topics.expect_save().never();

    let courses = MockCourseRepository::new();

    let service = TopicsServiceImpl::new(Arc::new(topics), Arc::new(users), Arc::new(courses));
    let err = service
        .open(draft(UserId::random(), None))
        .await
        .expect_err("missing author");

    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(err.message, "user not found");
}

#[rstest]
#[tokio::test]
async fn open_requires_the_course_to_resolve_when_supplied() {
    let user = author();
    let user_id = user.id;

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(user.clone())));

    let mut courses = MockCourseRepository::new();
    courses.expect_find_by_id().returning(|_| Ok(None));

    let mut topics = MockTopicRepository::new();
    topics.expect_save().never();

    let service = TopicsServiceImpl::new(Arc::new(topics), Arc::new(users), Arc::new(courses));
    let err = service
        .open(draft(user_id, Some(CourseId::random())))
        .await
        .expect_err("missing course");

    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(err.message, "course not found");
}

#[rstest]
#[tokio::test]
async fn open_without_a_course_skips_the_course_lookup() {
    let user = author();
    let user_id = user.id;

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(user.clone())));

    let mut courses = MockCourseRepository::new();
    courses.expect_find_by_id().never();

    let mut topics = MockTopicRepository::new();
    topics
        .expect_save()
        .withf(|topic| topic.active && topic.status == TopicStatus::NoResponse)
        .once()
        .returning(|_| Ok(()));

    let service = TopicsServiceImpl::new(Arc::new(topics), Arc::new(users), Arc::new(courses));
    let topic = service
        .open(draft(user_id, None))
        .await
        .expect("course-less topic");

    assert_eq!(topic.user_id, user_id);
    assert!(topic.course_id.is_none());
}

#[rstest]
#[tokio::test]
async fn open_attaches_the_resolved_course() {
    let user = author();
    let user_id = user.id;
    let course = algorithms();
    let course_id = course.id;

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(user.clone())));

    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .returning(move |_| Ok(Some(course.clone())));

    let mut topics = MockTopicRepository::new();
    topics.expect_save().once().returning(|_| Ok(()));

    let service = TopicsServiceImpl::new(Arc::new(topics), Arc::new(users), Arc::new(courses));
    let topic = service
        .open(draft(user_id, Some(course_id)))
        .await
        .expect("topic under course");

    assert_eq!(topic.course_id, Some(course_id));
}

#[rstest]
#[tokio::test]
async fn update_of_missing_topic_is_not_found() {
    let mut topics = MockTopicRepository::new();
    topics.expect_find_by_id().returning(|_| Ok(None));
    topics.expect_save().never();

    let service = TopicsServiceImpl::new(
        Arc::new(topics),
        Arc::new(MockUserRepository::new()),
        Arc::new(MockCourseRepository::new()),
    );
    let err = service
        .update(TopicUpdate {
            id: TopicId::random(),
            title: None,
            message: None,
            status: Some(TopicStatus::Closed),
        })
        .await
        .expect_err("missing");

    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(err.message, "topic not found");
}

#[rstest]
#[tokio::test]
async fn deactivate_saves_the_inactive_topic() {
    let stored = Topic::open(draft(UserId::random(), None));
    let id = stored.id;

    let mut topics = MockTopicRepository::new();
    topics
        .expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    topics
        .expect_save()
        .withf(|topic| !topic.active)
        .once()
        .returning(|_| Ok(()));

    let service = TopicsServiceImpl::new(
        Arc::new(topics),
        Arc::new(MockUserRepository::new()),
        Arc::new(MockCourseRepository::new()),
    );
    service.deactivate(id).await.expect("deactivation");
}

#[rstest]
#[tokio::test]
async fn list_includes_inactive_topics() {
    let mut inactive = Topic::open(draft(UserId::random(), None));
    inactive.deactivate();

    let mut topics = MockTopicRepository::new();
    topics.expect_list().returning(move |_, page| {
        let active = Topic::open(draft(UserId::random(), None));
        Ok(Page::from_request(vec![active, inactive.clone()], page, 2))
    });

    let service = TopicsServiceImpl::new(
        Arc::new(topics),
        Arc::new(MockUserRepository::new()),
        Arc::new(MockCourseRepository::new()),
    );
    let page = service
        .list(TopicSortKey::CreatedAt, PageRequest::default())
        .await
        .expect("listing");

    // The listing keeps soft-deleted rows, unlike users and courses.
    assert!(page.items().iter().any(|topic| !topic.active));
}
