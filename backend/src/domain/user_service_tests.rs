//! Behaviour coverage for the user lifecycle service.

use std::sync::Arc;

use pagination::{Page, PageRequest};
use rstest::rstest;

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{ErrorCode, Profile};

fn draft() -> NewUser {
    NewUser {
        name: "Grace Hopper".to_owned(),
        email: "grace@example.org".to_owned(),
        password: "$2a$10$hash".to_owned(),
        telephone: Some("555-0100".to_owned()),
        profile: Profile::Moderator,
    }
}

fn stored_user() -> User {
    User::register(draft())
}

#[rstest]
#[tokio::test]
async fn register_persists_an_active_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_save()
        .withf(|user| user.active && user.email == "grace@example.org")
        .once()
        .returning(|_| Ok(()));

    let service = UsersServiceImpl::new(Arc::new(repo));
    let user = service.register(draft()).await.expect("registration");

    assert!(user.active);
    assert_eq!(user.name, "Grace Hopper");
}

#[rstest]
#[tokio::test]
async fn get_maps_missing_user_to_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let service = UsersServiceImpl::new(Arc::new(repo));
    let err = service.get(UserId::random()).await.expect_err("missing");

    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(err.message, "user not found");
}

#[rstest]
#[tokio::test]
async fn update_overwrites_only_supplied_fields() {
    let stored = stored_user();
    let id = stored.id;
    let before = stored.clone();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    repo.expect_save()
        .withf(move |user| {
            user.email == "new@example.org"
                && user.name == before.name
                && user.password == before.password
                && user.telephone == before.telephone
        })
        .once()
        .returning(|_| Ok(()));

    let service = UsersServiceImpl::new(Arc::new(repo));
    let updated = service
        .update(UserUpdate {
            id,
            name: None,
            email: Some("new@example.org".to_owned()),
            password: None,
            telephone: None,
        })
        .await
        .expect("update");

    assert_eq!(updated.email, "new@example.org");
}

#[rstest]
#[tokio::test]
async fn update_of_missing_user_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));
    repo.expect_save().never();

    let service = UsersServiceImpl::new(Arc::new(repo));
    let err = service
        .update(UserUpdate {
            id: UserId::random(),
            name: Some("Nobody".to_owned()),
            email: None,
            password: None,
            telephone: None,
        })
        .await
        .expect_err("missing");

    assert_eq!(err.code, ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn deactivate_saves_the_inactive_user() {
    let stored = stored_user();
    let id = stored.id;

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    repo.expect_save()
        .withf(|user| !user.active)
        .once()
        .returning(|_| Ok(()));

    let service = UsersServiceImpl::new(Arc::new(repo));
    service.deactivate(id).await.expect("deactivation");
}

#[rstest]
#[tokio::test]
async fn deactivate_of_already_inactive_user_still_succeeds() {
    let mut stored = stored_user();
    stored.deactivate();
    let id = stored.id;

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    repo.expect_save()
        .withf(|user| !user.active)
        .once()
        .returning(|_| Ok(()));

    let service = UsersServiceImpl::new(Arc::new(repo));
    service.deactivate(id).await.expect("repeat deactivation");
}

#[rstest]
#[tokio::test]
async fn list_passes_the_page_through() {
    let mut repo = MockUserRepository::new();
    repo.expect_list_active().returning(|_, page| {
        Ok(Page::from_request(vec![stored_user()], page, 1))
    });

    let service = UsersServiceImpl::new(Arc::new(repo));
    let page = service
        .list(UserSortKey::Name, PageRequest::default())
        .await
        .expect("listing");

    assert_eq!(page.items().len(), 1);
    assert_eq!(page.total(), 1);
}

#[rstest]
#[tokio::test]
async fn connection_failures_surface_as_service_unavailable() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .returning(|_| Err(UserRepositoryError::connection("pool exhausted")));

    let service = UsersServiceImpl::new(Arc::new(repo));
    let err = service.get(UserId::random()).await.expect_err("unavailable");

    assert_eq!(err.code, ErrorCode::ServiceUnavailable);
}
