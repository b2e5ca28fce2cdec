//! Deterministic in-memory repositories backing the lifecycle scenarios.
//!
//! One store implements all four repository ports so the domain services can
//! run end-to-end without a database. Pagination, sorting, the active-only
//! listing filters, and the course cascade mirror the Diesel adapters.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use pagination::{Page, PageRequest, SortOrder};
use uuid::Uuid;

use backend::domain::ports::{
    CourseRepository, CourseRepositoryError, ReplyRepository, ReplyRepositoryError,
    TopicRepository, TopicRepositoryError, UserRepository, UserRepositoryError,
};
use backend::domain::{
    Course, CourseId, CourseSortKey, Reply, ReplyId, ReplySortKey, Topic, TopicId, TopicSortKey,
    User, UserId, UserSortKey,
};

/// Shared in-memory store implementing every repository port.
#[derive(Default)]
pub struct InMemoryForumStore {
    users: Mutex<HashMap<Uuid, User>>,
    courses: Mutex<HashMap<Uuid, Course>>,
    topics: Mutex<HashMap<Uuid, Topic>>,
    replies: Mutex<HashMap<Uuid, Reply>>,
}

fn paginate<T>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let start = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let window = items
        .into_iter()
        .skip(start)
        .take(page.size() as usize)
        .collect();
    Page::from_request(window, page, total)
}

fn directed<T, K, F>(mut items: Vec<T>, order: SortOrder, key: F) -> Vec<T>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    items.sort_by(|a, b| key(a).cmp(&key(b)));
    if order == SortOrder::Descending {
        items.reverse();
    }
    items
}

#[async_trait]
impl UserRepository for InMemoryForumStore {
    async fn save(&self, user: &User) -> Result<(), UserRepositoryError> {
        self.users
            .lock()
            .expect("users mutex")
            .insert(*user.id.as_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.users.lock().expect("users mutex").get(id.as_uuid()).cloned())
    }

    async fn list_active(
        &self,
        sort: UserSortKey,
        page: PageRequest,
    ) -> Result<Page<User>, UserRepositoryError> {
        let items: Vec<User> = self
            .users
            .lock()
            .expect("users mutex")
            .values()
            .filter(|user| user.active)
            .cloned()
            .collect();
        let items = match sort {
            UserSortKey::Name => directed(items, page.order(), |user| user.name.clone()),
            UserSortKey::Email => directed(items, page.order(), |user| user.email.clone()),
        };
        Ok(paginate(items, page))
    }
}

#[async_trait]
impl CourseRepository for InMemoryForumStore {
    async fn save(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        self.courses
            .lock()
            .expect("courses mutex")
            .insert(*course.id.as_uuid(), course.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(self
            .courses
            .lock()
            .expect("courses mutex")
            .get(id.as_uuid())
            .cloned())
    }

    async fn list_active(
        &self,
        sort: CourseSortKey,
        page: PageRequest,
    ) -> Result<Page<Course>, CourseRepositoryError> {
        let items: Vec<Course> = self
            .courses
            .lock()
            .expect("courses mutex")
            .values()
            .filter(|course| course.active)
            .cloned()
            .collect();
        let items = match sort {
            CourseSortKey::Name => directed(items, page.order(), |course| course.name.clone()),
            CourseSortKey::Category => {
                directed(items, page.order(), |course| course.category.clone())
            }
            CourseSortKey::CreatedAt => directed(items, page.order(), |course| course.created_at),
        };
        Ok(paginate(items, page))
    }

    async fn remove(&self, id: &CourseId) -> Result<(), CourseRepositoryError> {
        // All three maps change under one set of held locks, so the cascade
        // is never observable half-done.
        let mut courses = self.courses.lock().expect("courses mutex");
        let mut topics = self.topics.lock().expect("topics mutex");
        let mut replies = self.replies.lock().expect("replies mutex");

        let owned: Vec<Uuid> = topics
            .values()
            .filter(|topic| topic.course_id == Some(*id))
            .map(|topic| *topic.id.as_uuid())
            .collect();

        replies.retain(|_, reply| !owned.contains(reply.topic_id.as_uuid()));
        topics.retain(|_, topic| topic.course_id != Some(*id));
        courses.remove(id.as_uuid());
        Ok(())
    }
}

#[async_trait]
impl TopicRepository for InMemoryForumStore {
    async fn save(&self, topic: &Topic) -> Result<(), TopicRepositoryError> {
        self.topics
            .lock()
            .expect("topics mutex")
            .insert(*topic.id.as_uuid(), topic.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TopicId) -> Result<Option<Topic>, TopicRepositoryError> {
        Ok(self
            .topics
            .lock()
            .expect("topics mutex")
            .get(id.as_uuid())
            .cloned())
    }

    async fn list(
        &self,
        sort: TopicSortKey,
        page: PageRequest,
    ) -> Result<Page<Topic>, TopicRepositoryError> {
        // Deliberately no active filter: soft-deleted topics stay listed.
        let items: Vec<Topic> = self
            .topics
            .lock()
            .expect("topics mutex")
            .values()
            .cloned()
            .collect();
        let items = match sort {
            TopicSortKey::CreatedAt => directed(items, page.order(), |topic| topic.created_at),
            TopicSortKey::Title => directed(items, page.order(), |topic| topic.title.clone()),
        };
        Ok(paginate(items, page))
    }

    async fn count_by_course(&self, course_id: &CourseId) -> Result<u64, TopicRepositoryError> {
        let count = self
            .topics
            .lock()
            .expect("topics mutex")
            .values()
            .filter(|topic| topic.course_id == Some(*course_id))
            .count();
        Ok(count as u64)
    }
}

#[async_trait]
impl ReplyRepository for InMemoryForumStore {
    async fn save(&self, reply: &Reply) -> Result<(), ReplyRepositoryError> {
        self.replies
            .lock()
            .expect("replies mutex")
            .insert(*reply.id.as_uuid(), reply.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ReplyId) -> Result<Option<Reply>, ReplyRepositoryError> {
        Ok(self
            .replies
            .lock()
            .expect("replies mutex")
            .get(id.as_uuid())
            .cloned())
    }

    async fn list(
        &self,
        sort: ReplySortKey,
        page: PageRequest,
    ) -> Result<Page<Reply>, ReplyRepositoryError> {
        // Deliberately no active filter: soft-deleted replies stay listed.
        let items: Vec<Reply> = self
            .replies
            .lock()
            .expect("replies mutex")
            .values()
            .cloned()
            .collect();
        let items = match sort {
            ReplySortKey::CreatedAt => directed(items, page.order(), |reply| reply.created_at),
        };
        Ok(paginate(items, page))
    }

    async fn list_by_topic(
        &self,
        topic_id: &TopicId,
        sort: ReplySortKey,
        page: PageRequest,
    ) -> Result<Page<Reply>, ReplyRepositoryError> {
        let items: Vec<Reply> = self
            .replies
            .lock()
            .expect("replies mutex")
            .values()
            .filter(|reply| reply.topic_id == *topic_id)
            .cloned()
            .collect();
        let items = match sort {
            ReplySortKey::CreatedAt => directed(items, page.order(), |reply| reply.created_at),
        };
        Ok(paginate(items, page))
    }
}
