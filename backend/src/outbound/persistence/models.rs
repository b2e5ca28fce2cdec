//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Each table gets a read row plus a record
//! struct that serves both inserts and upsert changesets.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{courses, replies, topics, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub telephone: Option<String>,
    pub profile: String,
    pub active: bool,
}

/// Record struct for inserting and upserting user rows.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserRecord<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub telephone: Option<&'a str>,
    pub profile: &'a str,
    pub active: bool,
}

/// Row struct for reading from the courses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Record struct for inserting and upserting course rows.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = courses)]
pub(crate) struct CourseRecord<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub category: &'a str,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the topics table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = topics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TopicRow {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub active: bool,
    pub user_id: Uuid,
    pub course_id: Option<Uuid>,
}

/// Record struct for inserting and upserting topic rows.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = topics)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TopicRecord<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub message: &'a str,
    pub created_at: DateTime<Utc>,
    pub status: &'a str,
    pub active: bool,
    pub user_id: Uuid,
    pub course_id: Option<Uuid>,
}

/// Row struct for reading from the replies table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = replies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReplyRow {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub solution: bool,
    pub active: bool,
    pub topic_id: Uuid,
    pub user_id: Uuid,
}

/// Record struct for inserting and upserting reply rows.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = replies)]
pub(crate) struct ReplyRecord<'a> {
    pub id: Uuid,
    pub message: &'a str,
    pub created_at: DateTime<Utc>,
    pub solution: bool,
    pub active: bool,
    pub topic_id: Uuid,
    pub user_id: Uuid,
}
