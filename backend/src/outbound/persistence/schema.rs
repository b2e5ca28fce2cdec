//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Registered forum users.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Contact address, unique across users.
        email -> Varchar,
        /// Opaque credential blob.
        password -> Varchar,
        /// Optional contact number.
        telephone -> Nullable<Varchar>,
        /// Role label (ADMIN, MODERATOR, USER).
        profile -> Varchar,
        /// Logical liveness flag; soft-deleted rows keep their data.
        active -> Bool,
    }
}

diesel::table! {
    /// Courses grouping topics by subject area.
    courses (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Course title.
        name -> Varchar,
        /// Subject area label.
        category -> Varchar,
        /// Logical liveness flag.
        active -> Bool,
        /// Registration timestamp, set once.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Discussion topics.
    topics (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Headline shown in listings.
        title -> Varchar,
        /// Free-text body.
        message -> Text,
        /// Creation timestamp, set once.
        created_at -> Timestamptz,
        /// Discussion state label (NO_RESPONSE, UNSOLVED, SOLVED, CLOSED).
        status -> Varchar,
        /// Logical liveness flag.
        active -> Bool,
        /// Author foreign key.
        user_id -> Uuid,
        /// Owning course foreign key; topics may exist without a course.
        course_id -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Replies posted under topics.
    replies (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Free-text body.
        message -> Text,
        /// Creation timestamp, set once.
        created_at -> Timestamptz,
        /// Solution flag; independent across the replies of a topic.
        solution -> Bool,
        /// Logical liveness flag.
        active -> Bool,
        /// Owning topic foreign key.
        topic_id -> Uuid,
        /// Respondent foreign key.
        user_id -> Uuid,
    }
}

diesel::joinable!(topics -> users (user_id));
diesel::joinable!(topics -> courses (course_id));
diesel::joinable!(replies -> topics (topic_id));
diesel::joinable!(replies -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, courses, topics, replies);
