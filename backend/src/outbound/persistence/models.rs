//! Internal Diesel row structs.
//!
//! These are persistence details and never cross into the domain. Conversion
//! into domain records happens in the repositories so unknown enum text in a
//! row surfaces as a query error rather than a panic.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{announcements, applications, ranks, rules, settings, tasks, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub discord: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub discord: Option<&'a str>,
    pub role: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = announcements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnnouncementRow {
    pub id: i32,
    pub content: String,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = announcements)]
pub(crate) struct NewAnnouncementRow<'a> {
    pub content: &'a str,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    pub id: i32,
    pub content: String,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub(crate) struct NewTaskRow<'a> {
    pub content: &'a str,
    pub created_by: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ApplicationRow {
    pub id: i32,
    pub user_id: i32,
    pub kind: String,
    pub char_name: Option<String>,
    pub discord: Option<String>,
    pub experience: Option<String>,
    pub joined_before: Option<String>,
    pub protocols: serde_json::Value,
    pub answers: serde_json::Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = applications)]
pub(crate) struct NewApplicationRow<'a> {
    pub user_id: i32,
    pub kind: &'a str,
    pub char_name: Option<&'a str>,
    pub discord: Option<&'a str>,
    pub experience: Option<&'a str>,
    pub joined_before: Option<&'a str>,
    pub protocols: serde_json::Value,
    pub answers: serde_json::Value,
    pub status: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SettingRow {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ranks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RankRow {
    pub id: i32,
    pub title: String,
    pub name: String,
    pub code: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ranks)]
pub(crate) struct NewRankRow<'a> {
    pub title: &'a str,
    pub name: &'a str,
    pub code: &'a str,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RuleRow {
    pub id: i32,
    pub content: String,
    pub category: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rules)]
pub(crate) struct NewRuleRow<'a> {
    pub content: &'a str,
    pub category: &'a str,
}
