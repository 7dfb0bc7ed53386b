// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use earthen_domain::NewsletterPost;
use tracing::debug;

use crate::diesel_schema::newsletter;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = newsletter)]
struct NewsletterRow {
    id: i64,
    title: String,
    slug: String,
    date: String,
    content: String,
    image: Option<String>,
}

impl From<NewsletterRow> for NewsletterPost {
    fn from(row: NewsletterRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            date: row.date,
            content: row.content,
            image: row.image,
        }
    }
}

backend_fn! {
/// Lists newsletter posts, latest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_newsletter_posts(conn: &mut _) -> Result<Vec<NewsletterPost>, PersistenceError> {
    let rows: Vec<NewsletterRow> = newsletter::table
        .select(NewsletterRow::as_select())
        .order_by((newsletter::date.desc(), newsletter::id.desc()))
        .load(conn)?;

    debug!(count = rows.len(), "Loaded newsletter posts");
    Ok(rows.into_iter().map(NewsletterPost::from).collect())
}
}

backend_fn! {
/// Finds a newsletter post by slug.
///
/// Slugs are not unique; the latest post with the slug wins.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no post has this slug.
pub fn get_newsletter_post_by_slug(
    conn: &mut _,
    slug: &str,
) -> Result<Option<NewsletterPost>, PersistenceError> {
    debug!(slug, "Looking up newsletter post");

    let row: Option<NewsletterRow> = newsletter::table
        .filter(newsletter::slug.eq(slug))
        .select(NewsletterRow::as_select())
        .order_by((newsletter::date.desc(), newsletter::id.desc()))
        .first(conn)
        .optional()?;

    Ok(row.map(NewsletterPost::from))
}
}
