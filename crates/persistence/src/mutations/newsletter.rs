// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use earthen_domain::NewNewsletterPost;
use tracing::info;

use crate::backend::InsertedId;
use crate::diesel_schema::newsletter;
use crate::error::PersistenceError;
use crate::mutations::expect_one_row;

backend_fn! {
/// Inserts a newsletter post and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_newsletter_post(
    conn: &mut _,
    post: &NewNewsletterPost,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(newsletter::table)
        .values((
            newsletter::title.eq(&post.title),
            newsletter::slug.eq(&post.slug),
            newsletter::date.eq(&post.date),
            newsletter::content.eq(&post.content),
            newsletter::image.eq(post.image.as_deref()),
        ))
        .execute(conn)?;

    let id: i64 = conn.last_insert_id()?;

    info!(id, slug = %post.slug, "Created newsletter post");
    Ok(id)
}
}

backend_fn! {
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no post has this id, or an error
/// if the update fails.
pub fn update_newsletter_post(
    conn: &mut _,
    id: i64,
    post: &NewNewsletterPost,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(newsletter::table.filter(newsletter::id.eq(id)))
        .set((
            newsletter::title.eq(&post.title),
            newsletter::slug.eq(&post.slug),
            newsletter::date.eq(&post.date),
            newsletter::content.eq(&post.content),
            newsletter::image.eq(post.image.as_deref()),
        ))
        .execute(conn)?;

    expect_one_row(rows_affected, "Newsletter post", id)?;
    info!(id, slug = %post.slug, "Updated newsletter post");
    Ok(())
}
}

backend_fn! {
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no post has this id, or an error
/// if the delete fails.
pub fn delete_newsletter_post(conn: &mut _, id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize =
        diesel::delete(newsletter::table.filter(newsletter::id.eq(id))).execute(conn)?;

    expect_one_row(rows_affected, "Newsletter post", id)?;
    info!(id, "Deleted newsletter post");
    Ok(())
}
}
