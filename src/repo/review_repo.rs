use crate::db::DbPool;
use crate::models::{Review, Store};
use crate::rating::{average_after_add, average_after_edit, average_after_remove};
use crate::repo::store_repo::{find_store, save_store_rating};
use crate::repo::user_repo::find_user;
use crate::schema::reviews;
use anyhow::Result;
use chrono::Utc;
use diesel::prelude::*;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Failure of a review mutation
#[derive(Error, Debug)]
pub enum ReviewError {
    /// A record the mutation depends on does not exist
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

impl From<diesel::result::Error> for ReviewError {
    fn from(err: diesel::result::Error) -> Self {
        ReviewError::Database(err.into())
    }
}

/// Retrieves a review by id, or `None` if there is no such review
pub fn get_review(pool: &DbPool, id: &str) -> Result<Option<Review>> {
    let conn = &mut pool.get()?;
    find_review(conn, id)
}

fn find_review(conn: &mut SqliteConnection, id: &str) -> Result<Option<Review>> {
    let result = reviews::table
        .find(id)
        .select(Review::as_select())
        .first(conn)
        .optional()?;
    Ok(result)
}

/// Lists every review stored for a store, oldest first
pub fn list_reviews_for_store(pool: &DbPool, store_id: &str) -> Result<Vec<Review>> {
    let conn = &mut pool.get()?;
    let result = reviews::table
        .filter(reviews::store_id.eq(store_id))
        .order(reviews::id.asc())
        .select(Review::as_select())
        .load(conn)?;
    Ok(result)
}

/// Records a review of a store and folds its grade into the store's rating
///
/// The review insert and the store update happen in one immediate
/// transaction, so concurrent reviews of the same store queue on the write
/// lock and every grade is counted exactly once.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `store_id` - The store being reviewed
/// * `user_id` - The author; their nickname and name are copied onto the review
/// * `grade` - The star grade, already validated
/// * `content` - The review text
///
/// ### Errors
///
/// - `NotFound("Store")` or `NotFound("User")` if either record is missing
/// - `Database` if any query fails; nothing is written in that case
#[instrument(skip(pool, content))]
pub async fn create_review(
    pool: &DbPool,
    store_id: &str,
    user_id: &str,
    grade: i32,
    content: String,
) -> Result<Review, ReviewError> {
    let conn = &mut pool.get().map_err(anyhow::Error::from)?;

    let review = conn.immediate_transaction::<_, ReviewError, _>(|conn| {
        let mut store = find_store(conn, store_id)?.ok_or(ReviewError::NotFound("Store"))?;
        let author = find_user(conn, user_id)?.ok_or(ReviewError::NotFound("User"))?;

        let review = Review::new(store_id, &author, grade, content);
        diesel::insert_into(reviews::table)
            .values(&review)
            .execute(conn)?;

        let average = average_after_add(store.get_star_rating(), store.review_count(), grade);
        store.set_star_rating(average);
        store.get_review_ids_mut().push(review.get_id());
        save_store_rating(conn, &store)?;

        Ok(review)
    })?;

    info!("Recorded review {}", review.get_id());
    Ok(review)
}

/// Changes the grade and text of a review and adjusts the store's rating
///
/// The rating is only adjusted when the store actually lists the review.
///
/// ### Returns
///
/// The store after its rating was updated
///
/// ### Errors
///
/// - `NotFound("Review")` if there is no review with `review_id`
/// - `NotFound("Store")` if the reviewed store has disappeared
/// - `Database` if any query fails; nothing is written in that case
#[instrument(skip(pool, content))]
pub async fn edit_review(
    pool: &DbPool,
    review_id: &str,
    grade: i32,
    content: String,
) -> Result<Store, ReviewError> {
    let conn = &mut pool.get().map_err(anyhow::Error::from)?;

    conn.immediate_transaction::<_, ReviewError, _>(|conn| {
        let review = find_review(conn, review_id)?.ok_or(ReviewError::NotFound("Review"))?;
        let previous = review.get_grade();

        diesel::update(reviews::table.find(review_id))
            .set((
                reviews::grade.eq(grade),
                reviews::content.eq(content),
                reviews::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)?;

        let mut store = find_store(conn, &review.get_store_id())?
            .ok_or(ReviewError::NotFound("Store"))?;
        if store.get_review_ids().contains(review_id) {
            let average =
                average_after_edit(store.get_star_rating(), store.review_count(), previous, grade);
            store.set_star_rating(average);
            save_store_rating(conn, &store)?;
            debug!("Review grade changed from {} to {}", previous, grade);
        } else {
            debug!("Store {} did not list review {}", store.get_id(), review_id);
        }

        Ok(store)
    })
}

/// Deletes a review and takes its grade out of the store's rating
///
/// The rating is only adjusted when the store actually lists the review;
/// removing the last listed review resets the rating to 0.
///
/// ### Returns
///
/// The store after the review was removed from it
///
/// ### Errors
///
/// - `NotFound("Review")` if there is no review with `review_id`
/// - `Database` if any query fails; nothing is written in that case
#[instrument(skip(pool))]
pub async fn delete_review(pool: &DbPool, review_id: &str) -> Result<Store, ReviewError> {
    let conn = &mut pool.get().map_err(anyhow::Error::from)?;

    conn.immediate_transaction::<_, ReviewError, _>(|conn| {
        let review = find_review(conn, review_id)?.ok_or(ReviewError::NotFound("Review"))?;
        let mut store = find_store(conn, &review.get_store_id())?
            .ok_or(ReviewError::NotFound("Store"))?;

        let count = store.review_count();
        if store.get_review_ids_mut().remove(review_id) {
            let average = average_after_remove(store.get_star_rating(), count, review.get_grade());
            store.set_star_rating(average);
            save_store_rating(conn, &store)?;
        } else {
            debug!("Store {} did not list review {}", store.get_id(), review_id);
        }

        diesel::delete(reviews::table.find(review_id)).execute(conn)?;
        Ok(store)
    })
}
