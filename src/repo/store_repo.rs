use crate::db::DbPool;
use crate::models::Store;
use crate::schema::stores;
use anyhow::Result;
use diesel::prelude::*;
use tracing::{debug, instrument};

/// Registers a new store with no reviews and a rating of 0
#[instrument(skip(pool))]
pub async fn create_store(pool: &DbPool, name: String) -> Result<Store> {
    let conn = &mut pool.get()?;
    let new_store = Store::new(name);

    diesel::insert_into(stores::table)
        .values(&new_store)
        .execute(conn)?;

    debug!("Created store {}", new_store.get_id());
    Ok(new_store)
}

/// Retrieves a store by id, or `None` if there is no such store
pub fn get_store(pool: &DbPool, id: &str) -> Result<Option<Store>> {
    let conn = &mut pool.get()?;
    find_store(conn, id)
}

pub(crate) fn find_store(conn: &mut SqliteConnection, id: &str) -> Result<Option<Store>> {
    let result = stores::table
        .find(id)
        .select(Store::as_select())
        .first(conn)
        .optional()?;
    Ok(result)
}

/// Writes the store's rating and review list back in a single statement
pub(crate) fn save_store_rating(conn: &mut SqliteConnection, store: &Store) -> Result<()> {
    diesel::update(stores::table.find(store.get_id()))
        .set((
            stores::star_rating.eq(store.get_star_rating()),
            stores::review_ids.eq(store.get_review_ids()),
        ))
        .execute(conn)?;
    Ok(())
}
