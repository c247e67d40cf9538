use taskpulse_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

fn lock<T>(collection: &Mutex<Vec<T>>) -> anyhow::Result<std::sync::MutexGuard<'_, Vec<T>>> {
    collection
        .lock()
        .map_err(|_| anyhow::Error::msg("Inmemory collection lock was poisoned"))
}

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) -> anyhow::Result<()> {
    lock(collection)?.push(val.clone());
    Ok(())
}

pub fn save<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) -> anyhow::Result<()> {
    let mut collection = lock(collection)?;
    match collection.iter_mut().find(|item| item.id() == val.id()) {
        Some(item) => {
            *item = val.clone();
            Ok(())
        }
        None => Err(anyhow::Error::msg(format!(
            "Unable to save entity with id: {}, it was not found",
            val.id()
        ))),
    }
}

/// Replaces the first item matching `compare` with `val`, or inserts `val`
/// if there is no match. Returns the stored value, which keeps the id of
/// the replaced item.
pub fn upsert_by<T: Clone, F: Fn(&T) -> bool, K: Fn(&mut T, &T)>(
    val: &T,
    collection: &Mutex<Vec<T>>,
    compare: F,
    keep_identity: K,
) -> anyhow::Result<T> {
    let mut collection = lock(collection)?;
    match collection.iter_mut().find(|item| compare(item)) {
        Some(item) => {
            let mut stored = val.clone();
            keep_identity(&mut stored, item);
            *item = stored.clone();
            Ok(stored)
        }
        None => {
            collection.push(val.clone());
            Ok(val.clone())
        }
    }
}

pub fn find<T: Clone + Entity>(
    val_id: &ID,
    collection: &Mutex<Vec<T>>,
) -> anyhow::Result<Option<T>> {
    let collection = lock(collection)?;
    Ok(collection.iter().find(|item| item.id() == val_id).cloned())
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> anyhow::Result<Vec<T>> {
    let collection = lock(collection)?;
    Ok(collection.iter().filter(|item| compare(item)).cloned().collect())
}

pub fn delete<T: Clone + Entity>(
    val_id: &ID,
    collection: &Mutex<Vec<T>>,
) -> anyhow::Result<Option<T>> {
    let mut collection = lock(collection)?;
    let deleted = collection
        .iter()
        .position(|item| item.id() == val_id)
        .map(|index| collection.remove(index));
    Ok(deleted)
}

pub fn find_and_delete_by<T: Clone, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> anyhow::Result<Vec<T>> {
    let mut collection = lock(collection)?;
    let mut deleted_items = Vec::new();
    let mut index = 0;
    while index < collection.len() {
        if compare(&collection[index]) {
            deleted_items.push(collection.remove(index));
        } else {
            index += 1;
        }
    }

    Ok(deleted_items)
}
