use tracing::{debug, info};

use crate::errors::StorageResult;
use crate::storage::{DELETE_PAGE_SIZE, ObjectId, StorageAdapter};

/// Delete current objects page by page until the listing is no longer truncated.
///
/// Every round lists from the start: the previous page is gone by then.
async fn empty_current_objects<S: StorageAdapter>(
    storage: &S,
    bucket: &str,
) -> StorageResult<usize> {
    let mut deleted = 0;

    loop {
        let page = storage.list_object_page(bucket, None).await?;
        if page.keys.is_empty() {
            break;
        }

        let truncated = page.is_truncated();
        let objects: Vec<ObjectId> = page.keys.into_iter().map(ObjectId::current).collect();

        for chunk in objects.chunks(DELETE_PAGE_SIZE) {
            storage.delete_objects(bucket, chunk).await?;
            deleted += chunk.len();
            debug!(bucket, count = chunk.len(), "deleted page of objects");
        }

        if !truncated {
            break;
        }
    }

    Ok(deleted)
}

/// Same loop as [`empty_current_objects`], for versions and delete markers.
async fn empty_object_versions<S: StorageAdapter>(
    storage: &S,
    bucket: &str,
) -> StorageResult<usize> {
    let mut deleted = 0;

    loop {
        let page = storage.list_version_page(bucket).await?;
        if page.objects.is_empty() {
            break;
        }

        for chunk in page.objects.chunks(DELETE_PAGE_SIZE) {
            storage.delete_objects(bucket, chunk).await?;
            deleted += chunk.len();
            debug!(bucket, count = chunk.len(), "deleted page of versions");
        }

        if !page.truncated {
            break;
        }
    }

    Ok(deleted)
}

/// Remove every object, object version and delete marker from `bucket`.
///
/// Returns the number of identifiers deleted. The first failing request aborts
/// the purge; whatever was deleted before that stays deleted.
pub async fn delete_all_objects<S: StorageAdapter>(
    storage: &S,
    bucket: &str,
) -> StorageResult<usize> {
    let current = empty_current_objects(storage, bucket).await?;
    let versions = empty_object_versions(storage, bucket).await?;

    info!(bucket, current, versions, "bucket emptied");

    Ok(current + versions)
}

/// Every key in `bucket`, following continuation tokens.
pub async fn list_all_keys<S: StorageAdapter>(
    storage: &S,
    bucket: &str,
) -> StorageResult<Vec<String>> {
    let mut keys = Vec::new();
    let mut continuation = None;

    loop {
        let page = storage.list_object_page(bucket, continuation).await?;
        keys.extend(page.keys);

        match page.next {
            Some(token) => continuation = Some(token),
            None => break,
        }
    }

    Ok(keys)
}
