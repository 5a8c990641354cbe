use crate::errors::StorageResult;

/// Maximum number of keys a single bulk delete accepts (and a listing page returns).
pub const DELETE_PAGE_SIZE: usize = 1000;

/// One page of current objects. `next` holds the continuation token when the page is truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectPage {
    pub keys: Vec<String>,
    pub next: Option<String>,
}

impl ObjectPage {
    pub const fn is_truncated(&self) -> bool {
        self.next.is_some()
    }
}

/// Key plus optional version; a delete marker is addressed the same way as a version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId {
    pub key: String,
    pub version_id: Option<String>,
}

impl ObjectId {
    pub fn current<S: Into<String>>(key: S) -> Self {
        Self {
            key: key.into(),
            version_id: None,
        }
    }

    pub fn versioned<S: Into<String>, V: Into<String>>(
        key: S,
        version_id: V,
    ) -> Self {
        Self {
            key: key.into(),
            version_id: Some(version_id.into()),
        }
    }
}

/// First page of object versions and delete markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionPage {
    pub objects: Vec<ObjectId>,
    pub truncated: bool,
}

/// Everything the menu needs from an object store.
///
/// Implementations only perform single requests; looping over pages lives in
/// [`crate::purge`] and [`crate::inventory::count_objects`] so every backend
/// shares the same pagination behaviour.
pub trait StorageAdapter {
    async fn list_buckets(&self) -> StorageResult<Vec<String>>;

    async fn list_object_page(
        &self,
        bucket: &str,
        continuation: Option<String>,
    ) -> StorageResult<ObjectPage>;

    async fn list_version_page(
        &self,
        bucket: &str,
    ) -> StorageResult<VersionPage>;

    /// A single bulk delete of at most [`DELETE_PAGE_SIZE`] objects.
    async fn delete_objects(
        &self,
        bucket: &str,
        objects: &[ObjectId],
    ) -> StorageResult<()>;

    async fn delete_bucket(
        &self,
        bucket: &str,
    ) -> StorageResult<()>;
}
