use std::fmt::Display;
use tracing::warn;

use crate::errors::{BucketUtilError, StorageResult};
use crate::storage::StorageAdapter;

/// Buckets whose name contains this are never offered in the menu.
pub const DEFAULT_EXCLUDE_MARKER: &str = "do-not-delete";

/// Listing pages read per bucket when counting; larger buckets show a lower bound.
pub const COUNT_PAGE_LIMIT: usize = 5;

/// Number of objects in a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectCount {
    Known(usize),
    /// Counting stopped at [`COUNT_PAGE_LIMIT`] pages; the bucket holds more.
    AtLeast(usize),
    /// Counting failed.
    Unknown,
}

impl ObjectCount {
    /// Only a known zero is empty; `Unknown` is not.
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Known(0))
    }
}

impl Display for ObjectCount {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Known(count) => write!(f, "{count}"),
            Self::AtLeast(count) => write!(f, "{count}+"),
            Self::Unknown => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketSummary {
    pub id: usize,
    pub name: String,
    pub objects: ObjectCount,
}

impl BucketSummary {
    pub fn new<S: Into<String>>(
        id: usize,
        name: S,
        objects: ObjectCount,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            objects,
        }
    }
}

/// Count current objects, reading at most [`COUNT_PAGE_LIMIT`] listing pages.
pub async fn count_objects<S: StorageAdapter>(
    storage: &S,
    bucket: &str,
) -> StorageResult<ObjectCount> {
    let mut count = 0;
    let mut continuation = None;

    for _ in 0..COUNT_PAGE_LIMIT {
        let page = storage.list_object_page(bucket, continuation).await?;
        count += page.keys.len();

        match page.next {
            Some(token) => continuation = Some(token),
            None => return Ok(ObjectCount::Known(count)),
        }
    }

    Ok(ObjectCount::AtLeast(count))
}

/// The buckets shown in the menu, in the order the provider enumerated them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    buckets: Vec<BucketSummary>,
}

impl Inventory {
    /// Number buckets 1..=n in the given order.
    pub fn from_counts<S: Into<String>>(
        entries: impl IntoIterator<Item = (S, ObjectCount)>,
    ) -> Self {
        let buckets = entries
            .into_iter()
            .enumerate()
            .map(|(index, (name, objects))| BucketSummary::new(index + 1, name, objects))
            .collect();

        Self { buckets }
    }

    /// One `list_buckets` call plus one count per bucket that survives the exclusion filter.
    pub async fn load<S: StorageAdapter>(
        storage: &S,
        exclude_marker: &str,
    ) -> StorageResult<Self> {
        let names = storage.list_buckets().await?;

        let mut entries = Vec::with_capacity(names.len());
        for name in names {
            if !exclude_marker.is_empty() && name.contains(exclude_marker) {
                continue;
            }

            let objects = match count_objects(storage, &name).await {
                Ok(count) => count,
                Err(err) => {
                    warn!(bucket = %name, error = %err, "could not count objects");
                    ObjectCount::Unknown
                }
            };
            entries.push((name, objects));
        }

        Ok(Self::from_counts(entries))
    }

    pub fn buckets(&self) -> &[BucketSummary] {
        &self.buckets
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn find(
        &self,
        id: usize,
    ) -> Result<&BucketSummary, BucketUtilError> {
        self.buckets
            .iter()
            .find(|bucket| bucket.id == id)
            .ok_or(BucketUtilError::NoSuchBucket(id))
    }

    /// Drop a bucket; the remaining ids are left as they are.
    pub fn remove(
        &mut self,
        id: usize,
    ) -> Option<BucketSummary> {
        let index = self.buckets.iter().position(|bucket| bucket.id == id)?;
        Some(self.buckets.remove(index))
    }

    pub fn mark_empty(
        &mut self,
        id: usize,
    ) {
        if let Some(bucket) = self.buckets.iter_mut().find(|bucket| bucket.id == id) {
            bucket.objects = ObjectCount::Known(0);
        }
    }
}
