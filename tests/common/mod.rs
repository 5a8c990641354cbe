#![allow(dead_code)]

use bucket_util::errors::{StorageError, StorageResult};
use bucket_util::input::LineSource;
use bucket_util::storage::{DELETE_PAGE_SIZE, ObjectId, ObjectPage, StorageAdapter, VersionPage};
use std::collections::{HashSet, VecDeque};
use std::io;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListBuckets,
    ListObjects(String, Option<String>),
    ListVersions(String),
    DeleteObjects(String, usize),
    DeleteBucket(String),
}

#[derive(Debug, Default)]
struct FakeBucket {
    name: String,
    objects: Vec<String>,
    versions: Vec<ObjectId>,
}

#[derive(Debug, Default)]
struct FakeState {
    buckets: Vec<FakeBucket>,
    uncountable: HashSet<String>,
    offline: bool,
    deny_deletes: bool,
    calls: Vec<Call>,
}

impl FakeState {
    fn bucket(
        &mut self,
        name: &str,
    ) -> StorageResult<&mut FakeBucket> {
        self.buckets
            .iter_mut()
            .find(|bucket| bucket.name == name)
            .ok_or_else(|| StorageError::Request(format!("NoSuchBucket: {name}")))
    }
}

/// In-memory object store that pages like S3: at most 1000 entries per listing.
#[derive(Debug, Default)]
pub struct FakeStorage {
    state: Mutex<FakeState>,
}

impl FakeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn with_bucket(
        self,
        name: &str,
        objects: usize,
    ) -> Self {
        self.with_versioned_bucket(name, objects, 0, 0)
    }

    pub fn with_versioned_bucket(
        self,
        name: &str,
        objects: usize,
        versions: usize,
        delete_markers: usize,
    ) -> Self {
        let mut bucket = FakeBucket {
            name: name.to_owned(),
            objects: (0..objects).map(|i| format!("object-{i:05}")).collect(),
            versions: Vec::new(),
        };
        bucket.versions.extend(
            (0..versions).map(|i| ObjectId::versioned(format!("old-{i:05}"), format!("v{i}"))),
        );
        bucket.versions.extend(
            (0..delete_markers)
                .map(|i| ObjectId::versioned(format!("gone-{i:05}"), format!("m{i}"))),
        );

        self.state().buckets.push(bucket);
        self
    }

    pub fn uncountable(
        self,
        name: &str,
    ) -> Self {
        self.state().uncountable.insert(name.to_owned());
        self
    }

    pub fn offline(self) -> Self {
        self.state().offline = true;
        self
    }

    pub fn deny_deletes(self) -> Self {
        self.state().deny_deletes = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn delete_rounds(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::DeleteObjects(..)))
            .count()
    }

    pub fn bucket_names(&self) -> Vec<String> {
        self.state().buckets.iter().map(|bucket| bucket.name.clone()).collect()
    }

    /// Current objects plus versions left in `name`, `None` once the bucket is gone.
    pub fn remaining(
        &self,
        name: &str,
    ) -> Option<usize> {
        self.state()
            .buckets
            .iter()
            .find(|bucket| bucket.name == name)
            .map(|bucket| bucket.objects.len() + bucket.versions.len())
    }
}

impl StorageAdapter for FakeStorage {
    async fn list_buckets(&self) -> StorageResult<Vec<String>> {
        let mut state = self.state();
        state.calls.push(Call::ListBuckets);
        if state.offline {
            return Err(StorageError::Connectivity("dispatch failure".to_owned()));
        }

        Ok(state.buckets.iter().map(|bucket| bucket.name.clone()).collect())
    }

    async fn list_object_page(
        &self,
        bucket: &str,
        continuation: Option<String>,
    ) -> StorageResult<ObjectPage> {
        let mut state = self.state();
        state
            .calls
            .push(Call::ListObjects(bucket.to_owned(), continuation.clone()));
        if state.uncountable.contains(bucket) {
            return Err(StorageError::Request("AccessDenied".to_owned()));
        }

        let objects = &state.bucket(bucket)?.objects;
        let start: usize = continuation.map_or(0, |token| token.parse().unwrap());
        let end = (start + DELETE_PAGE_SIZE).min(objects.len());

        Ok(ObjectPage {
            keys: objects[start.min(end)..end].to_vec(),
            next: (end < objects.len()).then(|| end.to_string()),
        })
    }

    async fn list_version_page(
        &self,
        bucket: &str,
    ) -> StorageResult<VersionPage> {
        let mut state = self.state();
        state.calls.push(Call::ListVersions(bucket.to_owned()));

        let versions = &state.bucket(bucket)?.versions;
        let end = DELETE_PAGE_SIZE.min(versions.len());

        Ok(VersionPage {
            objects: versions[..end].to_vec(),
            truncated: end < versions.len(),
        })
    }

    async fn delete_objects(
        &self,
        bucket: &str,
        objects: &[ObjectId],
    ) -> StorageResult<()> {
        let mut state = self.state();
        state
            .calls
            .push(Call::DeleteObjects(bucket.to_owned(), objects.len()));
        assert!(objects.len() <= DELETE_PAGE_SIZE, "bulk delete over the page size");

        if state.deny_deletes {
            return Err(StorageError::DeleteFailed {
                key: objects[0].key.clone(),
                message: "Access Denied".to_owned(),
            });
        }

        let target = state.bucket(bucket)?;
        for object in objects {
            match &object.version_id {
                None => target.objects.retain(|key| key != &object.key),
                Some(_) => target.versions.retain(|version| version != object),
            }
        }

        Ok(())
    }

    async fn delete_bucket(
        &self,
        bucket: &str,
    ) -> StorageResult<()> {
        let mut state = self.state();
        state.calls.push(Call::DeleteBucket(bucket.to_owned()));

        let target = state.bucket(bucket)?;
        if !target.objects.is_empty() || !target.versions.is_empty() {
            return Err(StorageError::BucketNotEmpty(bucket.to_owned()));
        }

        state.buckets.retain(|candidate| candidate.name != bucket);
        Ok(())
    }
}

/// Replays canned input lines and remembers the prompts it was shown.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            lines: lines.into_iter().map(str::to_owned).collect(),
            prompts: Vec::new(),
        }
    }
}

impl LineSource for ScriptedInput {
    async fn read_line(
        &mut self,
        prompt: &str,
    ) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_owned());
        Ok(self.lines.pop_front())
    }
}
