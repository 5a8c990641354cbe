use aws_config::{BehaviorVersion, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use std::env;
use std::error::Error;
use std::fmt::Display;
use tracing::debug;

use crate::errors::{StorageError, StorageResult};
use crate::storage::{ObjectId, ObjectPage, StorageAdapter, VersionPage};

pub const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY_ID";

/// Used when neither the environment nor the profile names a region.
/// Bucket enumeration is global, so this only matters for buckets living elsewhere.
const FALLBACK_REGION: &str = "us-east-1";

const MAX_KEYS: i32 = 1000;

fn request_error<E: Error + 'static>(err: E) -> StorageError {
    StorageError::Request(DisplayErrorContext(err).to_string())
}

fn connectivity_error<E: Error + 'static>(err: E) -> StorageError {
    StorageError::Connectivity(DisplayErrorContext(err).to_string())
}

/// Where the SDK should take its credentials from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CredentialSource {
    /// Whatever the default chain finds (`AWS_ACCESS_KEY_ID` & co).
    Environment,
    /// A named profile from `~/.aws/credentials` / `~/.aws/config`.
    Profile(String),
}

impl CredentialSource {
    /// `Environment` when an access key is exported, `None` when a profile is needed.
    pub fn from_env() -> Option<Self> {
        env::var(ACCESS_KEY_VAR)
            .is_ok_and(|key| !key.is_empty())
            .then_some(Self::Environment)
    }
}

impl Display for CredentialSource {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Environment => write!(f, "Using environment credentials"),
            Self::Profile(name) => write!(f, "Using profile: {name}"),
        }
    }
}

async fn load_sdk_config(source: &CredentialSource) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let CredentialSource::Profile(name) = source {
        loader = loader.profile_name(name);
    }

    let config = loader.load().await;
    if config.region().is_some() {
        return config;
    }

    debug!("no region configured, falling back to {FALLBACK_REGION}");
    config
        .into_builder()
        .region(Region::from_static(FALLBACK_REGION))
        .build()
}

/// Resolve credentials once so a missing profile fails at startup with a clear message.
async fn preflight_credentials(config: &SdkConfig) -> StorageResult<()> {
    let Some(provider) = config.credentials_provider() else {
        return Err(StorageError::Connectivity(
            "no credentials provider is configured".to_owned(),
        ));
    };

    provider
        .provide_credentials()
        .await
        .map_err(connectivity_error)?;

    Ok(())
}

/// [`StorageAdapter`] backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: Client,
}

impl S3Storage {
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn connect(source: &CredentialSource) -> StorageResult<Self> {
        let config = load_sdk_config(source).await;
        preflight_credentials(&config).await?;

        debug!(region = ?config.region(), "s3 client configured");

        Ok(Self::new(Client::new(&config)))
    }
}

impl StorageAdapter for S3Storage {
    async fn list_buckets(&self) -> StorageResult<Vec<String>> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(connectivity_error)?;

        Ok(output
            .buckets()
            .iter()
            .filter_map(|bucket| bucket.name())
            .map(str::to_owned)
            .collect())
    }

    async fn list_object_page(
        &self,
        bucket: &str,
        continuation: Option<String>,
    ) -> StorageResult<ObjectPage> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .max_keys(MAX_KEYS)
            .set_continuation_token(continuation)
            .send()
            .await
            .map_err(request_error)?;

        let keys = output
            .contents()
            .iter()
            .filter_map(|object| object.key())
            .map(str::to_owned)
            .collect();

        let next = if output.is_truncated().unwrap_or_default() {
            output.next_continuation_token().map(str::to_owned)
        } else {
            None
        };

        Ok(ObjectPage { keys, next })
    }

    async fn list_version_page(
        &self,
        bucket: &str,
    ) -> StorageResult<VersionPage> {
        let output = self
            .client
            .list_object_versions()
            .bucket(bucket)
            .max_keys(MAX_KEYS)
            .send()
            .await
            .map_err(request_error)?;

        let versions = output.versions().iter().filter_map(|version| {
            version.key().map(|key| ObjectId {
                key: key.to_owned(),
                version_id: version.version_id().map(str::to_owned),
            })
        });

        let markers = output.delete_markers().iter().filter_map(|marker| {
            marker.key().map(|key| ObjectId {
                key: key.to_owned(),
                version_id: marker.version_id().map(str::to_owned),
            })
        });

        Ok(VersionPage {
            objects: versions.chain(markers).collect(),
            truncated: output.is_truncated().unwrap_or_default(),
        })
    }

    async fn delete_objects(
        &self,
        bucket: &str,
        objects: &[ObjectId],
    ) -> StorageResult<()> {
        if objects.is_empty() {
            return Ok(());
        }

        let identifiers = objects
            .iter()
            .map(|object| {
                ObjectIdentifier::builder()
                    .key(&object.key)
                    .set_version_id(object.version_id.clone())
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(request_error)?;

        let delete = Delete::builder()
            .set_objects(Some(identifiers))
            .quiet(true)
            .build()
            .map_err(request_error)?;

        let output = self
            .client
            .delete_objects()
            .bucket(bucket)
            .delete(delete)
            .send()
            .await
            .map_err(request_error)?;

        // quiet mode: only failures are reported back
        if let Some(failure) = output.errors().first() {
            return Err(StorageError::DeleteFailed {
                key: failure.key().unwrap_or_default().to_owned(),
                message: failure
                    .message()
                    .or_else(|| failure.code())
                    .unwrap_or("unknown error")
                    .to_owned(),
            });
        }

        Ok(())
    }

    async fn delete_bucket(
        &self,
        bucket: &str,
    ) -> StorageResult<()> {
        self.client
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|err| {
                let code = err.as_service_error().and_then(|service| service.code());
                if code == Some("BucketNotEmpty") {
                    StorageError::BucketNotEmpty(bucket.to_owned())
                } else {
                    request_error(err)
                }
            })?;

        Ok(())
    }
}

