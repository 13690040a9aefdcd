//! Source persistence (pipeline stage 3)
//!
//! Staged files are content-addressed: the handle is the SHA-256 hash
//! of the decoded bytes plus the file-type extension. Identical
//! payloads dedupe to the same handle; distinct payloads cannot
//! collide, so concurrent uploads need no coordination.

use super::PipelineError;
use crate::models::Source;
use impsrv_common::StagingArea;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Writes decoded payloads into the staging area and hands back the
/// relative file handle
pub struct SourcePersister {
    staging: Arc<dyn StagingArea>,
}

impl SourcePersister {
    pub fn new(staging: Arc<dyn StagingArea>) -> Self {
        Self { staging }
    }

    /// Persist `bytes` under a content-addressed handle
    ///
    /// On success the file at `staging_root/<handle>` reads back
    /// byte-for-byte as `bytes`. On failure no usable handle exists.
    pub async fn persist(&self, bytes: Vec<u8>, file_type: &str) -> Result<Source, PipelineError> {
        let handle = format!("{}.{}", Self::content_hash(&bytes), file_type);

        let staging = Arc::clone(&self.staging);
        let write_handle = handle.clone();
        let byte_count = bytes.len();

        // Hashing is done; the blocking part is the filesystem write.
        // A join error means the write task itself crashed, which is
        // an infrastructure fault, not a storage failure.
        tokio::task::spawn_blocking(move || staging.write_file(&write_handle, &bytes))
            .await
            .map_err(|e| PipelineError::Infrastructure(format!("Write task failed: {}", e)))?
            .map_err(|e| PipelineError::Persistence(e.to_string()))?;

        tracing::info!(
            handle = %handle,
            bytes = byte_count,
            "Persisted import source"
        );

        Ok(Source {
            import_data: handle,
        })
    }

    fn content_hash(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impsrv_common::VarStaging;

    fn persister() -> (tempfile::TempDir, Arc<VarStaging>, SourcePersister) {
        let dir = tempfile::tempdir().unwrap();
        let staging = Arc::new(VarStaging::create(dir.path()).unwrap());
        let persister = SourcePersister::new(staging.clone());
        (dir, staging, persister)
    }

    #[tokio::test]
    async fn persisted_file_reads_back_exactly() {
        let (_dir, staging, persister) = persister();
        let bytes = b"ABCDEFGHabcdefgh0123456789".to_vec();

        let source = persister.persist(bytes.clone(), "csv").await.unwrap();

        assert!(source.import_data.ends_with(".csv"));
        assert_eq!(staging.read_file(&source.import_data).unwrap(), bytes);
    }

    #[tokio::test]
    async fn binary_and_empty_payloads_round_trip() {
        let (_dir, staging, persister) = persister();

        let binary: Vec<u8> = (0u8..=255).collect();
        let source = persister.persist(binary.clone(), "bin").await.unwrap();
        assert_eq!(staging.read_file(&source.import_data).unwrap(), binary);

        let source = persister.persist(Vec::new(), "bin").await.unwrap();
        assert_eq!(
            staging.read_file(&source.import_data).unwrap(),
            Vec::<u8>::new()
        );
    }

    #[tokio::test]
    async fn identical_payloads_share_a_handle() {
        let (_dir, _staging, persister) = persister();
        let a = persister.persist(b"same".to_vec(), "csv").await.unwrap();
        let b = persister.persist(b"same".to_vec(), "csv").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn distinct_payloads_get_distinct_handles() {
        let (_dir, _staging, persister) = persister();
        let a = persister.persist(b"one".to_vec(), "csv").await.unwrap();
        let b = persister.persist(b"two".to_vec(), "csv").await.unwrap();
        assert_ne!(a.import_data, b.import_data);
    }

    #[tokio::test]
    async fn crashed_write_task_is_an_infrastructure_fault() {
        use std::path::Path;

        struct CrashingStaging;
        impl StagingArea for CrashingStaging {
            fn root(&self) -> &Path {
                Path::new("/nonexistent")
            }
            fn write_file(&self, _: &str, _: &[u8]) -> impsrv_common::Result<()> {
                panic!("staging backend gone")
            }
            fn read_file(&self, _: &str) -> impsrv_common::Result<Vec<u8>> {
                unimplemented!()
            }
            fn delete_file(&self, _: &str) -> impsrv_common::Result<()> {
                unimplemented!()
            }
        }

        let persister = SourcePersister::new(Arc::new(CrashingStaging));
        let err = persister.persist(b"abc".to_vec(), "csv").await.unwrap_err();
        assert!(matches!(err, PipelineError::Infrastructure(_)));
    }

    #[tokio::test]
    async fn handle_is_hash_dot_extension() {
        let (_dir, _staging, persister) = persister();
        let source = persister.persist(b"abc".to_vec(), "csv").await.unwrap();
        // sha256("abc")
        assert_eq!(
            source.import_data,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad.csv"
        );
    }
}
