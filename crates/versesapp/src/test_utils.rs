use crate::api::VersesApi;
use crate::store::fs_backend::FsBackend;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub api: VersesApi<FsBackend>,
    pub root: PathBuf,
}

impl TestEnv {
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().join("App_Data");
        let api = VersesApi::open(root.clone())
            .await
            .expect("failed to open store");
        Self {
            _temp_dir: temp_dir,
            api,
            root,
        }
    }

    pub fn read_raw(&self, file_name: &str) -> Option<String> {
        std::fs::read_to_string(self.root.join(file_name)).ok()
    }
}
