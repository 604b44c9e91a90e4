//! File-backed persistence across restarts

use std::sync::Arc;

use gearloan::{
    models::Settings,
    repository::{Collection, FileBackend, Repository},
};

use crate::common::{harness_with, STUDENT_EMAIL};

async fn file_repository(dir: &std::path::Path) -> Repository {
    Repository::new(Arc::new(FileBackend::open(dir).await.unwrap()))
}

#[tokio::test]
async fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let (item_id, log_id) = {
        let h = harness_with(file_repository(dir.path()).await).await;
        let item = h.add_equipment("Ball", 3).await;
        let log = h.app.borrow(&h.student, item.id, 1, "p").await.unwrap();
        (item.id, log.id)
    };

    let reopened = file_repository(dir.path()).await;
    assert_eq!(reopened.equipment_get_by_id(item_id).await.unwrap().avail, 2);
    let open = reopened.logs_find_open(STUDENT_EMAIL, item_id).await.unwrap();
    assert_eq!(open.id, log_id);
    assert!(dir.path().join("settings.json").exists());
}

#[tokio::test]
async fn test_corrupt_documents_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ nope").unwrap();
    std::fs::write(dir.path().join("logs.json"), "[{\"id\": \"x\"}]").unwrap();

    let repository = file_repository(dir.path()).await;
    assert_eq!(repository.settings_get().await, Settings::default());
    assert!(repository.logs_list().await.is_empty());
    assert!(repository.exists(Collection::Settings).await.unwrap());
}
