//! Shared fixtures

use std::sync::Arc;

use gearloan::{
    config::AppConfig,
    models::{Equipment, EquipmentDraft, Registration, Role},
    ports::{FixedConfirmation, Notification, Notifier},
    repository::Repository,
    services::Services,
    CheckoutApp, Session,
};
use std::sync::Mutex;

pub const ADMIN_EMAIL: &str = "coach@school.edu";
pub const STUDENT_EMAIL: &str = "a@x.com";
pub const PASSWORD: &str = "letmein42";

/// Notifier that keeps every notification for later assertions
#[derive(Default)]
pub struct RecordingNotifier {
    pub seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn titles(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.title.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

pub struct Harness {
    pub app: CheckoutApp,
    pub repository: Repository,
    pub notifier: Arc<RecordingNotifier>,
    pub admin: Session,
    pub student: Session,
}

/// App over an in-memory store with one admin and one student signed in
pub async fn harness() -> Harness {
    harness_with(Repository::in_memory()).await
}

pub async fn harness_with(repository: Repository) -> Harness {
    let config = AppConfig::default();
    let services = Services::new(repository.clone(), &config);
    let notifier = Arc::new(RecordingNotifier::default());
    let app = CheckoutApp::new(
        services,
        notifier.clone(),
        Arc::new(FixedConfirmation(true)),
    );
    app.start().await.unwrap();

    app.sign_up(Registration {
        email: ADMIN_EMAIL.to_string(),
        password: PASSWORD.to_string(),
        role: Role::Admin,
        admin_code: Some(config.auth.admin_code.clone()),
    })
    .await
    .unwrap();
    app.sign_up(Registration {
        email: STUDENT_EMAIL.to_string(),
        password: PASSWORD.to_string(),
        role: Role::Student,
        admin_code: None,
    })
    .await
    .unwrap();

    let admin = app.log_in(ADMIN_EMAIL, PASSWORD).await.unwrap();
    let student = app.log_in(STUDENT_EMAIL, PASSWORD).await.unwrap();

    Harness {
        app,
        repository,
        notifier,
        admin,
        student,
    }
}

impl Harness {
    pub async fn add_equipment(&self, name: &str, total: u32) -> Equipment {
        self.app
            .save_equipment(
                &self.admin,
                EquipmentDraft {
                    id: None,
                    name: name.to_string(),
                    category: "Basketball".to_string(),
                    total,
                    avail: total,
                    photo: String::new(),
                },
            )
            .await
            .unwrap()
    }

    pub async fn item(&self, id: u64) -> Equipment {
        self.repository.equipment_get_by_id(id).await.unwrap()
    }

    /// Availability plus open loan quantities equals total
    pub async fn assert_conserved(&self, id: u64) {
        let item = self.item(id).await;
        let open: u64 = self
            .repository
            .logs_list()
            .await
            .iter()
            .filter(|l| l.is_open() && l.equipment_id == id)
            .map(|l| l.quantity as u64)
            .sum();
        assert_eq!(item.avail as u64 + open, item.total as u64);
        assert!(item.avail <= item.total);
    }
}
