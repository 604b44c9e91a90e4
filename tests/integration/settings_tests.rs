//! Category taxonomy and branding

use gearloan::{
    models::{settings::LogoMode, EquipmentDraft},
    ports::NotificationLevel,
    AppError,
};

use crate::common::harness;

#[tokio::test]
async fn test_category_lifecycle() {
    let h = harness().await;

    let frisbee = h
        .app
        .add_category(&h.admin, "Frisbee", Some("data:image/png;base64,AA"))
        .await
        .unwrap();
    assert!(matches!(
        h.app.add_category(&h.admin, "FRISBEE", None).await,
        Err(AppError::DuplicateName(_))
    ));

    h.app
        .save_equipment(
            &h.admin,
            EquipmentDraft {
                id: None,
                name: "Disc".to_string(),
                category: "Frisbee".to_string(),
                total: 2,
                avail: 2,
                photo: String::new(),
            },
        )
        .await
        .unwrap();
    let inventory = h.app.equipment().await;
    let disc = &inventory[0];
    assert_eq!(disc.photo, "data:image/png;base64,AA");

    assert!(h.app.services().settings.is_category_in_use(frisbee.id).await);
    assert!(matches!(
        h.app.delete_category(&h.admin, frisbee.id).await,
        Err(AppError::CategoryInUse(_))
    ));

    h.app.delete_equipment(&h.admin, disc.id).await.unwrap();
    let removed = h.app.delete_category(&h.admin, frisbee.id).await.unwrap();
    assert_eq!(removed.map(|c| c.id), Some(frisbee.id));
    assert!(h.app.settings().await.category(frisbee.id).is_none());
}

#[tokio::test]
async fn test_renamed_category_leaves_dangling_reference() {
    let h = harness().await;
    let ball = h.add_equipment("Ball", 1).await;

    let mut settings = h.app.settings().await;
    settings.categories[0].name = "Hoops".to_string();
    h.app.update_settings(&h.admin, settings).await.unwrap();

    assert_eq!(h.item(ball.id).await.category, "Basketball");
    assert!(!h.app.services().settings.is_category_in_use(1).await);
}

#[tokio::test]
async fn test_branding_updates() {
    let h = harness().await;

    let updated = h
        .app
        .set_image_logo(&h.admin, "data:image/png;base64,BB")
        .await
        .unwrap();
    assert_eq!(updated.logo_mode, LogoMode::Image);
    assert_eq!(updated.categories.len(), 6);

    let updated = h.app.set_colors(&h.admin, "#000000", "#111111").await.unwrap();
    assert_eq!(updated.bg_color, "#000000");
    assert_eq!(updated.logo_data_url, "data:image/png;base64,BB");

    let updated = h.app.reset_colors(&h.admin).await.unwrap();
    assert_eq!(updated.bg_color, "#7C3AED");
    assert_eq!(updated.text_color, "#FFFFFF");

    let updated = h.app.set_icon_logo(&h.admin, "🏀").await.unwrap();
    assert_eq!(updated.logo_mode, LogoMode::Icon);
    assert_eq!(h.app.settings().await, updated);

    let seen = h.notifier.seen.lock().unwrap().clone();
    let logo_updates = seen.iter().filter(|n| n.title == "Logo updated").count();
    assert_eq!(logo_updates, 2);
    let reset = seen.iter().find(|n| n.title == "Colors Reset").unwrap();
    assert_eq!(reset.level, NotificationLevel::Info);
}

#[tokio::test]
async fn test_students_cannot_change_branding() {
    let h = harness().await;
    assert!(matches!(
        h.app.set_icon_logo(&h.student, "🏀").await,
        Err(AppError::Authorization(_))
    ));
    assert!(matches!(
        h.app.reset_colors(&h.student).await,
        Err(AppError::Authorization(_))
    ));
    assert_eq!(h.app.settings().await.icon, "🏃");
}
