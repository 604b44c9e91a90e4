//! Borrow/return scenarios against the lending ledger

use gearloan::{models::EquipmentDraft, AppError};

use crate::common::{harness, STUDENT_EMAIL};

#[tokio::test]
async fn test_borrow_guard_and_return_scenario() {
    let h = harness().await;
    let ball = h.add_equipment("Basketball", 5).await;

    let log = h.app.borrow(&h.student, ball.id, 2, "photoA").await.unwrap();
    assert_eq!(h.item(ball.id).await.avail, 3);
    assert_eq!(log.quantity, 2);
    assert_eq!(log.email, STUDENT_EMAIL);
    assert!(log.return_at.is_none());
    h.assert_conserved(ball.id).await;

    // Caller-side guard, then the ledger's own re-check
    assert!(h.app.is_already_borrowing(&h.student, ball.id).await);
    let err = h.app.borrow(&h.student, ball.id, 1, "photoB").await.unwrap_err();
    assert!(matches!(err, AppError::AlreadyBorrowing { .. }));
    assert_eq!(h.item(ball.id).await.avail, 3);

    let returned = h.app.return_item(&h.student, ball.id, "photoC").await.unwrap();
    assert_eq!(returned.id, log.id);
    assert!(returned.return_at.is_some());
    assert_eq!(returned.return_photo.as_deref(), Some("photoC"));
    assert_eq!(h.item(ball.id).await.avail, 5);
    assert!(!h.app.is_already_borrowing(&h.student, ball.id).await);
    h.assert_conserved(ball.id).await;

    let history = h.app.my_history(&h.student).await;
    assert_eq!(history.len(), 1);
    assert!(!history[0].is_open());
}

#[tokio::test]
async fn test_two_users_share_availability() {
    let h = harness().await;
    let net = h.add_equipment("Net", 3).await;

    h.app.borrow(&h.student, net.id, 2, "p").await.unwrap();
    let err = h.app.borrow(&h.admin, net.id, 2, "p").await.unwrap_err();
    assert!(matches!(
        err,
        AppError::InsufficientAvailability {
            requested: 2,
            available: 1,
            ..
        }
    ));
    h.app.borrow(&h.admin, net.id, 1, "p").await.unwrap();
    assert_eq!(h.item(net.id).await.avail, 0);
    h.assert_conserved(net.id).await;

    h.app.return_item(&h.student, net.id, "r").await.unwrap();
    h.app.return_item(&h.admin, net.id, "r").await.unwrap();
    assert_eq!(h.item(net.id).await.avail, 3);
}

#[tokio::test]
async fn test_return_clamped_after_admin_lowers_total() {
    let h = harness().await;
    let cones = h.add_equipment("Cones", 10).await;
    h.app.borrow(&h.student, cones.id, 5, "p").await.unwrap();

    let mut edit = EquipmentDraft::from_existing(&h.item(cones.id).await);
    edit.total = 3;
    edit.avail = 0;
    h.app.save_equipment(&h.admin, edit).await.unwrap();

    h.app.return_item(&h.student, cones.id, "r").await.unwrap();
    let item = h.item(cones.id).await;
    assert_eq!(item.avail, 3);
    assert_eq!(item.total, 3);
}

#[tokio::test]
async fn test_deleted_equipment_keeps_logs() {
    let h = harness().await;
    let bat = h.add_equipment("Bat", 2).await;
    h.app.borrow(&h.student, bat.id, 1, "p").await.unwrap();

    h.app.delete_equipment(&h.admin, bat.id).await.unwrap();
    assert_eq!(h.repository.logs_list().await.len(), 1);

    let err = h.app.return_item(&h.student, bat.id, "r").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(!h.app.is_already_borrowing(&h.student, bat.id).await);
}

#[tokio::test]
async fn test_repeated_cycles_restore_availability() {
    let h = harness().await;
    let racket = h.add_equipment("Racket", 4).await;

    for quantity in 1..=4 {
        h.app.borrow(&h.student, racket.id, quantity, "p").await.unwrap();
        let item = h.item(racket.id).await;
        assert!(item.avail <= item.total);
        h.app.return_item(&h.student, racket.id, "r").await.unwrap();
        assert_eq!(h.item(racket.id).await.avail, 4);
    }
    let history = h.app.my_history(&h.student).await;
    let quantities: Vec<u32> = history.iter().map(|l| l.quantity).collect();
    assert_eq!(quantities, vec![4, 3, 2, 1]);
    assert_eq!(h.app.recent_activity(&h.admin).await.unwrap().len(), 4);
}
