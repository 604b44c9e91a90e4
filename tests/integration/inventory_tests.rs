//! Admin inventory management and undo

use gearloan::{models::EquipmentDraft, AppError};

use crate::common::harness;

#[tokio::test]
async fn test_bulk_delete_then_undo() {
    let h = harness().await;
    let a = h.add_equipment("A", 1).await;
    let b = h.add_equipment("B", 2).await;
    let c = h.add_equipment("C", 3).await;

    let ticket = h
        .app
        .bulk_delete_equipment(&h.admin, &[a.id, c.id])
        .await
        .unwrap()
        .unwrap();
    let ids: Vec<u64> = h.app.equipment().await.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![b.id]);
    assert!(h.notifier.titles().contains(&"Bulk Deleted".to_string()));

    let restored = h.app.undo(&h.admin, ticket.id).await.unwrap();
    assert_eq!(restored.len(), 2);
    assert_eq!(h.app.equipment().await.len(), 3);
    assert_eq!(h.item(c.id).await, c);

    assert!(matches!(
        h.app.undo(&h.admin, ticket.id).await,
        Err(AppError::UndoUnavailable(_))
    ));
}

#[tokio::test]
async fn test_students_cannot_manage_inventory() {
    let h = harness().await;
    let draft = EquipmentDraft {
        id: None,
        name: "Ball".to_string(),
        category: "Soccer".to_string(),
        total: 1,
        avail: 1,
        photo: String::new(),
    };

    assert!(matches!(
        h.app.save_equipment(&h.student, draft).await,
        Err(AppError::Authorization(_))
    ));
    assert!(h.app.all_history(&h.student).await.is_err());
    assert!(h.notifier.titles().contains(&"Permission Denied".to_string()));
    assert!(h.app.equipment().await.is_empty());
}

#[tokio::test]
async fn test_stats_and_activity() {
    let h = harness().await;
    let ball = h.add_equipment("Ball", 4).await;
    let net = h.add_equipment("Net", 2).await;

    h.app.borrow(&h.student, ball.id, 3, "p").await.unwrap();
    h.app.borrow(&h.admin, net.id, 1, "p").await.unwrap();
    h.app.return_item(&h.admin, net.id, "r").await.unwrap();

    // Students see the same counters as admins
    let stats = h.app.stats().await;
    assert_eq!(stats.total, 6);
    assert_eq!(stats.avail, 3);
    assert_eq!(stats.borrowed, 3);

    let history = h.app.all_history(&h.admin).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].equipment_id, net.id);
}
