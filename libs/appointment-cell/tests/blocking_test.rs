// libs/appointment-cell/tests/blocking_test.rs

use assert_matches::assert_matches;

use appointment_cell::models::{AppointmentError, BlockedDay, GlobalBlock, ToggleState};
use appointment_cell::services::BlockingService;
use shared_database::DatabaseError;
use shared_models::{Session, Weekday};
use shared_utils::test_utils::{count_rows, test_database};

fn blocked_day(doctor_id: &str, day: &str) -> BlockedDay {
    BlockedDay {
        doctor_id: doctor_id.to_string(),
        day: day.to_string(),
    }
}

fn global_block(doctor_id: &str, day_of_week: Weekday, session: Session) -> GlobalBlock {
    GlobalBlock {
        doctor_id: doctor_id.to_string(),
        day_of_week,
        session,
    }
}

#[tokio::test]
async fn blocked_day_toggles_on_and_off() {
    let db = test_database();
    let service = BlockingService::new(&db);

    let first = service.toggle_blocked_day(blocked_day("d1", "2026-03-01")).await.unwrap();
    assert_eq!(first, ToggleState::Blocked);
    assert_eq!(service.list_blocked_days("d1").await.unwrap(), vec!["2026-03-01"]);

    let second = service.toggle_blocked_day(blocked_day("d1", "2026-03-01")).await.unwrap();
    assert_eq!(second, ToggleState::Unblocked);
    assert!(service.list_blocked_days("d1").await.unwrap().is_empty());
    assert_eq!(count_rows(&db, "blocked_days").await, 0);
}

#[tokio::test]
async fn blocked_days_are_scoped_per_doctor() {
    let db = test_database();
    let service = BlockingService::new(&db);

    service.toggle_blocked_day(blocked_day("d1", "Mon")).await.unwrap();
    service.toggle_blocked_day(blocked_day("d1", "Tue")).await.unwrap();
    service.toggle_blocked_day(blocked_day("d2", "Mon")).await.unwrap();

    assert_eq!(service.list_blocked_days("d1").await.unwrap(), vec!["Mon", "Tue"]);
    assert_eq!(service.list_blocked_days("d2").await.unwrap(), vec!["Mon"]);
    assert!(service.list_blocked_days("d3").await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_day_is_rejected() {
    let db = test_database();

    let result = BlockingService::new(&db)
        .toggle_blocked_day(blocked_day("d1", "  "))
        .await;
    assert_matches!(result, Err(AppointmentError::ValidationError(_)));
}

#[tokio::test]
async fn global_block_toggles_on_and_off() {
    let db = test_database();
    let service = BlockingService::new(&db);
    let block = global_block("d1", Weekday::Wed, Session::Afternoon);

    assert!(service.toggle_global_block(block.clone()).await.unwrap().is_blocked());
    assert_eq!(
        service.list_global_blocks(vec!["d1".to_string()]).await.unwrap(),
        vec![block.clone()]
    );

    assert!(!service.toggle_global_block(block).await.unwrap().is_blocked());
    assert!(service
        .list_global_blocks(vec!["d1".to_string()])
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn global_blocks_are_distinct_per_session() {
    let db = test_database();
    let service = BlockingService::new(&db);

    service
        .toggle_global_block(global_block("d1", Weekday::Sun, Session::Morning))
        .await
        .unwrap();
    service
        .toggle_global_block(global_block("d1", Weekday::Sun, Session::Afternoon))
        .await
        .unwrap();
    service
        .toggle_global_block(global_block("d2", Weekday::Sun, Session::Morning))
        .await
        .unwrap();

    let both = service
        .list_global_blocks(vec!["d1".to_string(), "d2".to_string()])
        .await
        .unwrap();
    assert_eq!(both.len(), 3);

    let only_d2 = service.list_global_blocks(vec!["d2".to_string()]).await.unwrap();
    assert_eq!(only_d2, vec![global_block("d2", Weekday::Sun, Session::Morning)]);

    assert!(service.list_global_blocks(Vec::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn global_listing_skips_rows_with_unknown_codes() {
    let db = test_database();
    let service = BlockingService::new(&db);
    let block = global_block("d1", Weekday::Mon, Session::Morning);
    service.toggle_global_block(block.clone()).await.unwrap();

    db.call(|conn| {
        conn.execute(
            "INSERT INTO global_blocks (doctor_id, day_of_week, session) VALUES ('d1', 'Sat', 'Evening')",
            [],
        )?;
        Ok::<_, DatabaseError>(())
    })
    .await
    .unwrap();

    assert_eq!(service.list_global_blocks(vec!["d1".to_string()]).await.unwrap(), vec![block]);
}
