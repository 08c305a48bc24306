//! End-to-end board session: overview, drag and drop, inline creation

use chrono::NaiveDate;
use flowboard_kanban::{
    due_label, BoardDetail, BoardOverview, CardId, ColumnId, FlowboardConfig, Fixtures,
    KanbanContext, KanbanError, NotificationLevel, Urgency,
};

fn column(id: &str) -> ColumnId {
    ColumnId::from_string(id)
}

#[test_log::test(tokio::test)]
async fn test_board_session() {
    let ctx = KanbanContext::from_config(&FlowboardConfig::without_latency())
        .await
        .unwrap();

    let overview = BoardOverview::load(&ctx).await;
    let first = overview.sidebar_boards().remove(0);
    assert_eq!(overview.header().title, first.name);

    let mut detail = BoardDetail::load_board(ctx.clone(), &first.id).await;
    assert!(detail.error().is_none());

    // Drag "Set up analytics events" from To Do into Review
    assert!(detail.drag_start(&CardId::from_string("3")));
    detail.drag_over(&column("3"));
    let moved = detail.drop_on(&column("3")).await.unwrap();
    assert_eq!(moved.position, 1);

    // The service agrees with the local view
    let stored = ctx.cards().get_by_id(&moved.id).await.unwrap();
    assert_eq!(stored, moved);

    // Add a card to the column that just lost one
    detail.start_composing(&column("1"));
    detail.set_draft_title("Interview five customers");
    let created = detail.submit_card(&column("1")).await.unwrap();
    assert_eq!(created.position, 2);
    assert_eq!(ctx.cards().count().await, 9);

    let titles: Vec<&str> = detail
        .cards_for_column(&column("1"))
        .iter()
        .map(|c| c.title.as_str())
        .collect();
    assert_eq!(titles.last(), Some(&"Interview five customers"));

    let levels: Vec<NotificationLevel> = detail
        .take_notifications()
        .into_iter()
        .map(|n| n.level)
        .collect();
    assert_eq!(
        levels,
        vec![NotificationLevel::Success, NotificationLevel::Success]
    );

    // A column with cards cannot be deleted until they leave
    let err = ctx.delete_column(&column("3")).await.unwrap_err();
    assert!(matches!(err, KanbanError::ColumnNotEmpty { count: 2, .. }));
}

#[tokio::test]
async fn test_two_views_share_one_store() {
    let ctx = KanbanContext::in_memory(Fixtures::builtin().unwrap());
    let mut left = BoardDetail::load(ctx.clone()).await;
    let right = BoardDetail::load(ctx.clone()).await;

    left.drag_start(&CardId::from_string("7"));
    left.drop_on(&column("1")).await.unwrap();

    // The second view keeps its snapshot until it reloads
    assert_eq!(right.cards_for_column(&column("1")).len(), 3);
    let reloaded = BoardDetail::load(ctx).await;
    assert_eq!(reloaded.cards_for_column(&column("1")).len(), 4);
}

#[test]
fn test_fixture_due_dates_classify() {
    let fixtures = Fixtures::builtin().unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

    let card = fixtures.cards.iter().find(|c| c.id == "4").unwrap();
    // Stored as a timestamp; only the date counts
    assert_eq!(Urgency::for_card(card, today), Some(Urgency::DueSoon));
    assert_eq!(due_label(card.due_date.unwrap(), today), "Friday");

    let undated = fixtures.cards.iter().find(|c| c.id == "2").unwrap();
    assert_eq!(Urgency::for_card(undated, today), None);
}
