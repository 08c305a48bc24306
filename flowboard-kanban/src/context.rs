//! KanbanContext - the four entity services behind one handle
//!
//! The context is cheap to clone; every clone shares the same stores. Raw
//! CRUD goes straight through the services. Operations that span entity
//! kinds (moving a card, deleting something other records point at) live
//! here so the referential rules sit in one place.
//!
//! Cross-entity operations hold one shared lock from their check through
//! their write. Two of them never interleave, so a card cannot land in a
//! column that is being deleted. Raw service calls do not take the lock.

use crate::error::{KanbanError, Result};
use crate::fixtures::Fixtures;
use crate::service::{BoardService, CardService, ColumnService, EntityService, UserService};
use crate::types::{
    append_position, BoardId, BoardPatch, Card, CardId, CardPatch, ColumnId, NewCard, UserId,
};
use flowboard_config::{FlowboardConfig, LatencyConfig};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Shared access to board, column, card and user services
#[derive(Debug, Clone)]
pub struct KanbanContext {
    boards: Arc<BoardService>,
    columns: Arc<ColumnService>,
    cards: Arc<CardService>,
    users: Arc<UserService>,
    integrity: Arc<Mutex<()>>,
}

impl KanbanContext {
    /// Seed every store from `fixtures` and apply `latency`
    pub fn new(fixtures: Fixtures, latency: LatencyConfig) -> Self {
        Self {
            boards: Arc::new(EntityService::seeded(fixtures.boards, latency.board)),
            columns: Arc::new(EntityService::seeded(fixtures.columns, latency.column)),
            cards: Arc::new(EntityService::seeded(fixtures.cards, latency.card)),
            users: Arc::new(EntityService::seeded(fixtures.users, latency.user)),
            integrity: Arc::new(Mutex::new(())),
        }
    }

    /// Zero-latency context over the given fixtures
    pub fn in_memory(fixtures: Fixtures) -> Self {
        Self::new(fixtures, LatencyConfig::none())
    }

    /// Build from configuration: fixtures from `fixtures_dir` when set,
    /// the embedded ones otherwise.
    pub async fn from_config(config: &FlowboardConfig) -> Result<Self> {
        let fixtures = match &config.fixtures_dir {
            Some(dir) => Fixtures::from_dir(dir).await?,
            None => Fixtures::builtin()?,
        };
        info!(
            boards = fixtures.boards.len(),
            columns = fixtures.columns.len(),
            cards = fixtures.cards.len(),
            users = fixtures.users.len(),
            "seeded kanban stores"
        );
        Ok(Self::new(fixtures, config.latency.clone()))
    }

    /// Load configuration from all sources, then build
    pub async fn load() -> Result<Self> {
        let config = flowboard_config::load_configuration()?;
        Self::from_config(&config).await
    }

    pub fn boards(&self) -> &BoardService {
        &self.boards
    }

    pub fn columns(&self) -> &ColumnService {
        &self.columns
    }

    pub fn cards(&self) -> &CardService {
        &self.cards
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    // =========================================================================
    // Cross-entity operations
    // =========================================================================

    /// Create a card in an existing column
    pub async fn create_card(&self, draft: NewCard) -> Result<Card> {
        let _guard = self.integrity.lock().await;
        self.require_column(&draft.column_id).await?;
        Ok(self.cards.create(draft).await)
    }

    /// Move a card to the end of another column.
    ///
    /// Moving a card onto its own column returns it unchanged. Only the moved
    /// card is written; cards left behind keep their positions.
    pub async fn move_card(&self, card_id: &CardId, column_id: &ColumnId) -> Result<Card> {
        let _guard = self.integrity.lock().await;
        let card = self
            .cards
            .get_by_id(card_id)
            .await
            .ok_or_else(|| KanbanError::not_found("card", card_id))?;

        if card.is_in(column_id) {
            debug!(%card_id, %column_id, "card already in column");
            return Ok(card);
        }

        self.require_column(column_id).await?;

        let position = self
            .cards
            .get_all()
            .await
            .iter()
            .filter(|c| c.is_in(column_id))
            .count();

        self.cards
            .update(card_id, CardPatch::moved_to(column_id.clone(), append_position(position)))
            .await
    }

    async fn require_column(&self, column_id: &ColumnId) -> Result<()> {
        match self.columns.get_by_id(column_id).await {
            Some(_) => Ok(()),
            None => {
                warn!(%column_id, "column does not exist");
                Err(KanbanError::ColumnNotFound {
                    id: column_id.to_string(),
                })
            }
        }
    }

    /// Delete a column that no card points at and drop it from every
    /// board's column list
    pub async fn delete_column(&self, id: &ColumnId) -> Result<()> {
        let _guard = self.integrity.lock().await;
        let count = self
            .cards
            .get_all()
            .await
            .iter()
            .filter(|c| c.is_in(id))
            .count();

        if count > 0 {
            return Err(KanbanError::ColumnNotEmpty {
                id: id.to_string(),
                count,
            });
        }

        self.columns.remove(id).await?;

        for board in self.boards.get_all().await {
            if !board.columns.contains(id) {
                continue;
            }
            let columns = board.columns.iter().filter(|c| *c != id).cloned().collect();
            self.boards
                .update(&board.id, BoardPatch::new().with_columns(columns))
                .await?;
            debug!(board_id = %board.id, column_id = %id, "pruned column from board");
        }
        Ok(())
    }

    /// Delete a board that no column belongs to
    pub async fn delete_board(&self, id: &BoardId) -> Result<()> {
        let _guard = self.integrity.lock().await;
        let count = self
            .columns
            .get_all()
            .await
            .iter()
            .filter(|c| c.board_id.as_ref() == Some(id))
            .count();

        if count > 0 {
            return Err(KanbanError::BoardNotEmpty {
                id: id.to_string(),
                count,
            });
        }

        self.boards.remove(id).await
    }

    /// Delete a user who is neither assigned to a card nor a board member
    pub async fn delete_user(&self, id: &UserId) -> Result<()> {
        let _guard = self.integrity.lock().await;
        let (cards, boards) = tokio::join!(self.cards.get_all(), self.boards.get_all());
        let count = cards.iter().filter(|c| c.assignees.contains(id)).count()
            + boards.iter().filter(|b| b.members.contains(id)).count();

        if count > 0 {
            return Err(KanbanError::UserAssigned {
                id: id.to_string(),
                count,
            });
        }

        self.users.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewBoard, NewCard, NewColumn, NewUser};

    fn setup() -> KanbanContext {
        KanbanContext::in_memory(Fixtures::builtin().unwrap())
    }

    #[tokio::test]
    async fn test_contexts_share_stores_when_cloned() {
        let ctx = setup();
        let other = ctx.clone();
        let board = ctx.boards().create(NewBoard::new("Shared")).await;
        assert!(other.boards().get_by_id(&board.id).await.is_some());
    }

    #[tokio::test]
    async fn test_move_card_appends_to_target_column() {
        let ctx = setup();
        // Column "4" holds two cards in the fixtures
        let moved = ctx
            .move_card(&CardId::from_string("1"), &ColumnId::from_string("4"))
            .await
            .unwrap();

        assert_eq!(moved.column_id, "4");
        assert_eq!(moved.position, 2);
    }

    #[tokio::test]
    async fn test_move_card_leaves_other_cards_alone() {
        let ctx = setup();
        let before = ctx.cards().get_all().await;

        ctx.move_card(&CardId::from_string("2"), &ColumnId::from_string("3"))
            .await
            .unwrap();

        let after = ctx.cards().get_all().await;
        for (old, new) in before.iter().zip(after.iter()) {
            if old.id == "2" {
                assert_eq!(new.column_id, "3");
                assert_eq!(new.title, old.title);
                assert_eq!(new.assignees, old.assignees);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[tokio::test]
    async fn test_move_card_to_same_column_is_noop() {
        let ctx = setup();
        let before = ctx.cards().get_all().await;
        let card = ctx
            .move_card(&CardId::from_string("1"), &ColumnId::from_string("1"))
            .await
            .unwrap();
        assert_eq!(card.position, 0);
        assert_eq!(ctx.cards().get_all().await, before);
    }

    #[tokio::test]
    async fn test_move_card_to_unknown_column() {
        let ctx = setup();
        let result = ctx
            .move_card(&CardId::from_string("1"), &ColumnId::from_string("nope"))
            .await;
        assert!(matches!(result, Err(KanbanError::ColumnNotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_card_requires_column() {
        let ctx = setup();
        let result = ctx.create_card(NewCard::new("Orphan", "nope")).await;
        assert!(matches!(result, Err(KanbanError::ColumnNotFound { ref id }) if id == "nope"));
        assert_eq!(ctx.cards().count().await, 8);

        let card = ctx.create_card(NewCard::new("Welcome", "2").at_position(2)).await.unwrap();
        assert_eq!(ctx.cards().get_by_id(&card.id).await.unwrap().position, 2);
    }

    #[tokio::test]
    async fn test_move_unknown_card() {
        let ctx = setup();
        let result = ctx
            .move_card(&CardId::from_string("nope"), &ColumnId::from_string("1"))
            .await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_column_with_cards_is_rejected() {
        let ctx = setup();
        let result = ctx.delete_column(&ColumnId::from_string("1")).await;
        assert!(matches!(
            result,
            Err(KanbanError::ColumnNotEmpty { count: 3, .. })
        ));
        assert_eq!(ctx.columns().count().await, 4);
    }

    #[tokio::test]
    async fn test_delete_empty_column() {
        let ctx = setup();
        let column = ctx.columns().create(NewColumn::new("Icebox").on_board("1")).await;
        ctx.delete_column(&column.id).await.unwrap();
        assert!(ctx.columns().get_by_id(&column.id).await.is_none());
    }

    #[tokio::test]
    async fn test_delete_column_after_cards_leave() {
        let ctx = setup();
        let column = ctx.columns().create(NewColumn::new("Temp")).await;
        let card = ctx.cards().create(NewCard::new("Visitor", column.id.clone())).await;

        assert!(ctx.delete_column(&column.id).await.is_err());
        ctx.move_card(&card.id, &ColumnId::from_string("1")).await.unwrap();
        ctx.delete_column(&column.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_board_with_columns_is_rejected() {
        let ctx = setup();
        let result = ctx.delete_board(&BoardId::from_string("1")).await;
        assert!(matches!(result, Err(KanbanError::BoardNotEmpty { count: 4, .. })));

        ctx.delete_board(&BoardId::from_string("2")).await.unwrap();
        assert_eq!(ctx.boards().count().await, 2);
    }

    #[tokio::test]
    async fn test_delete_user_guards_assignments() {
        let ctx = setup();
        let result = ctx.delete_user(&UserId::from_string("1")).await;
        assert!(matches!(result, Err(KanbanError::UserAssigned { .. })));

        let user = ctx.users().create(NewUser::new("Contractor")).await;
        ctx.delete_user(&user.id).await.unwrap();
        assert!(ctx.users().get_by_id(&user.id).await.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let ctx = KanbanContext::in_memory(Fixtures::empty());
        assert!(ctx
            .delete_column(&ColumnId::from_string("x"))
            .await
            .unwrap_err()
            .is_not_found());
        assert!(ctx
            .delete_board(&BoardId::from_string("x"))
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_delete_column_prunes_board_column_list() {
        let ctx = setup();
        let column = ctx.columns().create(NewColumn::new("Ideas").on_board("2")).await;
        ctx.boards()
            .update(
                &BoardId::from_string("2"),
                BoardPatch::new().with_columns(vec![column.id.clone()]),
            )
            .await
            .unwrap();

        ctx.delete_column(&column.id).await.unwrap();

        let board = ctx.boards().get_by_id(&BoardId::from_string("2")).await.unwrap();
        assert!(board.columns.is_empty());
        assert_eq!(board.summary(), "0 columns • 2 members");
        // Boards that never listed the column are untouched
        let roadmap = ctx.boards().get_by_id(&BoardId::from_string("1")).await.unwrap();
        assert_eq!(roadmap.columns.len(), 4);
    }

    async fn slow_context_with_empty_column() -> (KanbanContext, ColumnId) {
        let ctx = KanbanContext::new(Fixtures::builtin().unwrap(), LatencyConfig::default());
        let column = ctx.columns().create(NewColumn::new("Short-lived")).await;
        (ctx, column.id)
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn test_create_racing_column_delete_keeps_integrity() {
        let (ctx, column_id) = slow_context_with_empty_column().await;

        let (created, deleted) = tokio::join!(
            ctx.create_card(NewCard::new("Orphan", column_id.clone())),
            ctx.delete_column(&column_id)
        );

        assert!(!(created.is_ok() && deleted.is_ok()));
        let column_exists = ctx.columns().get_by_id(&column_id).await.is_some();
        if let Ok(card) = created {
            assert!(column_exists, "card {} left in a deleted column", card.id);
        }
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn test_move_racing_column_delete_keeps_integrity() {
        let (ctx, column_id) = slow_context_with_empty_column().await;
        let card_id = CardId::from_string("1");

        let (moved, deleted) = tokio::join!(
            ctx.move_card(&card_id, &column_id),
            ctx.delete_column(&column_id)
        );

        assert!(!(moved.is_ok() && deleted.is_ok()));
        let card = ctx.cards().get_by_id(&card_id).await.unwrap();
        assert!(ctx.columns().get_by_id(&card.column_id).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_racing_delete_board_and_user() {
        let ctx = KanbanContext::new(Fixtures::builtin().unwrap(), LatencyConfig::default());
        let board = ctx.boards().create(NewBoard::new("Scratch")).await;
        let user = ctx.users().create(NewUser::new("Temp")).await;

        let (board_deleted, user_deleted) =
            tokio::join!(ctx.delete_board(&board.id), ctx.delete_user(&user.id));
        board_deleted.unwrap();
        user_deleted.unwrap();
        assert_eq!(ctx.boards().count().await, 3);
        assert_eq!(ctx.users().count().await, 6);
    }

    #[tokio::test]
    async fn test_from_config_without_latency() {
        let ctx = KanbanContext::from_config(&FlowboardConfig::without_latency())
            .await
            .unwrap();
        assert!(ctx.cards().latency().is_instant());
        assert_eq!(ctx.users().count().await, 6);
    }
}
