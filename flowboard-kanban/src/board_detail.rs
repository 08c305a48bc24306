//! Board detail: the columns-and-cards working set behind a board view.
//!
//! `BoardDetail` holds a local copy of columns and cards and keeps it in step
//! with the services. Every mutation goes to the services first; local state
//! only changes once the service confirms. Failures leave local state alone
//! and queue an error notification.
//!
//! Drag and drop is a small state machine:
//!
//! ```text
//! Idle --drag_start--> Dragging --drag_over--> Dragging (hover target set)
//!                      Dragging --drag_leave-> Dragging (hover cleared)
//!                      Dragging --drop_on----> Idle
//! ```

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::notification::Notification;
use crate::types::{append_position, BoardId, Card, CardId, Column, ColumnId, NewCard, User};
use tracing::{debug, info, warn};

pub const CARD_MOVED: &str = "Card moved successfully";
pub const CARD_MOVE_FAILED: &str = "Failed to move card";
pub const CARD_CREATED: &str = "Card created successfully";
pub const CARD_CREATE_FAILED: &str = "Failed to create card";
pub const LOAD_FAILED: &str = "Failed to load board data";

/// Assignee avatars shown on a card before collapsing into `+N`
pub const ASSIGNEE_STACK_LIMIT: usize = 3;

/// Local view state for one board
#[derive(Debug)]
pub struct BoardDetail {
    ctx: KanbanContext,
    columns: Vec<Column>,
    cards: Vec<Card>,
    dragged: Option<Card>,
    hovered: Option<ColumnId>,
    composing: Option<ColumnId>,
    draft_title: String,
    notifications: Vec<Notification>,
    error: Option<String>,
}

impl BoardDetail {
    fn empty(ctx: KanbanContext) -> Self {
        Self {
            ctx,
            columns: Vec::new(),
            cards: Vec::new(),
            dragged: None,
            hovered: None,
            composing: None,
            draft_title: String::new(),
            notifications: Vec::new(),
            error: None,
        }
    }

    /// Load every column and card
    pub async fn load(ctx: KanbanContext) -> Self {
        let (columns, cards) = tokio::join!(ctx.columns().get_all(), ctx.cards().get_all());
        debug!(columns = columns.len(), cards = cards.len(), "loaded board detail");

        let mut detail = Self::empty(ctx);
        detail.columns = columns;
        detail.cards = cards;
        detail
    }

    /// Load the columns owned by one board and the cards in them.
    ///
    /// A missing board leaves the view empty with an error recorded.
    pub async fn load_board(ctx: KanbanContext, board_id: &BoardId) -> Self {
        let (board, columns, cards) = tokio::join!(
            ctx.boards().get_by_id(board_id),
            ctx.columns().get_all(),
            ctx.cards().get_all()
        );

        let mut detail = Self::empty(ctx);
        if board.is_none() {
            detail.fail_load(KanbanError::not_found("board", board_id));
            return detail;
        }

        detail.columns = columns
            .into_iter()
            .filter(|c| c.board_id.as_ref() == Some(board_id))
            .collect();
        detail.cards = cards
            .into_iter()
            .filter(|card| detail.columns.iter().any(|c| card.is_in(&c.id)))
            .collect();
        debug!(
            %board_id,
            columns = detail.columns.len(),
            cards = detail.cards.len(),
            "loaded board detail"
        );
        detail
    }

    fn fail_load(&mut self, err: KanbanError) {
        warn!(error = %err, "failed to load board data");
        self.error = Some(err.to_string());
        self.notify(Notification::error(LOAD_FAILED));
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Load failure message, if loading failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Cards in a column, ordered by position. Ties keep load order.
    pub fn cards_for_column(&self, column_id: &ColumnId) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self.cards.iter().filter(|c| c.is_in(column_id)).collect();
        cards.sort_by_key(|c| c.position);
        cards
    }

    /// Every column with its ordered cards and interaction flags
    pub fn column_views(&self) -> Vec<ColumnView<'_>> {
        self.columns
            .iter()
            .map(|column| ColumnView {
                column,
                cards: self.cards_for_column(&column.id),
                is_drop_target: self.hovered.as_ref() == Some(&column.id),
                is_composing: self.composing.as_ref() == Some(&column.id),
            })
            .collect()
    }

    // =========================================================================
    // Drag and drop
    // =========================================================================

    /// Begin dragging a card. Returns false if the card is not on this board.
    pub fn drag_start(&mut self, card_id: &CardId) -> bool {
        match self.cards.iter().find(|c| &c.id == card_id) {
            Some(card) => {
                debug!(%card_id, "drag start");
                self.dragged = Some(card.clone());
                true
            }
            None => false,
        }
    }

    pub fn drag_over(&mut self, column_id: &ColumnId) {
        self.hovered = Some(column_id.clone());
    }

    /// Pointer left a column; the drag itself continues
    pub fn drag_leave(&mut self) {
        self.hovered = None;
    }

    pub fn dragged_card(&self) -> Option<&Card> {
        self.dragged.as_ref()
    }

    pub fn hovered_column(&self) -> Option<&ColumnId> {
        self.hovered.as_ref()
    }

    /// True while `card_id` is the card being dragged
    pub fn is_dragging(&self, card_id: &CardId) -> bool {
        self.dragged.as_ref().is_some_and(|c| &c.id == card_id)
    }

    /// Drop the dragged card on `target`.
    ///
    /// Dropping onto the card's own column, or with nothing dragged, makes no
    /// service call. Returns the moved card when the move succeeded. Drag
    /// state is cleared in every case.
    pub async fn drop_on(&mut self, target: &ColumnId) -> Option<Card> {
        self.hovered = None;
        let Some(card) = self.dragged.take() else {
            debug!(%target, "drop with nothing dragged");
            return None;
        };

        if card.is_in(target) {
            debug!(card_id = %card.id, %target, "dropped on own column");
            return None;
        }

        match self.ctx.move_card(&card.id, target).await {
            Ok(moved) => {
                if let Some(slot) = self.cards.iter_mut().find(|c| c.id == moved.id) {
                    *slot = moved.clone();
                }
                info!(card_id = %moved.id, column_id = %moved.column_id, "card moved");
                self.notify(Notification::success(CARD_MOVED));
                Some(moved)
            }
            Err(err) => {
                warn!(card_id = %card.id, %target, error = %err, "move failed");
                self.notify(Notification::error(CARD_MOVE_FAILED));
                None
            }
        }
    }

    // =========================================================================
    // Inline card creation
    // =========================================================================

    /// Open the inline form on a column, closing any other
    pub fn start_composing(&mut self, column_id: &ColumnId) {
        self.composing = Some(column_id.clone());
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.draft_title = title.into();
    }

    /// Close the inline form and discard the typed title
    pub fn cancel_composing(&mut self) {
        self.composing = None;
        self.draft_title.clear();
    }

    pub fn composing_column(&self) -> Option<&ColumnId> {
        self.composing.as_ref()
    }

    pub fn draft_title(&self) -> &str {
        &self.draft_title
    }

    /// Create a card from the draft title at the end of `column_id`.
    ///
    /// A blank title does nothing. On success the card joins local state and
    /// the form closes; on failure the form stays open with its title.
    pub async fn submit_card(&mut self, column_id: &ColumnId) -> Option<Card> {
        if self.draft_title.trim().is_empty() {
            return None;
        }

        let position = append_position(self.cards.iter().filter(|c| c.is_in(column_id)).count());
        let draft = NewCard::new(self.draft_title.clone(), column_id.clone()).at_position(position);

        match self.ctx.create_card(draft).await {
            Ok(card) => {
                info!(card_id = %card.id, %column_id, position, "card created");
                self.cards.push(card.clone());
                self.draft_title.clear();
                self.composing = None;
                self.notify(Notification::success(CARD_CREATED));
                Some(card)
            }
            Err(err) => {
                warn!(%column_id, error = %err, "create failed");
                self.notify(Notification::error(CARD_CREATE_FAILED));
                None
            }
        }
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Drain queued notifications, oldest first
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

/// One column as displayed
#[derive(Debug, Clone)]
pub struct ColumnView<'a> {
    pub column: &'a Column,
    pub cards: Vec<&'a Card>,
    /// A dragged card is hovering over this column
    pub is_drop_target: bool,
    pub is_composing: bool,
}

impl ColumnView<'_> {
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}

/// The leading assignees on a card plus how many more are hidden
#[derive(Debug, Clone, PartialEq)]
pub struct AssigneeStack<'a> {
    pub shown: Vec<&'a User>,
    pub overflow: usize,
}

impl<'a> AssigneeStack<'a> {
    /// Resolve the first few assignee ids. Ids with no matching user are skipped.
    pub fn resolve(card: &Card, users: &'a [User]) -> Self {
        let shown = card
            .assignees
            .iter()
            .take(ASSIGNEE_STACK_LIMIT)
            .filter_map(|id| users.iter().find(|u| &u.id == id))
            .collect();
        Self {
            shown,
            overflow: card.assignees.len().saturating_sub(ASSIGNEE_STACK_LIMIT),
        }
    }

    /// "+N" badge text, when anyone is hidden
    pub fn overflow_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{}", self.overflow))
    }
}
