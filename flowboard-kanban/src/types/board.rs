//! Board-level types: Board, Column

use super::ids::{BoardId, CardId, ColumnId, UserId};
use crate::entity::Entity;
use serde::{Deserialize, Serialize};

/// The kanban board: a named container of columns with a member list.
///
/// `columns` is a denormalized list kept for display counts; the
/// authoritative linkage is [`Column::board_id`]. Deleting a column through
/// the context removes it from this list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnId>,
    #[serde(default)]
    pub members: Vec<UserId>,
}

impl Board {
    /// Sidebar summary, e.g. "3 columns • 4 members"
    pub fn summary(&self) -> String {
        format!(
            "{} columns • {} members",
            self.columns.len(),
            self.members.len()
        )
    }
}

/// Data for creating a board. New boards start without columns or members.
#[derive(Debug, Clone, Default)]
pub struct NewBoard {
    pub name: String,
}

impl NewBoard {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Field overrides for a board
#[derive(Debug, Clone, Default)]
pub struct BoardPatch {
    pub name: Option<String>,
    /// Replace all column ids
    pub columns: Option<Vec<ColumnId>>,
    /// Replace all members
    pub members: Option<Vec<UserId>>,
}

impl BoardPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_columns(mut self, columns: Vec<ColumnId>) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn with_members(mut self, members: Vec<UserId>) -> Self {
        self.members = Some(members);
        self
    }
}

impl Entity for Board {
    const KIND: &'static str = "board";
    type Id = BoardId;
    type Draft = NewBoard;
    type Patch = BoardPatch;

    fn id(&self) -> &BoardId {
        &self.id
    }

    fn from_draft(id: BoardId, draft: NewBoard) -> Self {
        Self {
            id,
            name: draft.name,
            columns: Vec::new(),
            members: Vec::new(),
        }
    }

    fn apply(&mut self, patch: BoardPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(columns) = patch.columns {
            self.columns = columns;
        }
        if let Some(members) = patch.members {
            self.members = members;
        }
    }
}

/// A column defines a workflow stage within a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Owning board. Older fixtures omit it; the loading view supplies context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<BoardId>,
    /// Card ids as seeded. Not kept current by moves or creates; cards point
    /// at columns through `Card::column_id`.
    #[serde(default)]
    pub cards: Vec<CardId>,
}

/// Data for creating a column. New columns start without cards.
#[derive(Debug, Clone, Default)]
pub struct NewColumn {
    pub title: String,
    pub board_id: Option<BoardId>,
}

impl NewColumn {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            board_id: None,
        }
    }

    pub fn on_board(mut self, board_id: impl Into<BoardId>) -> Self {
        self.board_id = Some(board_id.into());
        self
    }
}

/// Field overrides for a column
#[derive(Debug, Clone, Default)]
pub struct ColumnPatch {
    pub title: Option<String>,
    /// None = don't change, Some(None) = detach, Some(Some(x)) = set
    pub board_id: Option<Option<BoardId>>,
    pub cards: Option<Vec<CardId>>,
}

impl ColumnPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_board(mut self, board_id: Option<BoardId>) -> Self {
        self.board_id = Some(board_id);
        self
    }

    pub fn with_cards(mut self, cards: Vec<CardId>) -> Self {
        self.cards = Some(cards);
        self
    }
}

impl Entity for Column {
    const KIND: &'static str = "column";
    type Id = ColumnId;
    type Draft = NewColumn;
    type Patch = ColumnPatch;

    fn id(&self) -> &ColumnId {
        &self.id
    }

    fn from_draft(id: ColumnId, draft: NewColumn) -> Self {
        Self {
            id,
            title: draft.title,
            board_id: draft.board_id,
            cards: Vec::new(),
        }
    }

    fn apply(&mut self, patch: ColumnPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(board_id) = patch.board_id {
            self.board_id = board_id;
        }
        if let Some(cards) = patch.cards {
            self.cards = cards;
        }
    }
}
