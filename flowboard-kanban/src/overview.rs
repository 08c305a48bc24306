//! Board overview: the sidebar, team list and header around a board.

use crate::context::KanbanContext;
use crate::types::{Board, BoardId, User};
use serde::Serialize;
use tracing::debug;

/// Header title when there are no boards
pub const DEFAULT_TITLE: &str = "Project Board";

/// Users listed under "Team Members"
pub const TEAM_MEMBER_LIMIT: usize = 5;

/// Avatars stacked in the header
pub const HEADER_AVATAR_LIMIT: usize = 3;

/// A board as listed in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub id: BoardId,
    pub name: String,
    /// e.g. "4 columns • 4 members"
    pub summary: String,
}

/// A user's name with a displayable avatar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Avatar {
    pub name: String,
    pub url: String,
}

impl From<&User> for Avatar {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            url: user.avatar_url().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub title: String,
    pub avatars: Vec<Avatar>,
}

/// Boards and users for the page around a board
#[derive(Debug, Clone)]
pub struct BoardOverview {
    boards: Vec<Board>,
    users: Vec<User>,
    sidebar_open: bool,
}

impl BoardOverview {
    /// Fetch boards and users together
    pub async fn load(ctx: &KanbanContext) -> Self {
        let (boards, users) = tokio::join!(ctx.boards().get_all(), ctx.users().get_all());
        debug!(boards = boards.len(), users = users.len(), "loaded overview");
        Self::new(boards, users)
    }

    pub fn new(boards: Vec<Board>, users: Vec<User>) -> Self {
        Self {
            boards,
            users,
            sidebar_open: true,
        }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn sidebar_boards(&self) -> Vec<BoardSummary> {
        self.boards
            .iter()
            .map(|board| BoardSummary {
                id: board.id.clone(),
                name: board.name.clone(),
                summary: board.summary(),
            })
            .collect()
    }

    pub fn team_members(&self) -> Vec<Avatar> {
        self.users
            .iter()
            .take(TEAM_MEMBER_LIMIT)
            .map(Avatar::from)
            .collect()
    }

    /// Title from the first board, avatars from the first users
    pub fn header(&self) -> Header {
        Header {
            title: self
                .boards
                .first()
                .map(|b| b.name.clone())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            avatars: self
                .users
                .iter()
                .take(HEADER_AVATAR_LIMIT)
                .map(Avatar::from)
                .collect(),
        }
    }

    /// Swap in an updated copy of a board. Returns false if it is not listed.
    pub fn replace_board(&mut self, board: Board) -> bool {
        match self.boards.iter_mut().find(|b| b.id == board.id) {
            Some(slot) => {
                *slot = board;
                true
            }
            None => false,
        }
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_open
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }
}
