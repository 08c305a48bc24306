//! Kanban boards backed by in-memory mock services
//!
//! Boards contain columns, columns hold cards, and users are board members
//! and card assignees. Each entity kind is served by the same generic
//! [`EntityService`], which simulates network latency before every call so
//! callers behave as they would against a remote backend.
//!
//! ## Overview
//!
//! - **Services** - `get_all`, `get_by_id`, `create`, `update`, `remove` per entity kind
//! - **Context** - [`KanbanContext`] bundles the services and owns cross-entity rules
//! - **Board detail** - [`BoardDetail`] drives drag-and-drop moves and inline card creation
//! - **Overview** - [`BoardOverview`] derives the sidebar, team list and header
//! - **Due dates** - [`due_label`] and [`Urgency`] classify card deadlines by calendar day
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use flowboard_kanban::{BoardDetail, ColumnId, KanbanContext};
//!
//! # async fn example() -> flowboard_kanban::Result<()> {
//! let ctx = KanbanContext::load().await?;
//! let mut detail = BoardDetail::load(ctx).await;
//!
//! let todo = ColumnId::from_string("1");
//! detail.start_composing(&todo);
//! detail.set_draft_title("Write the changelog");
//! detail.submit_card(&todo).await;
//!
//! for note in detail.take_notifications() {
//!     println!("{note}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod board_detail;
mod context;
pub mod delay;
pub mod due;
mod entity;
mod error;
pub mod fixtures;
pub mod notification;
pub mod overview;
pub mod service;
pub mod store;
pub mod types;

pub use board_detail::{AssigneeStack, BoardDetail, ColumnView};
pub use context::KanbanContext;
pub use due::{due_label, Urgency};
pub use entity::Entity;
pub use error::{KanbanError, Result};
pub use fixtures::Fixtures;
pub use notification::{Notification, NotificationLevel};
pub use overview::{Avatar, BoardOverview, BoardSummary, Header};
pub use service::{BoardService, CardService, ColumnService, EntityService, UserService};
pub use store::{InMemoryRepository, Repository};

// Re-export commonly used types
pub use types::{
    Board, BoardId, BoardPatch, Card, CardId, CardPatch, Column, ColumnId, ColumnPatch, EntityId,
    Label, NewBoard, NewCard, NewColumn, NewUser, User, UserId, UserPatch,
};

pub use flowboard_config::{FlowboardConfig, LatencyConfig, ServiceLatency};
