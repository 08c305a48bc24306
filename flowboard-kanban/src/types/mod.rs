//! Core types for the kanban engine

mod board;
mod card;
mod ids;
mod user;

// Re-export all types
pub use board::{Board, BoardPatch, Column, ColumnPatch, NewBoard, NewColumn};
pub use card::{append_position, Card, CardPatch, Label, NewCard};
pub use ids::{BoardId, CardId, ColumnId, EntityId, UserId};
pub use user::{NewUser, User, UserPatch, FALLBACK_AVATAR_URL};
