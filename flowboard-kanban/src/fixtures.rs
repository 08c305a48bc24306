//! Seed data for the in-memory services.
//!
//! The four collections ship embedded in the crate and can be replaced with
//! a directory holding `board.json`, `column.json`, `card.json` and
//! `user.json`, each a JSON array of entities.

use crate::error::{KanbanError, Result};
use crate::types::{Board, Card, Column, User};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

const BOARD_JSON: &str = include_str!("../fixtures/board.json");
const COLUMN_JSON: &str = include_str!("../fixtures/column.json");
const CARD_JSON: &str = include_str!("../fixtures/card.json");
const USER_JSON: &str = include_str!("../fixtures/user.json");

/// Initial contents of every entity store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fixtures {
    pub boards: Vec<Board>,
    pub columns: Vec<Column>,
    pub cards: Vec<Card>,
    pub users: Vec<User>,
}

impl Fixtures {
    /// The fixtures compiled into the crate
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            boards: parse("board.json", BOARD_JSON)?,
            columns: parse("column.json", COLUMN_JSON)?,
            cards: parse("card.json", CARD_JSON)?,
            users: parse("user.json", USER_JSON)?,
        })
    }

    /// Read all four collections from `dir`
    pub async fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        debug!(dir = %dir.display(), "loading fixtures");
        Ok(Self {
            boards: read(dir, "board.json").await?,
            columns: read(dir, "column.json").await?,
            cards: read(dir, "card.json").await?,
            users: read(dir, "user.json").await?,
        })
    }

    /// No seed data at all
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_boards(mut self, boards: Vec<Board>) -> Self {
        self.boards = boards;
        self
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = users;
        self
    }
}

fn parse<T: DeserializeOwned>(name: &str, content: &str) -> Result<Vec<T>> {
    serde_json::from_str(content).map_err(|source| KanbanError::Fixture {
        name: name.to_string(),
        source,
    })
}

async fn read<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>> {
    let path = dir.join(name);
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| KanbanError::FixtureRead { path, source })?;
    parse(name, &content)
}
