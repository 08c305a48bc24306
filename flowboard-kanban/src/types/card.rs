//! Card types: Card, Label

use super::ids::{CardId, ColumnId, UserId};
use crate::entity::Entity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A task/card on the kanban board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub column_id: ColumnId,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub assignees: Vec<UserId>,
    /// Calendar due date; timestamps in fixtures keep only their date
    #[serde(default, with = "due_date_format")]
    pub due_date: Option<NaiveDate>,
    /// Ordering key within the column; lower sorts first
    #[serde(default)]
    pub position: u32,
}

impl Card {
    pub fn is_in(&self, column_id: &ColumnId) -> bool {
        &self.column_id == column_id
    }
}

/// Position for a card appended after `count` others. Saturates at `u32::MAX`;
/// positions only order cards, so equal keys fall back to load order.
pub fn append_position(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// A colored label on a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    /// CSS color, e.g. "#ef4444"
    pub color: String,
}

impl Label {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Data for creating a card
#[derive(Debug, Clone)]
pub struct NewCard {
    pub title: String,
    pub description: String,
    pub column_id: ColumnId,
    pub labels: Vec<Label>,
    pub assignees: Vec<UserId>,
    pub due_date: Option<NaiveDate>,
    pub position: u32,
}

impl NewCard {
    /// A card with empty description, labels and assignees and no due date
    pub fn new(title: impl Into<String>, column_id: impl Into<ColumnId>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            column_id: column_id.into(),
            labels: Vec::new(),
            assignees: Vec::new(),
            due_date: None,
            position: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_labels(mut self, labels: Vec<Label>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_assignees(mut self, assignees: Vec<UserId>) -> Self {
        self.assignees = assignees;
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn at_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }
}

/// Field overrides for a card
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub column_id: Option<ColumnId>,
    /// Replace all labels
    pub labels: Option<Vec<Label>>,
    /// Replace all assignees
    pub assignees: Option<Vec<UserId>>,
    /// None = don't change, Some(None) = clear, Some(Some(x)) = set
    pub due_date: Option<Option<NaiveDate>>,
    pub position: Option<u32>,
}

impl CardPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch produced by a drag-and-drop: new column, new position
    pub fn moved_to(column_id: impl Into<ColumnId>, position: u32) -> Self {
        Self {
            column_id: Some(column_id.into()),
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_column(mut self, column_id: impl Into<ColumnId>) -> Self {
        self.column_id = Some(column_id.into());
        self
    }

    pub fn with_labels(mut self, labels: Vec<Label>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn with_assignees(mut self, assignees: Vec<UserId>) -> Self {
        self.assignees = Some(assignees);
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }
}

impl Entity for Card {
    const KIND: &'static str = "card";
    type Id = CardId;
    type Draft = NewCard;
    type Patch = CardPatch;

    fn id(&self) -> &CardId {
        &self.id
    }

    fn from_draft(id: CardId, draft: NewCard) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            column_id: draft.column_id,
            labels: draft.labels,
            assignees: draft.assignees,
            due_date: draft.due_date,
            position: draft.position,
        }
    }

    fn apply(&mut self, patch: CardPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(column_id) = patch.column_id {
            self.column_id = column_id;
        }
        if let Some(labels) = patch.labels {
            self.labels = labels;
        }
        if let Some(assignees) = patch.assignees {
            self.assignees = assignees;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
    }
}

/// Due dates accept `2024-01-15` or an RFC 3339 timestamp and always
/// serialize as a calendar date.
mod due_date_format {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    const DATE_FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        parse(raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid due date: {raw}")))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDate> {
        if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            return Some(date);
        }
        if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(stamp.date_naive());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|stamp| stamp.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_card_defaults() {
        let card = Card::from_draft(CardId::new(), NewCard::new("Write docs", "todo"));
        assert_eq!(card.title, "Write docs");
        assert!(card.description.is_empty());
        assert!(card.labels.is_empty());
        assert!(card.assignees.is_empty());
        assert!(card.due_date.is_none());
        assert_eq!(card.position, 0);
        assert!(card.is_in(&ColumnId::from_string("todo")));
    }

    #[test]
    fn test_move_patch_touches_column_and_position_only() {
        let mut card = Card::from_draft(
            CardId::from_string("c1"),
            NewCard::new("Task", "todo")
                .with_description("details")
                .with_due_date(date(2024, 1, 12))
                .at_position(4),
        );
        let before = card.clone();
        card.apply(CardPatch::moved_to("done", 0));

        assert_eq!(card.column_id, "done");
        assert_eq!(card.position, 0);
        assert_eq!(card.title, before.title);
        assert_eq!(card.description, before.description);
        assert_eq!(card.due_date, before.due_date);
    }

    #[test]
    fn test_append_position_saturates() {
        assert_eq!(append_position(0), 0);
        assert_eq!(append_position(3), 3);
        assert_eq!(append_position(u32::MAX as usize), u32::MAX);
        assert_eq!(append_position(usize::MAX), u32::MAX);
    }

    #[test]
    fn test_fixture_shape() {
        let json = r##"{
            "id": "1",
            "title": "Design homepage",
            "description": "",
            "columnId": "2",
            "labels": [{"name": "Design", "color": "#8b5cf6"}],
            "assignees": ["1", "3"],
            "dueDate": "2024-01-15",
            "position": 0
        }"##;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.column_id, "2");
        assert_eq!(card.labels[0].name, "Design");
        assert_eq!(card.due_date, Some(date(2024, 1, 15)));

        let out = serde_json::to_value(&card).unwrap();
        assert_eq!(out["columnId"], "2");
        assert_eq!(out["dueDate"], "2024-01-15");
    }

    #[test]
    fn test_fixture_missing_optional_fields() {
        let card: Card =
            serde_json::from_str(r#"{"id": "9", "title": "Bare", "columnId": "1"}"#).unwrap();
        assert!(card.labels.is_empty());
        assert!(card.assignees.is_empty());
        assert!(card.due_date.is_none());
        assert_eq!(card.description, "");
    }

    #[test]
    fn test_due_date_accepts_timestamps_and_null() {
        assert_eq!(
            due_date_format::parse("2024-02-01T17:30:00.000Z"),
            Some(date(2024, 2, 1))
        );
        assert_eq!(
            due_date_format::parse("2024-02-01T17:30:00"),
            Some(date(2024, 2, 1))
        );
        assert_eq!(due_date_format::parse("next tuesday"), None);

        let card: Card = serde_json::from_str(
            r#"{"id": "9", "title": "T", "columnId": "1", "dueDate": null}"#,
        )
        .unwrap();
        assert!(card.due_date.is_none());
    }

    #[test]
    fn test_invalid_due_date_is_rejected() {
        let result: Result<Card, _> = serde_json::from_str(
            r#"{"id": "9", "title": "T", "columnId": "1", "dueDate": "soon"}"#,
        );
        assert!(result.is_err());
    }
}
