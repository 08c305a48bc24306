//! Due-date display: the short label and the urgency bucket.
//!
//! Everything works on calendar days. A card due today is `DueToday` from
//! midnight to midnight regardless of the time the check runs; elapsed hours
//! never enter into it. Weeks run Sunday through Saturday.

use crate::types::Card;
use chrono::{Datelike, Local, NaiveDate};

/// How pressing a due date is, relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Urgency {
    /// Due before today
    Overdue,
    /// Due today
    DueToday,
    /// Due within the next two days
    DueSoon,
    /// Due three or more days out
    DueLater,
}

impl Urgency {
    /// Bucket a due date by whole calendar days from `today`
    pub fn classify(due: NaiveDate, today: NaiveDate) -> Self {
        match days_until(due, today) {
            d if d < 0 => Self::Overdue,
            0 => Self::DueToday,
            1..=2 => Self::DueSoon,
            _ => Self::DueLater,
        }
    }

    /// Bucket a card's due date; cards without one have no urgency
    pub fn for_card(card: &Card, today: NaiveDate) -> Option<Self> {
        card.due_date.map(|due| Self::classify(due, today))
    }

    /// Stable name for the visual treatment
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::DueToday => "due-today",
            Self::DueSoon => "due-soon",
            Self::DueLater => "due-later",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed number of calendar days from `today` to `due`
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// "Today", "Tomorrow", a weekday name within the current week, else "Jan 5"
pub fn due_label(due: NaiveDate, today: NaiveDate) -> String {
    match days_until(due, today) {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ if same_week(due, today) => due.format("%A").to_string(),
        _ => due.format("%b %-d").to_string(),
    }
}

/// Label for a card's due date, if it has one
pub fn card_due_label(card: &Card, today: NaiveDate) -> Option<String> {
    card.due_date.map(|due| due_label(due, today))
}

/// Today's date on the local clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// [`due_label`] against the local clock
pub fn due_label_now(due: NaiveDate) -> String {
    due_label(due, today())
}

/// [`Urgency::classify`] against the local clock
pub fn urgency_now(due: NaiveDate) -> Urgency {
    Urgency::classify(due, today())
}

fn same_week(a: NaiveDate, b: NaiveDate) -> bool {
    week_start(a) == week_start(b)
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}
