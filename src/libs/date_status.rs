//! Due-date classification relative to a reference instant.
//!
//! Only the calendar day matters: a task due today is `Today` even when the
//! reference instant is late in the evening, and a task due yesterday is
//! `Overdue` no matter how recently midnight passed.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStatus {
    None,
    Overdue,
    Today,
    Tomorrow,
    Future,
}

impl DateStatus {
    /// Classifies `due_date` against the calendar day of `now`.
    ///
    /// The caller supplies `now`, usually `Local::now().naive_local()`, so the
    /// function stays pure.
    pub fn classify(due_date: Option<NaiveDate>, now: NaiveDateTime) -> Self {
        let Some(due) = due_date else {
            return Self::None;
        };
        let today = now.date();

        if due < today {
            Self::Overdue
        } else if due == today {
            Self::Today
        } else if today.succ_opt() == Some(due) {
            Self::Tomorrow
        } else {
            Self::Future
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Overdue => "overdue",
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Future => "upcoming",
        }
    }
}

impl fmt::Display for DateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
