//! Which subset of the list the front end shows.

use std::fmt;
use std::str::FromStr;

use crate::types::TodoItem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(self, item: &TodoItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !item.completed,
            Filter::Completed => item.completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        })
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" | "done" => Ok(Filter::Completed),
            other => Err(format!("unknown filter: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(completed: bool) -> TodoItem {
        TodoItem {
            id: 1,
            user_id: 1,
            title: "t".to_string(),
            completed,
            is_editing: false,
            is_pending: false,
        }
    }

    #[test]
    fn active_and_completed_are_disjoint() {
        for completed in [true, false] {
            let it = item(completed);
            assert!(Filter::All.matches(&it));
            assert_ne!(Filter::Active.matches(&it), Filter::Completed.matches(&it));
        }
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Active".parse::<Filter>(), Ok(Filter::Active));
        assert_eq!(" completed ".parse::<Filter>(), Ok(Filter::Completed));
        assert!("bogus".parse::<Filter>().is_err());
    }
}
