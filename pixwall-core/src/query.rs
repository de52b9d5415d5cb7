use std::{fmt, str::FromStr};

use crate::error::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Category {
    Nature,
    Space,
    Animals,
    Technology,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Nature => "Nature",
            Category::Space => "Space",
            Category::Animals => "Animals",
            Category::Technology => "Technology",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Nature, Self::Space, Self::Animals, Self::Technology]
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::ConfigError(format!("unknown category: {s:?}")))
    }
}

/// The term currently driving the result list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SearchQuery {
    Term(String),
    Category(Category),
    EditorsChoice,
}

impl SearchQuery {
    const EDITORS_CHOICE_TERM: &'static str = "editors_choice";

    pub fn as_term(&self) -> &str {
        match self {
            Self::Term(term) => term,
            Self::Category(category) => category.as_str(),
            Self::EditorsChoice => Self::EDITORS_CHOICE_TERM,
        }
    }

    /// Blank terms never reach the remote endpoint.
    pub fn is_blank(&self) -> bool {
        self.as_term().trim().is_empty()
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::Term(String::new())
    }
}

impl From<&str> for SearchQuery {
    fn from(term: &str) -> Self {
        Self::Term(term.to_string())
    }
}

impl From<Category> for SearchQuery {
    fn from(category: Category) -> Self {
        Self::Category(category)
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_term())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_parse_case_insensitively() {
        assert_eq!("space".parse::<Category>().unwrap(), Category::Space);
        assert_eq!(" Animals ".parse::<Category>().unwrap(), Category::Animals);
        assert!("cars".parse::<Category>().is_err());
    }

    #[test]
    fn terms() {
        assert_eq!(SearchQuery::from("cats").as_term(), "cats");
        assert_eq!(SearchQuery::from(Category::Technology).as_term(), "Technology");
        assert_eq!(SearchQuery::EditorsChoice.as_term(), "editors_choice");
    }

    #[test]
    fn blank_terms() {
        assert!(SearchQuery::from("").is_blank());
        assert!(SearchQuery::from(" \t\n").is_blank());
        assert!(!SearchQuery::from(" a ").is_blank());
        assert!(!SearchQuery::EditorsChoice.is_blank());
    }
}
