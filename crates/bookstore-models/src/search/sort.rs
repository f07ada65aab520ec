//! Sort options for catalog searches.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field a search can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    Author,
    Price,
    Rating,
    PublishedDate,
}

impl SortField {
    /// Wire token for this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::Price => "price",
            SortField::Rating => "rating",
            SortField::PublishedDate => "publishedDate",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortField::Title => "Title",
            SortField::Author => "Author",
            SortField::Price => "Price",
            SortField::Rating => "Rating",
            SortField::PublishedDate => "Publication date",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortField::Title),
            "author" => Ok(SortField::Author),
            "price" => Ok(SortField::Price),
            "rating" => Ok(SortField::Rating),
            "publishedDate" => Ok(SortField::PublishedDate),
            other => Err(ModelError::UnknownSortField(other.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Wire token for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(ModelError::UnknownSortDirection(other.to_string())),
        }
    }
}

/// A sort field paired with a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookSortOption {
    pub field: SortField,
    pub direction: SortDirection,
}

impl BookSortOption {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: SortField) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: SortField) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// Parses `field` or `field:direction`, e.g. `price:desc`.
impl FromStr for BookSortOption {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((field, direction)) => Ok(Self::new(field.parse()?, direction.parse()?)),
            None => Ok(Self::asc(s.parse()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_tokens() {
        let value = serde_json::to_value(BookSortOption::desc(SortField::PublishedDate)).unwrap();
        assert_eq!(value["field"], "publishedDate");
        assert_eq!(value["direction"], "desc");
    }

    #[test]
    fn test_parse_sort_option() {
        let sort: BookSortOption = "price:desc".parse().unwrap();
        assert_eq!(sort, BookSortOption::desc(SortField::Price));

        let sort: BookSortOption = "title".parse().unwrap();
        assert_eq!(sort, BookSortOption::asc(SortField::Title));
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        assert!("pages".parse::<BookSortOption>().is_err());
        assert!("price:up".parse::<BookSortOption>().is_err());
        assert!("Price".parse::<SortField>().is_err());
    }

    #[test]
    fn test_tokens_match_display() {
        for field in [
            SortField::Title,
            SortField::Author,
            SortField::Price,
            SortField::Rating,
            SortField::PublishedDate,
        ] {
            assert_eq!(field.to_string().parse::<SortField>().unwrap(), field);
        }
    }
}
