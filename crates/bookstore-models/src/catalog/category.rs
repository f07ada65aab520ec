//! Category types for book organization.

use crate::de::null_as_default;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A book category.
///
/// Categories form an optional tree through `parent_category_id`. They are
/// read-only server data, so no cycle checks are made.
///
/// Decodes from a full record or from a bare name, which becomes both the id
/// and the name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", from = "RawCategory")]
pub struct BookCategory {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Category description.
    pub description: String,
    /// Parent category ID (None for root categories).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_category_id: Option<CategoryId>,
}

/// Wire form of a category before it is normalized.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCategory {
    Name(String),
    Record(CategoryRecord),
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct CategoryRecord {
    #[serde(deserialize_with = "null_as_default")]
    id: CategoryId,
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    description: String,
    parent_category_id: Option<CategoryId>,
}

impl From<RawCategory> for BookCategory {
    fn from(raw: RawCategory) -> Self {
        match raw {
            RawCategory::Name(name) => BookCategory::new(name.clone(), name),
            RawCategory::Record(record) => BookCategory {
                id: record.id,
                name: record.name,
                description: record.description,
                parent_category_id: record.parent_category_id,
            },
        }
    }
}

impl BookCategory {
    /// Create a new root category.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            parent_category_id: None,
        }
    }

    /// Attach this category under a parent.
    pub fn with_parent(mut self, parent: impl Into<CategoryId>) -> Self {
        self.parent_category_id = Some(parent.into());
        self
    }

    /// Check if this is a root category.
    pub fn is_root(&self) -> bool {
        self.parent_category_id.is_none()
    }

    /// Check if this category sits directly under `other`.
    pub fn is_child_of(&self, other: &BookCategory) -> bool {
        self.parent_category_id.as_ref() == Some(&other.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_category() {
        let cat = BookCategory::new("fiction", "Fiction");
        assert!(cat.is_root());
        assert_eq!(cat.name, "Fiction");
    }

    #[test]
    fn test_child_category() {
        let parent = BookCategory::new("fiction", "Fiction");
        let child = BookCategory::new("scifi", "Science Fiction").with_parent("fiction");

        assert!(!child.is_root());
        assert!(child.is_child_of(&parent));
        assert!(!parent.is_child_of(&child));
    }

    #[test]
    fn test_parent_field_wire_name() {
        let child = BookCategory::new("scifi", "Science Fiction").with_parent("fiction");
        let value = serde_json::to_value(&child).unwrap();
        assert_eq!(value["parentCategoryId"], "fiction");

        let root = serde_json::to_value(BookCategory::new("fiction", "Fiction")).unwrap();
        assert!(root.get("parentCategoryId").is_none());
    }

    #[test]
    fn test_decode_without_parent() {
        let cat: BookCategory =
            serde_json::from_value(json!({ "id": "poetry", "name": "Poetry" })).unwrap();
        assert!(cat.is_root());
        assert_eq!(cat.description, "");
    }

    #[test]
    fn test_decode_bare_name() {
        let cat: BookCategory = serde_json::from_value(json!("beauty")).unwrap();
        assert_eq!(cat, BookCategory::new("beauty", "beauty"));
    }

    #[test]
    fn test_decode_nulls_in_record() {
        let cat: BookCategory = serde_json::from_value(json!({
            "id": 4,
            "name": "Poetry",
            "description": null,
            "parentCategoryId": null
        }))
        .unwrap();
        assert_eq!(cat.id.as_str(), "4");
        assert_eq!(cat.description, "");
        assert!(cat.is_root());
    }
}
