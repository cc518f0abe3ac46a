//! Category name to id lookup, built incrementally during a run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::CategoryId;

/// A category seen during a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Assigns sequential ids to category names in first-seen order, starting at 1.
#[derive(Clone, Debug, Default)]
pub struct CategoryTable {
    id_by_name: BTreeMap<String, CategoryId>,
    categories: Vec<Category>,
}

impl CategoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `name`, assigning the next one if the name is new.
    pub fn get_or_insert(&mut self, name: &str) -> CategoryId {
        if let Some(id) = self.id_by_name.get(name) {
            return *id;
        }

        let id = CategoryId::new(self.categories.len() as u64 + 1);
        self.id_by_name.insert(name.to_string(), id);
        self.categories.push(Category {
            id,
            name: name.to_string(),
        });
        id
    }

    pub fn get(&self, name: &str) -> Option<CategoryId> {
        self.id_by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Categories in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn into_categories(self) -> Vec<Category> {
        self.categories
    }
}
