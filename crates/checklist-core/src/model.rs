use crate::error::{ChecklistError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Item / Category / ChecklistDocument
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub action: String,
    pub reason: String,
    pub insight: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub items: Vec<Item>,
}

/// The whole checklist. Always persisted and loaded as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChecklistDocument {
    pub title: String,
    pub categories: Vec<Category>,
}

impl ChecklistDocument {
    // -----------------------------------------------------------------------
    // Parsing / serialization
    // -----------------------------------------------------------------------

    /// Parse and validate a serialized document.
    pub fn parse(text: &str) -> Result<Self> {
        let doc: ChecklistDocument = serde_json::from_str(text)
            .map_err(|e| ChecklistError::InvalidDocument(e.to_string()))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Validate an already-decoded JSON value, e.g. a remote record payload.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let doc: ChecklistDocument = serde_json::from_value(value)
            .map_err(|e| ChecklistError::InvalidDocument(e.to_string()))?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Category and item ids must each be unique across the document.
    pub fn validate(&self) -> Result<()> {
        let mut category_ids = HashSet::new();
        let mut item_ids = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(ChecklistError::InvalidDocument(format!(
                    "duplicate category id '{}'",
                    category.id
                )));
            }
            for item in &category.items {
                if !item_ids.insert(item.id.as_str()) {
                    return Err(ChecklistError::InvalidDocument(format!(
                        "duplicate item id '{}'",
                        item.id
                    )));
                }
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items().find(|i| i.id == id)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    // -----------------------------------------------------------------------
    // Mutations: only `completed` ever changes
    // -----------------------------------------------------------------------

    /// Flip `completed` on the item with `id`. Returns false if no such item.
    pub fn toggle_item(&mut self, id: &str) -> bool {
        for category in &mut self.categories {
            if let Some(item) = category.items.iter_mut().find(|i| i.id == id) {
                item.completed = !item.completed;
                return true;
            }
        }
        false
    }

    /// Set `completed = false` on every item of the category. Returns false
    /// if no such category.
    pub fn uncheck_category(&mut self, id: &str) -> bool {
        let Some(category) = self.categories.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        for item in &mut category.items {
            item.completed = false;
        }
        true
    }

    // -----------------------------------------------------------------------
    // Progress
    // -----------------------------------------------------------------------

    pub fn progress(&self) -> Progress {
        Progress::of(self.items())
    }
}

impl Category {
    pub fn progress(&self) -> Progress {
        Progress::of(self.items.iter())
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

impl Progress {
    fn of<'a>(items: impl Iterator<Item = &'a Item>) -> Self {
        let (completed, total) = items.fold((0, 0), |(done, total), item| {
            (done + usize::from(item.completed), total + 1)
        });
        let percent = if total == 0 {
            0
        } else {
            ((completed as f64 * 100.0) / total as f64).round() as u32
        };
        Self {
            completed,
            total,
            percent,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({}%)", self.completed, self.total, self.percent)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
