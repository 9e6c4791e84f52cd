//! Furniture record, update payload, and field validation.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{FurnitureId, MAX_CATEGORY_LEN, MAX_NAME_LEN, Price, Quantity, SortKey};

/// Canonical furniture record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FurnitureRecord {
    /// Unique positive identifier.
    pub id: FurnitureId,
    /// Display name.
    pub name: String,
    /// Category label used for grouping.
    pub category: String,
    /// Unit price.
    pub price: Price,
    /// Units in stock.
    pub quantity: Quantity,
}

impl FurnitureRecord {
    /// Builds a record from its fields.
    pub fn new(
        id: FurnitureId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
            quantity,
        }
    }

    /// Checks the text fields against length and separator rules.
    pub fn validate_fields(&self) -> Result<(), InvalidField> {
        validate_text(RecordField::Name, &self.name, MAX_NAME_LEN)?;
        validate_text(RecordField::Category, &self.category, MAX_CATEGORY_LEN)
    }

    /// Ascending comparison on a single field.
    pub fn cmp_by(&self, other: &Self, key: SortKey) -> Ordering {
        match key {
            SortKey::Id => self.id.cmp(&other.id),
            SortKey::Name => self.name.as_bytes().cmp(other.name.as_bytes()),
            SortKey::Category => self.category.as_bytes().cmp(other.category.as_bytes()),
            SortKey::Price => self.price.cmp(&other.price),
            SortKey::Quantity => self.quantity.cmp(&other.quantity),
        }
    }
}

/// Replacement payload for every mutable field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnitureUpdate {
    /// New name.
    pub name: String,
    /// New category.
    pub category: String,
    /// New price.
    pub price: Price,
    /// New quantity.
    pub quantity: Quantity,
}

impl FurnitureUpdate {
    /// Captures the current payload of `rec`, usable to revert an update.
    pub fn capture_from(rec: &FurnitureRecord) -> Self {
        Self {
            name: rec.name.clone(),
            category: rec.category.clone(),
            price: rec.price,
            quantity: rec.quantity,
        }
    }

    /// Checks the text fields against length and separator rules.
    pub fn validate_fields(&self) -> Result<(), InvalidField> {
        validate_text(RecordField::Name, &self.name, MAX_NAME_LEN)?;
        validate_text(RecordField::Category, &self.category, MAX_CATEGORY_LEN)
    }

    /// Overwrites the payload of `rec` in place. The id is left alone.
    pub fn apply_to(&self, rec: &mut FurnitureRecord) {
        rec.name.clone_from(&self.name);
        rec.category.clone_from(&self.category);
        rec.price = self.price;
        rec.quantity = self.quantity;
    }
}

/// Text field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    /// The name field.
    Name,
    /// The category field.
    Category,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordField::Name => f.write_str("name"),
            RecordField::Category => f.write_str("category"),
        }
    }
}

/// Why a text field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    /// Empty or whitespace only.
    Empty,
    /// More characters than allowed.
    TooLong {
        /// Allowed maximum.
        max: usize,
    },
    /// Contains `|` or a line break.
    ForbiddenChar(char),
    /// Starts or ends with whitespace.
    SurroundingWhitespace,
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Empty => f.write_str("must not be empty"),
            FieldProblem::TooLong { max } => write!(f, "longer than {max} characters"),
            FieldProblem::ForbiddenChar(c) => write!(f, "contains forbidden character {c:?}"),
            FieldProblem::SurroundingWhitespace => {
                f.write_str("must not start or end with whitespace")
            }
        }
    }
}

/// A text field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid {field}: {problem}")]
pub struct InvalidField {
    /// Offending field.
    pub field: RecordField,
    /// What was wrong with it.
    pub problem: FieldProblem,
}

fn validate_text(field: RecordField, value: &str, max: usize) -> Result<(), InvalidField> {
    if value.trim().is_empty() {
        return Err(InvalidField {
            field,
            problem: FieldProblem::Empty,
        });
    }
    if value.chars().count() > max {
        return Err(InvalidField {
            field,
            problem: FieldProblem::TooLong { max },
        });
    }
    if let Some(c) = value.chars().find(|c| matches!(c, '|' | '\n' | '\r')) {
        return Err(InvalidField {
            field,
            problem: FieldProblem::ForbiddenChar(c),
        });
    }
    // Lookup keys arrive trimmed.
    if value.trim() != value {
        return Err(InvalidField {
            field,
            problem: FieldProblem::SurroundingWhitespace,
        });
    }
    Ok(())
}
