//! Declared field layout of a document type

use super::kind::DocumentKind;
use crate::state::forms::{FieldMap, FieldPath, FieldPathError};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{0} schema declares no steps")]
    NoSteps(DocumentKind),
    #[error("step '{0}' declares no fields")]
    EmptyStep(String),
    #[error("invalid field path: {0}")]
    InvalidPath(#[from] FieldPathError),
    #[error("field '{0}' is declared twice")]
    DuplicateField(String),
    #[error("field '{leaf}' is both a value and the parent of '{nested}'")]
    ConflictingField { leaf: String, nested: String },
}

/// One input of a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub path: FieldPath,
    pub label: String,
    pub multiline: bool,
}

/// One page of a multi-step form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSpec {
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

/// Validated schema: ordered steps, each owning a subset of the field paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSchema {
    kind: DocumentKind,
    steps: Vec<StepSpec>,
}

impl DocumentSchema {
    pub fn builder(kind: DocumentKind) -> SchemaBuilder {
        SchemaBuilder {
            kind,
            steps: Vec::new(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn steps(&self) -> &[StepSpec] {
        &self.steps
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.steps.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, path: &FieldPath) -> Option<&FieldSpec> {
        self.fields().find(|f| &f.path == path)
    }

    /// Field map with every declared leaf set to `""`
    pub fn initial_field_map(&self) -> FieldMap {
        FieldMap::with_empty_leaves(self.fields().map(|f| &f.path))
    }
}

/// Builder for [`DocumentSchema`]; paths are checked in [`SchemaBuilder::build`]
pub struct SchemaBuilder {
    kind: DocumentKind,
    steps: Vec<StepBuilder>,
}

impl SchemaBuilder {
    pub fn step(mut self, title: &str, fields: impl FnOnce(StepBuilder) -> StepBuilder) -> Self {
        self.steps.push(fields(StepBuilder {
            title: title.to_string(),
            fields: Vec::new(),
        }));
        self
    }

    pub fn build(self) -> Result<DocumentSchema, SchemaError> {
        if self.steps.is_empty() {
            return Err(SchemaError::NoSteps(self.kind));
        }

        let mut seen = HashSet::new();
        let mut all_paths: Vec<FieldPath> = Vec::new();
        let mut steps = Vec::with_capacity(self.steps.len());

        for draft in self.steps {
            if draft.fields.is_empty() {
                return Err(SchemaError::EmptyStep(draft.title));
            }
            let mut fields = Vec::with_capacity(draft.fields.len());
            for (raw, label, multiline) in draft.fields {
                let path = FieldPath::parse(&raw)?;
                if !seen.insert(path.clone()) {
                    return Err(SchemaError::DuplicateField(raw));
                }
                if let Some(conflict) = all_paths
                    .iter()
                    .find(|p| p.is_ancestor_of(&path) || path.is_ancestor_of(p))
                {
                    let (leaf, nested) = if conflict.is_ancestor_of(&path) {
                        (conflict.to_string(), raw)
                    } else {
                        (raw, conflict.to_string())
                    };
                    return Err(SchemaError::ConflictingField { leaf, nested });
                }
                all_paths.push(path.clone());
                fields.push(FieldSpec {
                    path,
                    label,
                    multiline,
                });
            }
            steps.push(StepSpec {
                title: draft.title,
                fields,
            });
        }

        Ok(DocumentSchema {
            kind: self.kind,
            steps,
        })
    }
}

pub struct StepBuilder {
    title: String,
    fields: Vec<(String, String, bool)>,
}

impl StepBuilder {
    pub fn field(mut self, path: &str, label: &str) -> Self {
        self.fields.push((path.to_string(), label.to_string(), false));
        self
    }

    pub fn multiline(mut self, path: &str, label: &str) -> Self {
        self.fields.push((path.to_string(), label.to_string(), true));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    #[test]
    fn test_build_simple_schema() {
        let schema = DocumentSchema::builder(DocumentKind::Nda)
            .step("One", |s| s.field("a", "A").multiline("b.c", "C"))
            .step("Two", |s| s.field("b.d", "D"))
            .build()
            .unwrap();

        assert_eq!(schema.kind(), DocumentKind::Nda);
        assert_eq!(schema.steps().len(), 2);
        assert_eq!(schema.fields().count(), 3);
        assert!(schema.field(&path("b.c")).unwrap().multiline);
        assert!(!schema.field(&path("a")).unwrap().multiline);
        assert!(schema.field(&path("b")).is_none());
        assert_eq!(schema.steps()[1].title, "Two");
        assert_eq!(schema.steps().len(), 2);
    }

    #[test]
    fn test_initial_field_map_is_blank() {
        let schema = DocumentSchema::builder(DocumentKind::Nda)
            .step("One", |s| s.field("a", "A").field("b.c", "C"))
            .build()
            .unwrap();
        let map = schema.initial_field_map();
        assert_eq!(map.get(&path("a")), Some(""));
        assert_eq!(map.get(&path("b.c")), Some(""));
        assert_eq!(map.leaves().len(), 2);
    }

    #[test]
    fn test_rejects_no_steps() {
        let err = DocumentSchema::builder(DocumentKind::Nda).build().unwrap_err();
        assert!(matches!(err, SchemaError::NoSteps(DocumentKind::Nda)));
    }

    #[test]
    fn test_rejects_empty_step() {
        let err = DocumentSchema::builder(DocumentKind::Nda)
            .step("Empty", |s| s)
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::EmptyStep(title) if title == "Empty"));
    }

    #[test]
    fn test_rejects_bad_path() {
        let err = DocumentSchema::builder(DocumentKind::Nda)
            .step("One", |s| s.field("a.b.c.d", "Too deep"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPath(FieldPathError::TooDeep { .. })));
    }

    #[test]
    fn test_rejects_duplicate_across_steps() {
        let err = DocumentSchema::builder(DocumentKind::Nda)
            .step("One", |s| s.field("a", "A"))
            .step("Two", |s| s.field("a", "A again"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField(p) if p == "a"));
    }

    #[test]
    fn test_rejects_leaf_and_branch() {
        let err = DocumentSchema::builder(DocumentKind::Nda)
            .step("One", |s| s.field("a.b", "Nested").field("a", "Leaf"))
            .build()
            .unwrap_err();
        match err {
            SchemaError::ConflictingField { leaf, nested } => {
                assert_eq!(leaf, "a");
                assert_eq!(nested, "a.b");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
