use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::ResourceRow;
use crate::db::types::ResourceKind;

/// Variant-specific part of a resource, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub(crate) enum ResourceBody {
    CodeExample { code: String },
    Quiz { question: String, answer: String },
}

impl ResourceBody {
    pub(crate) fn kind(&self) -> ResourceKind {
        match self {
            Self::CodeExample { .. } => ResourceKind::CodeExample,
            Self::Quiz { .. } => ResourceKind::Quiz,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ResourceCreate {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters long"))]
    pub(crate) title: String,
    #[validate(length(min = 1, max = 50, message = "difficulty must be 1-50 characters long"))]
    pub(crate) difficulty: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(flatten)]
    pub(crate) body: ResourceBody,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResourceResponse {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) difficulty: String,
    pub(crate) description: Option<String>,
    #[serde(flatten)]
    pub(crate) body: ResourceBody,
    pub(crate) created_at: String,
}

impl ResourceResponse {
    pub(crate) fn from_db(row: ResourceRow) -> Self {
        // The table CHECK keeps the variant columns populated for their kind.
        let body = match row.kind {
            ResourceKind::CodeExample => {
                ResourceBody::CodeExample { code: row.code.unwrap_or_default() }
            }
            ResourceKind::Quiz => ResourceBody::Quiz {
                question: row.question.unwrap_or_default(),
                answer: row.answer.unwrap_or_default(),
            },
        };

        Self {
            id: row.id,
            title: row.title,
            difficulty: row.difficulty,
            description: row.description,
            body,
            created_at: format_primitive(row.created_at),
        }
    }
}

/// Unsaved resource produced by a learning kit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ResourceExample {
    pub(crate) title: String,
    pub(crate) difficulty: String,
    pub(crate) description: Option<String>,
    #[serde(flatten)]
    pub(crate) body: ResourceBody,
}
