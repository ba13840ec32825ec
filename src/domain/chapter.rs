//! Story Chapter Entity
//!
//! A chapter of the chain's story, optionally tied to one jump. The body
//! text is normalized through the formatter on import; imported chapters
//! keep the content hash of their source file for de-duplication.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    /// Unique identifier
    pub id: u32,
    /// Owning jump, if any
    pub jump_id: Option<u32>,
    pub title: String,
    pub body: String,
    /// Position within the story (dense, 0-based)
    pub position: i32,
    /// blake3 hex digest of the imported source file, if imported
    pub source_hash: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Chapter {
    pub fn new(id: u32, title: String, body: String) -> Self {
        Self {
            id,
            jump_id: None,
            title,
            body,
            position: 0,
            source_hash: None,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Entity for Chapter {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
