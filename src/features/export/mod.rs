//! # Conversation Export
//!
//! Writes the persona registry and the full shared memory to a timestamped
//! JSON file.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::features::memory::{ConversationStore, Exchange};
use crate::features::personas::{Persona, PersonaManager};

pub const EXPORT_FILE_PREFIX: &str = "chatbot_global_conversations_";
pub const SESSION_TYPE: &str = "shared_memory_across_personas";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub export_timestamp: DateTime<Local>,
    pub session_type: String,
    pub personas: IndexMap<String, Persona>,
    pub global_conversation_history: Vec<Exchange>,
    pub total_exchanges: usize,
}

impl ExportDocument {
    pub fn new(
        personas: &PersonaManager,
        store: &ConversationStore,
        export_timestamp: DateTime<Local>,
    ) -> Self {
        let history = store.to_vec();
        ExportDocument {
            export_timestamp,
            session_type: SESSION_TYPE.to_string(),
            personas: personas.personas().clone(),
            total_exchanges: history.len(),
            global_conversation_history: history,
        }
    }
}

/// `chatbot_global_conversations_YYYYMMDD_HHMMSS.json`
pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("{EXPORT_FILE_PREFIX}{}.json", now.format("%Y%m%d_%H%M%S"))
}

/// Write `document` into `dir` and return the path of the new file
pub fn write_export(
    dir: &Path,
    document: &ExportDocument,
    now: DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(export_file_name(now));

    if let Err(e) = write_document(&path, document) {
        error!("Failed to write export file {}: {e}", path.display());
        if matches!(e, ExportError::Io { .. }) {
            // Don't leave a truncated export behind
            let _ = fs::remove_file(&path);
        }
        return Err(e);
    }

    info!(
        "Exported {} exchanges to {}",
        document.total_exchanges,
        path.display()
    );
    Ok(path)
}

/// Serialize fully in memory, then write in one go
fn write_document(path: &Path, document: &ExportDocument) -> Result<(), ExportError> {
    let mut bytes = serde_json::to_vec_pretty(document)?;
    bytes.push(b'\n');
    fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
