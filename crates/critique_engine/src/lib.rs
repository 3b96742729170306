//! Critique engine: analysis client, background execution, file-backed
//! state and snapshot export.
mod client;
mod engine;
mod export;
mod filename;
mod persist;
mod state_file;
mod types;

pub use client::{load_document, AnalysisClient, ClientSettings, ReqwestAnalysisClient, SERVER_ERROR};
pub use engine::EngineHandle;
pub use export::{export_snapshot, ExportError, ExportSummary, HtmlSnapshotRenderer, SnapshotRenderer};
pub use filename::snapshot_filename;
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use state_file::FileStateStore;
pub use types::{AnalysisError, AnalysisRequest, DocumentUpload, EngineEvent};
