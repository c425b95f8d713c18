//! Orchestrates one full audit: read image, encode, analyze, project.

use crate::core::analysis::AnalysisClient;
use crate::core::encode::{detect_mime, encode_image};
use crate::core::overlay;
use crate::core::session::RequestSeq;
use crate::domain::model::{BoundingBox, OverlayRect};
use crate::domain::ports::{GenerativeBackend, ImageStore};
use crate::utils::error::{AuditError, Result};
use crate::utils::validation::validate_non_empty_string;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub item: BoundingBox,
    /// `None` when the box was degenerate and should not be rendered.
    pub overlay: Option<OverlayRect>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub answer: String,
    pub detections: Vec<Detection>,
}

pub struct AuditEngine<S: ImageStore, B: GenerativeBackend> {
    store: S,
    analysis: AnalysisClient<B>,
    seq: RequestSeq,
}

impl<S: ImageStore, B: GenerativeBackend> AuditEngine<S, B> {
    pub fn new(store: S, backend: B) -> Self {
        Self {
            store,
            analysis: AnalysisClient::new(backend),
            seq: RequestSeq::new(),
        }
    }

    /// Run one audit. Overlapping runs on a shared engine race under
    /// "latest request wins": a run whose analysis completes after a newer
    /// run was issued returns `Superseded` rather than stale results.
    pub async fn run(&self, image_path: &str, prompt: &str) -> Result<AuditReport> {
        validate_non_empty_string("prompt", prompt)?;
        let mime_type = detect_mime(Path::new(image_path))?;

        tracing::info!("Reading image: {}", image_path);
        let bytes = self.store.read_file(image_path).await?;
        tracing::debug!("Read {} bytes ({})", bytes.len(), mime_type);
        let payload = encode_image(&bytes);

        let ticket = self.seq.issue();
        let analysis = self.analysis.analyze(&payload, mime_type, prompt).await?;
        if !self.seq.is_current(ticket) {
            tracing::warn!("Discarding analysis for superseded request #{}", ticket);
            return Err(AuditError::Superseded);
        }

        tracing::info!("Analysis returned {} detected items", analysis.items.len());
        let detections = analysis
            .items
            .into_iter()
            .map(|item| Detection {
                overlay: overlay::project(&item),
                item,
            })
            .collect();

        Ok(AuditReport {
            answer: analysis.answer,
            detections,
        })
    }
}
