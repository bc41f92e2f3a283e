//! Transport-independent request handling: store the upload, run the
//! pipeline, shape the response body.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use biz_config::BizConfig;
use biz_core::RequestId;
use biz_core::responses::{AgentRequest, AgentResponse, ReportResponse, UploadResponse};
use biz_llm::Summarizer;

use crate::error::ServiceError;
use crate::pipeline::{ReportPipeline, run_blocking};
use crate::upload::UploadStore;

/// An uploaded CSV file as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Upload {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

pub struct Service<S> {
    pipeline: ReportPipeline<S>,
    uploads: UploadStore,
}

impl<S: Summarizer> Service<S> {
    pub fn new(config: Arc<BizConfig>, summarizer: Option<S>) -> Self {
        let uploads = UploadStore::new(config.storage.uploads_dir());
        Self {
            pipeline: ReportPipeline::new(config, summarizer),
            uploads,
        }
    }

    pub fn config(&self) -> &BizConfig {
        self.pipeline.config()
    }

    /// `POST /upload/`: insight lines of the uploaded table.
    pub async fn upload(
        &self,
        id: &RequestId,
        upload: Upload,
    ) -> Result<UploadResponse, ServiceError> {
        let csv = self.store(id, upload).await?;
        let insights = self.pipeline.insight_lines(csv).await?;
        Ok(UploadResponse { insights })
    }

    /// `POST /report/`: full pipeline, answering with the PDF path relative
    /// to the storage base directory.
    pub async fn report(
        &self,
        id: &RequestId,
        upload: Upload,
    ) -> Result<ReportResponse, ServiceError> {
        let csv = self.store(id, upload).await?;
        let pdf = self.pipeline.report(csv, id).await?;
        let relative = relative_to(&pdf, &self.config().storage.base_dir);
        Ok(ReportResponse::from_path(&relative.to_string_lossy()))
    }

    /// `POST /agent/`: pass the message straight to the summarizer.
    pub async fn agent(&self, request: AgentRequest) -> Result<AgentResponse, ServiceError> {
        let summarizer = self.pipeline.summarizer().ok_or(ServiceError::LlmDisabled)?;
        if request.message.trim().is_empty() {
            return Err(ServiceError::BadRequest("message must not be empty".into()));
        }
        let reply = summarizer.summarize(&request.message).await?;
        Ok(AgentResponse { reply })
    }

    /// Location of a previously generated report, for download.
    pub fn report_file(&self, name: &str) -> Result<PathBuf, ServiceError> {
        let path = self.config().storage.reports_dir().join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(ServiceError::NotFound(format!("reports/{name}")))
        }
    }

    async fn store(&self, id: &RequestId, upload: Upload) -> Result<PathBuf, ServiceError> {
        if upload.bytes.is_empty() {
            return Err(ServiceError::BadRequest("empty upload".into()));
        }
        let store = self.uploads.clone();
        let id = id.clone();
        run_blocking(move || Ok(store.save(&id, upload.filename.as_deref(), &upload.bytes)?))
            .await
    }
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
}
