//! Form state container for the resume customization flow.
//!
//! One `FormState` instance owns everything the view layer needs: the
//! job-description text, the selected model, the uploaded file, the
//! submission lifecycle flag, the inline error, and the returned document.
//! All mutations are synchronous except `submit`, the single suspension point.

use std::path::{Path, PathBuf};

use anyhow::Context;
use bytes::Bytes;

use crate::catalog;
use crate::download;
use crate::errors::FormError;
use crate::service::{CustomizeService, ServiceError};

/// Hard ceiling on uploaded resume size.
pub const MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

/// Extensions the picker advertises. Advisory only — content is never inspected.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// An uploaded resume: a name, a reported byte size, and the raw content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub size: u64,
    pub content: Bytes,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            size: content.len() as u64,
            content,
        }
    }

    /// Loads a resume from disk, taking the display name from the path.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read(path)
            .with_context(|| format!("Failed to read resume file '{}'", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume")
            .to_string();
        Ok(Self::new(name, content))
    }

    /// Whether the file name carries one of the advertised extensions.
    pub fn has_accepted_extension(&self) -> bool {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                ACCEPTED_EXTENSIONS
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

/// Lifecycle: Idle → Submitting → Idle-with-result | Idle-with-error.
#[derive(Debug)]
pub struct FormState {
    job_description: String,
    selected_model: String,
    uploaded_file: Option<ResumeFile>,
    submitting: bool,
    error: Option<FormError>,
    result_document: Option<Bytes>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Fresh form: empty text, first catalog entry selected, nothing uploaded.
    pub fn new() -> Self {
        Self {
            job_description: String::new(),
            selected_model: catalog::default_model().id.to_string(),
            uploaded_file: None,
            submitting: false,
            error: None,
            result_document: None,
        }
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn selected_model(&self) -> &str {
        &self.selected_model
    }

    pub fn uploaded_file(&self) -> Option<&ResumeFile> {
        self.uploaded_file.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    pub fn result_document(&self) -> Option<&Bytes> {
        self.result_document.as_ref()
    }

    /// Replaces the stored text verbatim. No trimming, no length cap; the
    /// non-empty check happens at submit time only.
    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    /// Selects a model iff the id names an available catalog entry.
    /// Disabled and unknown ids are silent no-ops: the interaction layer is
    /// expected to disable those controls, so there is no error to report.
    pub fn select_model(&mut self, id: &str) {
        if let Some(option) = catalog::find(id) {
            if option.available {
                self.selected_model = option.id.to_string();
            }
        }
    }

    /// Accepts a file within the size ceiling, clearing any inline error.
    /// An oversized file sets the size-limit error and leaves a previously
    /// accepted file untouched.
    pub fn select_file(&mut self, file: ResumeFile) {
        if file.size > MAX_RESUME_BYTES {
            self.error = Some(FormError::FileTooLarge);
            return;
        }
        self.uploaded_file = Some(file);
        self.error = None;
    }

    /// Runs the one network operation of the form.
    ///
    /// Preconditions: a file is uploaded and the job description is non-blank.
    /// On precondition failure the error is set and no call is made;
    /// `submitting` was never raised, so it stays false. Every terminal path
    /// of an actual call lowers `submitting` again.
    ///
    /// Overlapping submissions are unrepresentable here (`&mut self`); keeping
    /// the submit control disabled while pending is the caller's job.
    pub async fn submit(&mut self, service: &dyn CustomizeService) {
        let file = match self.uploaded_file.clone() {
            Some(file) if !self.job_description.trim().is_empty() => file,
            _ => {
                self.error = Some(FormError::MissingInput);
                return;
            }
        };

        self.submitting = true;
        self.error = None;

        match service
            .customize(&file, &self.job_description, &self.selected_model)
            .await
        {
            Ok(document) => {
                self.result_document = Some(document);
            }
            Err(ServiceError::Status { status }) => {
                self.error = Some(FormError::Request(status));
            }
            Err(ServiceError::Transport { message }) => {
                self.error = Some(FormError::transport(message));
            }
        }

        self.submitting = false;
    }

    /// Writes the customized document into `dir` under a dated file name.
    /// No-op (`Ok(None)`) while no result is present.
    pub fn download(&self, dir: &Path) -> anyhow::Result<Option<PathBuf>> {
        match &self.result_document {
            Some(document) => download::save_document(document, dir).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    /// Scripted service double: returns a fixed outcome and counts calls.
    struct ScriptedService {
        outcome: Result<Bytes, ServiceError>,
        calls: AtomicUsize,
    }

    impl ScriptedService {
        fn ok(body: &[u8]) -> Self {
            Self {
                outcome: Ok(Bytes::copy_from_slice(body)),
                calls: AtomicUsize::new(0),
            }
        }

        fn err(err: ServiceError) -> Self {
            Self {
                outcome: Err(err),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CustomizeService for ScriptedService {
        async fn customize(
            &self,
            _file: &ResumeFile,
            _job_description: &str,
            _model_id: &str,
        ) -> Result<Bytes, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn small_file() -> ResumeFile {
        ResumeFile::new("resume.pdf", &b"%PDF-1.4 resume"[..])
    }

    fn oversize_file() -> ResumeFile {
        // The check runs against the reported size, so no 5 MiB allocation.
        ResumeFile {
            name: "huge.pdf".to_string(),
            size: MAX_RESUME_BYTES + 1,
            content: Bytes::new(),
        }
    }

    fn filled_form() -> FormState {
        let mut state = FormState::new();
        state.select_file(small_file());
        state.set_job_description("Senior Rust Engineer, distributed systems.");
        state
    }

    #[test]
    fn test_new_defaults() {
        let state = FormState::new();
        assert_eq!(state.job_description(), "");
        assert_eq!(state.selected_model(), catalog::default_model().id);
        assert!(state.uploaded_file().is_none());
        assert!(!state.is_submitting());
        assert!(state.error().is_none());
        assert!(state.result_document().is_none());
    }

    #[test]
    fn test_job_description_is_stored_verbatim() {
        let mut state = FormState::new();
        state.set_job_description("  leading and trailing kept  ");
        assert_eq!(state.job_description(), "  leading and trailing kept  ");
    }

    #[test]
    fn test_select_model_available() {
        let mut state = FormState::new();
        state.select_model("anthropic");
        assert_eq!(state.selected_model(), "anthropic");
    }

    #[test]
    fn test_select_model_disabled_is_noop() {
        let mut state = FormState::new();
        state.select_model("openai");
        assert_eq!(state.selected_model(), catalog::default_model().id);
    }

    #[test]
    fn test_select_model_unknown_is_noop() {
        let mut state = FormState::new();
        state.select_model("mistral");
        assert_eq!(state.selected_model(), catalog::default_model().id);
    }

    #[test]
    fn test_select_file_stores_and_clears_error() {
        let mut state = FormState::new();
        state.select_file(oversize_file());
        assert_eq!(state.error(), Some(&FormError::FileTooLarge));

        state.select_file(small_file());
        assert_eq!(state.uploaded_file().unwrap().name, "resume.pdf");
        assert!(state.error().is_none());
    }

    #[test]
    fn test_select_file_oversize_keeps_previous_file() {
        let mut state = FormState::new();
        state.select_file(small_file());

        state.select_file(oversize_file());
        assert_eq!(state.error(), Some(&FormError::FileTooLarge));
        // The earlier accepted file survives the rejection.
        assert_eq!(state.uploaded_file().unwrap().name, "resume.pdf");
    }

    #[test]
    fn test_select_file_oversize_without_previous_stores_nothing() {
        let mut state = FormState::new();
        state.select_file(oversize_file());
        assert!(state.uploaded_file().is_none());
    }

    #[test]
    fn test_accepted_extensions_are_case_insensitive() {
        assert!(ResumeFile::new("cv.PDF", &b"x"[..]).has_accepted_extension());
        assert!(ResumeFile::new("cv.docx", &b"x"[..]).has_accepted_extension());
        assert!(!ResumeFile::new("cv.txt", &b"x"[..]).has_accepted_extension());
        assert!(!ResumeFile::new("no-extension", &b"x"[..]).has_accepted_extension());
    }

    #[tokio::test]
    async fn test_submit_without_file_makes_no_call() {
        let service = ScriptedService::ok(b"doc");
        let mut state = FormState::new();
        state.set_job_description("some role");

        state.submit(&service).await;

        assert_eq!(service.calls(), 0);
        assert_eq!(state.error(), Some(&FormError::MissingInput));
        assert!(!state.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_with_blank_job_description_makes_no_call() {
        let service = ScriptedService::ok(b"doc");
        let mut state = FormState::new();
        state.select_file(small_file());
        state.set_job_description("   \n\t ");

        state.submit(&service).await;

        assert_eq!(service.calls(), 0);
        assert_eq!(state.error(), Some(&FormError::MissingInput));
        assert!(!state.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_success_stores_body_and_clears_error() {
        let body = b"PK\x03\x04 customized document";
        let service = ScriptedService::ok(body);
        let mut state = FormState::new();

        // Seed an error from an earlier failed action.
        state.submit(&ScriptedService::ok(b"ignored")).await;
        assert!(state.error().is_some());

        state.select_file(small_file());
        state.set_job_description("Senior Rust Engineer");
        state.submit(&service).await;

        assert_eq!(service.calls(), 1);
        assert_eq!(state.result_document().unwrap().as_ref(), &body[..]);
        assert!(state.error().is_none());
        assert!(!state.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_http_error_mentions_status() {
        let service = ScriptedService::err(ServiceError::Status { status: 500 });
        let mut state = filled_form();

        state.submit(&service).await;

        assert!(state.error().unwrap().to_string().contains("500"));
        assert!(state.result_document().is_none());
        assert!(!state.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_transport_error_surfaces_message() {
        let service = ScriptedService::err(ServiceError::Transport {
            message: "connection refused".to_string(),
        });
        let mut state = filled_form();

        state.submit(&service).await;

        assert_eq!(
            state.error().unwrap().to_string(),
            "connection refused"
        );
        assert!(!state.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_transport_error_with_blank_message_uses_fallback() {
        let service = ScriptedService::err(ServiceError::Transport {
            message: String::new(),
        });
        let mut state = filled_form();

        state.submit(&service).await;

        assert_eq!(
            state.error().unwrap().to_string(),
            crate::errors::GENERIC_SUBMIT_FAILURE
        );
    }

    #[test]
    fn test_download_without_result_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let state = FormState::new();

        let saved = state.download(dir.path()).unwrap();

        assert!(saved.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_download_writes_result_bytes() {
        let body = b"PK\x03\x04 customized document";
        let mut state = filled_form();
        state.submit(&ScriptedService::ok(body)).await;

        let dir = tempfile::tempdir().unwrap();
        let path = state.download(dir.path()).unwrap().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), body);
    }
}
