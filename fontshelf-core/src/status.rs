//! Client-visible upload status (made by FontLab https://www.fontlab.com/)
//!
//! Stages advance strictly in order:
//!
//! ```text
//! idle -> uploading -> processing -> saving -> loading_font -> complete
//! ```
//!
//! `error` can be entered from any stage that is not already terminal.
//! `complete` and `error` stay put until [`UploadStatus::reset`]. Numeric
//! progress is only accepted while uploading or saving, which are the two
//! stages driven by a [`ProgressAnimator`](crate::progress::ProgressAnimator).

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::StatusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStage {
    Idle,
    Uploading,
    Processing,
    Saving,
    LoadingFont,
    Complete,
    Error,
}

impl UploadStage {
    pub fn as_str(self) -> &'static str {
        match self {
            UploadStage::Idle => "idle",
            UploadStage::Uploading => "uploading",
            UploadStage::Processing => "processing",
            UploadStage::Saving => "saving",
            UploadStage::LoadingFont => "loading_font",
            UploadStage::Complete => "complete",
            UploadStage::Error => "error",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, UploadStage::Complete | UploadStage::Error)
    }

    /// The only stage a forward transition into `self` may start from.
    fn predecessor(self) -> Option<UploadStage> {
        match self {
            UploadStage::Uploading => Some(UploadStage::Idle),
            UploadStage::Processing => Some(UploadStage::Uploading),
            UploadStage::Saving => Some(UploadStage::Processing),
            UploadStage::LoadingFont => Some(UploadStage::Saving),
            UploadStage::Complete => Some(UploadStage::LoadingFont),
            UploadStage::Idle | UploadStage::Error => None,
        }
    }
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadStatus {
    pub stage: UploadStage,
    pub progress: u8,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    /// Milliseconds on the caller's clock when the current timed stage began.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u64>,
}

impl Default for UploadStatus {
    fn default() -> Self {
        Self::idle()
    }
}

impl UploadStatus {
    pub fn idle() -> Self {
        Self::at(UploadStage::Idle, 0, "")
    }

    fn at(stage: UploadStage, progress: u8, message: impl Into<String>) -> Self {
        Self {
            stage,
            progress,
            message: message.into(),
            error: None,
            file_size: None,
            start_time: None,
        }
    }

    fn advance(&mut self, next: UploadStatus) -> Result<(), StatusError> {
        if next.stage.predecessor() != Some(self.stage) {
            return Err(StatusError::IllegalTransition {
                from: self.stage,
                to: next.stage,
            });
        }
        *self = next;
        Ok(())
    }

    fn timed(stage: UploadStage, message: &str, file_size: u64, now: Duration) -> Self {
        Self {
            file_size: Some(file_size),
            start_time: Some(now.as_millis() as u64),
            ..Self::at(stage, 0, message)
        }
    }

    pub fn start_upload(&mut self, file_size: u64, now: Duration) -> Result<(), StatusError> {
        self.advance(Self::timed(
            UploadStage::Uploading,
            "Uploading font...",
            file_size,
            now,
        ))
    }

    pub fn update_upload_progress(&mut self, progress: u8) -> Result<(), StatusError> {
        self.set_progress(UploadStage::Uploading, "Uploading font...", progress)
    }

    pub fn start_processing(&mut self) -> Result<(), StatusError> {
        self.advance(Self::at(UploadStage::Processing, 0, "Processing font..."))
    }

    pub fn start_saving(&mut self, file_size: u64, now: Duration) -> Result<(), StatusError> {
        self.advance(Self::timed(
            UploadStage::Saving,
            "Saving to cloud...",
            file_size,
            now,
        ))
    }

    pub fn update_saving_progress(&mut self, progress: u8) -> Result<(), StatusError> {
        self.set_progress(UploadStage::Saving, "Saving to cloud...", progress)
    }

    pub fn start_loading_font(&mut self) -> Result<(), StatusError> {
        self.advance(Self::at(
            UploadStage::LoadingFont,
            0,
            "Loading font preview...",
        ))
    }

    pub fn complete(&mut self) -> Result<(), StatusError> {
        self.advance(Self::at(UploadStage::Complete, 100, "Font ready!"))
    }

    /// Enter the error stage from anywhere that is not already terminal.
    pub fn error(&mut self, message: impl Into<String>) -> Result<(), StatusError> {
        if self.stage.is_terminal() {
            return Err(StatusError::IllegalTransition {
                from: self.stage,
                to: UploadStage::Error,
            });
        }
        *self = Self {
            error: Some(message.into()),
            ..Self::at(UploadStage::Error, 0, "Upload failed")
        };
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::idle();
    }

    fn set_progress(
        &mut self,
        stage: UploadStage,
        label: &str,
        progress: u8,
    ) -> Result<(), StatusError> {
        if self.stage != stage {
            return Err(StatusError::NotAnimating(self.stage));
        }
        let progress = progress.min(100);
        self.progress = progress;
        self.message = format!("{label} {progress}%");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_the_happy_path() {
        let mut status = UploadStatus::default();
        status
            .start_upload(2048, Duration::from_millis(10))
            .expect("upload");
        assert_eq!(status.start_time, Some(10));
        status.update_upload_progress(42).expect("progress");
        assert_eq!(status.message, "Uploading font... 42%");

        status.start_processing().expect("processing");
        assert_eq!(status.progress, 0);
        assert_eq!(status.file_size, None);

        status
            .start_saving(2048, Duration::from_millis(900))
            .expect("saving");
        status.update_saving_progress(95).expect("progress");
        assert_eq!(status.message, "Saving to cloud... 95%");

        status.start_loading_font().expect("loading");
        status.complete().expect("complete");
        assert_eq!(status.stage, UploadStage::Complete);
        assert_eq!(status.progress, 100);
        assert_eq!(status.message, "Font ready!");
    }

    #[test]
    fn stages_cannot_be_skipped() {
        let mut status = UploadStatus::default();
        let err = status.start_saving(1, Duration::ZERO).expect_err("skip");
        assert_eq!(
            err,
            StatusError::IllegalTransition {
                from: UploadStage::Idle,
                to: UploadStage::Saving
            }
        );
        assert_eq!(status, UploadStatus::idle());
    }

    #[test]
    fn progress_only_in_animated_stages() {
        let mut status = UploadStatus::default();
        assert_eq!(
            status.update_upload_progress(10),
            Err(StatusError::NotAnimating(UploadStage::Idle))
        );

        status.start_upload(1, Duration::ZERO).expect("upload");
        assert!(status.update_saving_progress(10).is_err());
        status.update_upload_progress(250).expect("clamped");
        assert_eq!(status.progress, 100);
    }

    #[test]
    fn error_is_reachable_and_terminal() {
        let mut status = UploadStatus::default();
        status.start_upload(1, Duration::ZERO).expect("upload");
        status.start_processing().expect("processing");
        status.error("Invalid font file").expect("error");

        assert_eq!(status.stage, UploadStage::Error);
        assert_eq!(status.message, "Upload failed");
        assert_eq!(status.error.as_deref(), Some("Invalid font file"));

        assert!(status.error("again").is_err());
        assert!(status.start_upload(1, Duration::ZERO).is_err());

        status.reset();
        assert_eq!(status, UploadStatus::idle());
        assert!(status.start_upload(1, Duration::ZERO).is_ok());
    }

    #[test]
    fn complete_is_terminal() {
        let mut status = UploadStatus::default();
        status.start_upload(1, Duration::ZERO).expect("upload");
        status.start_processing().expect("processing");
        status.start_saving(1, Duration::ZERO).expect("saving");
        status.start_loading_font().expect("loading");
        status.complete().expect("complete");

        assert!(status.error("late").is_err());
        assert!(status.complete().is_err());
    }

    #[test]
    fn serializes_like_the_client_expects() {
        let mut status = UploadStatus::default();
        status.start_upload(7, Duration::from_millis(3)).expect("upload");
        let json = serde_json::to_value(&status).expect("json");

        assert_eq!(json["stage"], "uploading");
        assert_eq!(json["fileSize"], 7);
        assert_eq!(json["startTime"], 3);
        assert!(json.get("error").is_none());
        assert_eq!(
            serde_json::to_value(UploadStage::LoadingFont).expect("json"),
            "loading_font"
        );
    }
}
