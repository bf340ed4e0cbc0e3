//! Terminal rendering of upload status (made by FontLab https://www.fontlab.com/)
//!
//! The `add` command walks an [`UploadStatus`] through its stages and shows
//! each one on stderr. On a terminal the line is redrawn in place as progress
//! moves; anywhere else only stage changes are printed, one per line, so logs
//! and captured output stay readable.

use std::io::Write;

use fontshelf_core::error::StatusError;
use fontshelf_core::status::{UploadStage, UploadStatus};
use tracing::debug;

pub struct Reporter<W> {
    status: UploadStatus,
    out: W,
    quiet: bool,
    live: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, quiet: bool, live: bool) -> Self {
        Self {
            status: UploadStatus::idle(),
            out,
            quiet,
            live,
        }
    }

    pub fn status(&self) -> &UploadStatus {
        &self.status
    }

    /// Apply a stage change and redraw.
    pub fn apply(
        &mut self,
        change: impl FnOnce(&mut UploadStatus) -> Result<(), StatusError>,
    ) -> Result<(), StatusError> {
        let before = self.status.stage;
        change(&mut self.status)?;
        self.draw(before != self.status.stage);
        Ok(())
    }

    /// Feed a projected progress value into whichever stage is animating.
    pub fn progress(&mut self, value: u8) {
        let updated = match self.status.stage {
            UploadStage::Uploading => self.status.update_upload_progress(value),
            UploadStage::Saving => self.status.update_saving_progress(value),
            stage => Err(StatusError::NotAnimating(stage)),
        };
        match updated {
            Ok(()) => self.draw(false),
            Err(err) => debug!(error = %err, "dropped progress frame"),
        }
    }

    /// Record a failure. Terminal stages keep their state.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        if let Err(err) = self.apply(|status| status.error(message)) {
            debug!(error = %err, "failure after a terminal stage");
        }
    }

    fn draw(&mut self, stage_changed: bool) {
        if self.quiet || !(self.live || stage_changed) {
            return;
        }

        let line = match &self.status.error {
            Some(error) => format!("{}: {error}", self.status.message),
            None => self.status.message.clone(),
        };

        let written = if self.live {
            let end = if self.status.stage.is_terminal() { "\n" } else { "" };
            write!(self.out, "\r\u{1b}[2K{line}{end}")
        } else {
            writeln!(self.out, "{line}")
        };
        let _ = written.and_then(|()| self.out.flush());
    }
}
