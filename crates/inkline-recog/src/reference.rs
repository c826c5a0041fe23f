//! Reference text from an external OCR engine
//!
//! A trained engine can be run on the same image to obtain text for
//! comparison. It is never part of the classification path.

use crate::{RecogError, RecogResult};
use std::path::{Path, PathBuf};
use std::process::Command;

/// An external recognizer producing reference text for an image file
pub trait ReferenceRecognizer {
    /// Recognize the text of the image at `path`
    fn recognize_file(&self, path: &Path) -> RecogResult<String>;
}

/// Runs the `tesseract` command-line tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TesseractCli {
    /// Executable to run (default: `tesseract` from `PATH`)
    pub executable: PathBuf,
    /// Language passed with `-l`, if any
    pub language: Option<String>,
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("tesseract"),
            language: None,
        }
    }
}

impl TesseractCli {
    /// Set the executable path
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Set the recognition language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg(path).arg("stdout");
        if let Some(lang) = &self.language {
            cmd.arg("-l").arg(lang);
        }
        cmd
    }
}

impl ReferenceRecognizer for TesseractCli {
    fn recognize_file(&self, path: &Path) -> RecogResult<String> {
        let output = self.command(path).output().map_err(|e| {
            RecogError::ReferenceFailed(format!(
                "failed to run {}: {}",
                self.executable.display(),
                e
            ))
        })?;

        if !output.status.success() {
            return Err(RecogError::ReferenceFailed(format!(
                "{} exited with {}: {}",
                self.executable.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
