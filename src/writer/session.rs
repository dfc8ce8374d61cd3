//! File session for the writer task: one lazily opened append handle, keyed
//! by directory, app, date, and severity label so date rollover or a
//! reconfiguration transparently switches files.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::severity::Severity;

pub(crate) struct FileSession {
    signature: Option<String>,
    writer: Option<BufWriter<File>>,
}

impl FileSession {
    pub(crate) const fn new() -> Self {
        Self {
            signature: None,
            writer: None,
        }
    }

    /// Returns the append handle for the current (date, severity) file,
    /// opening directory and file on first use or when the signature changes.
    pub(crate) fn writer_for(
        &mut self,
        directory: &Path,
        app_name: &str,
        severity: Severity,
    ) -> io::Result<&mut BufWriter<File>> {
        let date = Local::now().format("%Y-%m-%d").to_string();
        let signature = format!(
            "{}|{app_name}|{date}|{}",
            directory.display(),
            severity.as_str()
        );

        if self.signature.as_deref() != Some(signature.as_str()) || self.writer.is_none() {
            self.close();
            fs::create_dir_all(directory)?;
            let path = file_path(directory, app_name, &date, severity);
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            self.writer = Some(BufWriter::new(file));
            self.signature = Some(signature);
        }

        self.writer
            .as_mut()
            .ok_or_else(|| io::Error::other("log file session not open"))
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            io::Write::flush(writer)?;
        }
        Ok(())
    }

    /// Flushes best-effort and drops the handle; the next write reopens.
    pub(crate) fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = io::Write::flush(&mut writer);
        }
        self.signature = None;
    }
}

fn file_path(directory: &Path, app_name: &str, date: &str, severity: Severity) -> PathBuf {
    directory.join(format!("{app_name}_{date}_{}.log", severity.as_str()))
}
