//! Console sink for formatted records.

use crate::fmt::FormattedRecord;
use crate::severity::Severity;

/// Writes formatted records to stderr, one line per payload line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ConsoleWriter;

impl ConsoleWriter {
    pub(crate) fn write_record(self, record: &FormattedRecord) {
        self.write(record.severity, &record.tag, &record.message);
    }

    pub(crate) fn write(self, severity: Severity, tag: &str, payload: &str) {
        eprintln!("[{}] {tag}: {payload}", severity.code());
    }

    pub(crate) fn write_lines(self, severity: Severity, tag: &str, payloads: &[String]) {
        for payload in payloads {
            self.write(severity, tag, payload);
        }
    }
}
