//! Batch summary output adapter.

use anyhow::Result;
use quadrant_core::BatchResult;
use std::io::{self, Write};
use std::sync::Mutex;

/// Writes the finalized batch outcome as text or JSON.
pub struct SummaryWriter {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl SummaryWriter {
    /// Creates a summary writer targeting stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Creates a summary writer targeting the given writer.
    #[allow(dead_code)] // API for programmatic use
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Writes the one-line human-readable summary.
    #[allow(clippy::significant_drop_tightening)]
    pub fn write_human(&self, result: &BatchResult) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{}", result.summary())?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the full batch record as a single JSON line.
    #[allow(clippy::significant_drop_tightening)]
    pub fn write_json(&self, result: &BatchResult) -> Result<()> {
        let json = serde_json::to_string(result)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex as StdMutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<StdMutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_human_summary_line() {
        let buf = SharedBuf::default();
        let writer = SummaryWriter::new(Box::new(buf.clone()));

        let mut result = BatchResult::new("Main", 4);
        result.record_processed();
        result.mark_completed();
        writer.write_human(&result).unwrap();

        let out = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(out.starts_with("Processed: 1, Skipped: 0, Errors: 0 (Total: 4)"));
    }

    #[test]
    fn test_json_summary_parses_back() {
        let buf = SharedBuf::default();
        let writer = SummaryWriter::new(Box::new(buf.clone()));

        let mut result = BatchResult::new("Main", 2);
        result.record_error("a.png", "file not found");
        result.mark_completed();
        writer.write_json(&result).unwrap();

        let out = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let parsed: BatchResult = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(parsed.configuration, "Main");
        assert_eq!(parsed.errors.len(), 1);
    }
}
