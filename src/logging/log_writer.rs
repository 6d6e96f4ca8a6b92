use crate::logging::Logger;
use std::io::Write;
use tracing::Level;

const LEVEL_PREFIXES: [(&str, Level); 6] = [
    ("[TRACE]", Level::TRACE),
    ("[DEBUG]", Level::DEBUG),
    ("[INFO]", Level::INFO),
    ("[WARN]", Level::WARN),
    ("[ERROR]", Level::ERROR),
    ("[ERR]", Level::ERROR),
];

/// Adapts a [`Logger`] to [`std::io::Write`].
///
/// Every non-empty line of a write becomes one message. A leading level tag
/// such as `[WARN]` picks the level and is stripped; untagged lines go to INFO.
#[derive(Debug, Clone)]
pub struct LogWriter {
    logger: Logger,
}

impl LogWriter {
    #[must_use]
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let (level, message) = infer_level(line);
            self.logger.log(level, message, &[]);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.logger.flush();
        Ok(())
    }
}

fn infer_level(line: &str) -> (Level, &str) {
    LEVEL_PREFIXES
        .iter()
        .find_map(|(prefix, level)| {
            line.strip_prefix(prefix)
                .map(|rest| (*level, rest.trim_start()))
        })
        .unwrap_or((Level::INFO, line))
}
