use std::sync::{Arc, Mutex};

use acme_external::report::{ConsoleSink, Reporter};

/// Console that keeps everything written to it.
#[derive(Debug, Clone, Default)]
pub struct MemoryConsole {
    buffer: Arc<Mutex<String>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reporter writing into this console.
    pub fn reporter(&self) -> Reporter {
        Reporter::new(Arc::new(self.clone()))
    }

    pub fn contents(&self) -> String {
        self.buffer.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl ConsoleSink for MemoryConsole {
    fn write_line(&self, line: &str) {
        let mut buf = self.buffer.lock().unwrap();
        buf.push_str(line);
        buf.push('\n');
    }

    fn write_raw(&self, text: &str) {
        self.buffer.lock().unwrap().push_str(text);
    }
}
