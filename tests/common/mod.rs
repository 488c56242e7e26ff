#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use prefixlog::{Logger, MakeWriter};

/// In-memory writer shared between a logger and the test inspecting it.
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).expect("utf-8 log output")
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.lines()
            .iter()
            .map(|line| serde_json::from_str(line).expect("json record"))
            .collect()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = Capture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Plain-text logger writing into a fresh capture buffer.
pub fn text_logger(prefix: &str, verbosity: u8) -> (Logger, Capture) {
    let capture = Capture::default();
    let log = prefixlog::builder(prefix)
        .with_verbosity(verbosity)
        .with_color(false)
        .with_writer(capture.clone())
        .build()
        .expect("logger");
    (log, capture)
}

/// JSON logger writing into a fresh capture buffer.
pub fn json_logger(prefix: &str, verbosity: u8) -> (Logger, Capture) {
    let capture = Capture::default();
    let log = prefixlog::builder(prefix)
        .with_verbosity(verbosity)
        .with_format("json")
        .with_writer(capture.clone())
        .build()
        .expect("logger");
    (log, capture)
}
