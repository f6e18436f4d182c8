#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use image::{ImageBuffer, Rgb};
use vidforge::video::{CommandRunner, Invocation, MediaError, Tool};

/// Stands in for ffmpeg/ffprobe: records every call and writes a placeholder
/// at the output path so follow-up steps find a file there.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
    fail_on_call: Option<usize>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the `n`th invocation (1-based) with a non-zero exit.
    pub fn failing_at(n: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on_call: Some(n),
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn args(&self) -> Vec<Vec<String>> {
        self.calls().iter().map(Invocation::arg_strings).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, MediaError> {
        let count = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(invocation.clone());
            calls.len()
        };
        if self.fail_on_call == Some(count) {
            return Err(MediaError::ToolFailed {
                tool: invocation.tool,
                exit_code: Some(1),
                stderr: "simulated failure".to_string(),
            });
        }

        match invocation.tool {
            Tool::Ffprobe => Ok(br#"{"format":{"duration":"12.5"},"streams":[]}"#.to_vec()),
            Tool::Ffmpeg => {
                if let Some(output) = invocation.output_path() {
                    write_placeholder(output);
                }
                Ok(Vec::new())
            }
        }
    }
}

fn write_placeholder(path: &Path) {
    let is_image = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "jpg" | "jpeg" | "png"));
    if is_image {
        let frame = ImageBuffer::from_fn(64, 36, |x, y| Rgb([(x * 4) as u8, (y * 7) as u8, 90]));
        frame.save(path).expect("write placeholder frame");
    } else {
        fs::write(path, b"placeholder").expect("write placeholder output");
    }
}

pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"source").unwrap();
}
