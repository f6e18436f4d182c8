use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

use crate::config::ToolSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Ffmpeg,
    Ffprobe,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ffmpeg => "ffmpeg",
            Self::Ffprobe => "ffprobe",
        })
    }
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),
    #[error("{tool} not found (looked for '{}')", .path.display())]
    ToolNotFound { tool: Tool, path: PathBuf },
    #[error("Failed to launch {tool}: {source}")]
    Spawn {
        tool: Tool,
        #[source]
        source: io::Error,
    },
    #[error("{tool} failed with exit code {exit_code:?}: {stderr}")]
    ToolFailed {
        tool: Tool,
        exit_code: Option<i32>,
        stderr: String,
    },
}

/// One external tool call: which tool and its argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: Tool,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(tool: Tool) -> Self {
        Self {
            tool,
            args: Vec::new(),
        }
    }

    pub fn ffmpeg() -> Self {
        Self::new(Tool::Ffmpeg)
    }

    pub fn ffprobe() -> Self {
        Self::new(Tool::Ffprobe)
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Arguments as lossy strings, handy for assertions and logs.
    pub fn arg_strings(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    /// ffmpeg writes to its final argument.
    pub fn output_path(&self) -> Option<&Path> {
        match self.tool {
            Tool::Ffmpeg => self.args.last().map(Path::new),
            Tool::Ffprobe => None,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tool)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Executes tool invocations. Returns captured stdout on success.
pub trait CommandRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, MediaError>;
}

/// Runs the real binaries found on `PATH` (or at configured locations).
#[derive(Debug, Clone)]
pub struct SystemRunner {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl SystemRunner {
    pub fn new(tools: &ToolSettings) -> Self {
        Self {
            ffmpeg: tools.ffmpeg.clone(),
            ffprobe: tools.ffprobe.clone(),
        }
    }

    fn configured(&self, tool: Tool) -> &Path {
        match tool {
            Tool::Ffmpeg => &self.ffmpeg,
            Tool::Ffprobe => &self.ffprobe,
        }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(&ToolSettings::default())
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, MediaError> {
        let tool = invocation.tool;
        let configured = self.configured(tool);
        let program = which::which(configured).map_err(|_| MediaError::ToolNotFound {
            tool,
            path: configured.to_path_buf(),
        })?;

        debug!(command = %invocation, "Running external tool");
        let output = Command::new(&program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| MediaError::Spawn { tool, source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(MediaError::ToolFailed {
                tool,
                exit_code: output.status.code(),
                stderr,
            });
        }
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_arguments() {
        let invocation = Invocation::ffmpeg().args(["-i", "in.mp4", "-y", "out.mp4"]);
        assert_eq!(invocation.to_string(), "ffmpeg -i in.mp4 -y out.mp4");
        assert_eq!(invocation.output_path(), Some(Path::new("out.mp4")));
        assert_eq!(Invocation::ffprobe().arg("x").output_path(), None);
    }

    #[test]
    fn missing_binary_is_reported_before_spawning() {
        let runner = SystemRunner::new(&ToolSettings {
            ffmpeg: PathBuf::from("/nonexistent/vidforge-ffmpeg"),
            ffprobe: PathBuf::from("/nonexistent/vidforge-ffprobe"),
        });
        let err = runner
            .run(&Invocation::ffmpeg().arg("-version"))
            .unwrap_err();
        assert!(matches!(err, MediaError::ToolNotFound { tool: Tool::Ffmpeg, .. }));
    }
}
