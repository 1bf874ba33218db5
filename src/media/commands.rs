use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use tracing::debug;

use crate::error::{Result, MutecutError};

/// Abstract media processing command representation
#[derive(Debug, Clone)]
pub struct MediaCommand {
    pub binary_path: String,
    pub args: Vec<String>,
    pub description: String,
}

impl MediaCommand {
    /// Create a new media processing command
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, description: S2) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            description: description.into(),
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(|s| s.into()));
        self
    }

    /// Add input file
    pub fn input<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-i").arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Add output file
    pub fn output<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Force overwrite output
    pub fn overwrite(self) -> Self {
        self.arg("-y")
    }

    /// Seek to a position in seconds (applies to the next input)
    pub fn seek(self, seconds: f64) -> Self {
        self.arg("-ss").arg(format!("{:.3}", seconds))
    }

    /// Limit read/write duration in seconds
    pub fn limit(self, seconds: f64) -> Self {
        self.arg("-t").arg(format!("{:.3}", seconds))
    }

    /// Copy all streams without re-encoding
    pub fn copy_streams(self) -> Self {
        self.arg("-c").arg("copy")
    }

    /// Add audio filter
    pub fn audio_filter<S: Into<String>>(self, filter: S) -> Self {
        self.arg("-af").arg(filter)
    }

    /// Read the filter graph from a script file
    pub fn filter_script<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-filter_complex_script")
            .arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Map a filter-graph output stream into the muxer
    pub fn map<S: Into<String>>(self, label: S) -> Self {
        self.arg("-map").arg(label)
    }

    /// Discard muxer output (analysis-only run)
    pub fn null_output(self) -> Self {
        self.arg("-f").arg("null").arg("-")
    }

    /// Read the next input through the concat demuxer
    pub fn concat_input<P: AsRef<Path>>(self, list_path: P) -> Self {
        self.arg("-f").arg("concat").arg("-safe").arg("0").input(list_path)
    }

    /// Render the invocation as a shell-style line for display
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.binary_path.clone()];
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                parts.push(format!("'{}'", arg));
            } else {
                parts.push(arg.clone());
            }
        }
        parts.join(" ")
    }

    /// Execute the command, failing on a non-zero exit with the tool's stderr
    pub fn execute(&self) -> Result<()> {
        self.execute_capture().map(|_| ())
    }

    /// Execute the command and return its captured output
    pub fn execute_capture(&self) -> Result<Output> {
        debug!("Executing media command: {} {:?}", self.binary_path, self.args);
        debug!("Description: {}", self.description);

        let output = Command::new(&self.binary_path)
            .args(&self.args)
            .output()
            .map_err(|e| MutecutError::Media(format!("Failed to execute media tool: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MutecutError::Media(format!(
                "{} failed: {}",
                self.description,
                stderr.trim()
            )));
        }

        Ok(output)
    }

    /// Spawn the command with stderr piped for line-by-line consumption
    pub fn spawn_piped_stderr(&self) -> Result<Child> {
        debug!("Spawning media command: {} {:?}", self.binary_path, self.args);

        Command::new(&self.binary_path)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| MutecutError::Media(format!("Failed to spawn media tool: {}", e)))
    }
}
