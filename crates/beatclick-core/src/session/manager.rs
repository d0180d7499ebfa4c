use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::Result;
use crate::export::{format_json_entry, format_tsv_header, format_tsv_row};
use crate::session::SessionResult;

/// Writes session results under a base directory.
///
/// A TSV file gets one row per result; the JSON file is rewritten as a whole
/// array on every append so it stays valid if the program stops.
#[derive(Debug)]
pub struct SessionManager {
    base_dir: PathBuf,
    current_tsv_session: Option<PathBuf>,
    current_json_session: Option<PathBuf>,
    json_data: Vec<JsonValue>,
}

impl SessionManager {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            current_tsv_session: None,
            current_json_session: None,
            json_data: Vec::new(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Timestamped file name, suffixed when a file from the same second exists
    fn session_file(&self, now: DateTime<Local>, extension: &str) -> PathBuf {
        let stem = format!("Session_{}", now.format("%Y_%m_%d_%H_%M_%S"));
        let mut path = self.base_dir.join(format!("{}.{}", stem, extension));
        let mut n = 1;
        while path.exists() {
            path = self.base_dir.join(format!("{}_{}.{}", stem, n, extension));
            n += 1;
        }
        path
    }

    /// Create a TSV session file with its header row
    pub fn start_tsv_session(&mut self) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_dir)?;
        let tsv_file = self.session_file(Local::now(), "tsv");

        fs::write(&tsv_file, format!("{}\n", format_tsv_header()))?;
        debug!("Started TSV session at {:?}", tsv_file);

        self.current_tsv_session = Some(tsv_file.clone());
        Ok(tsv_file)
    }

    /// Create a JSON session file holding an empty array
    pub fn start_json_session(&mut self) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_dir)?;
        let json_file = self.session_file(Local::now(), "json");

        self.json_data = Vec::new();
        fs::write(&json_file, "[]")?;
        debug!("Started JSON session at {:?}", json_file);

        self.current_json_session = Some(json_file.clone());
        Ok(json_file)
    }

    /// No-op without a TSV session
    pub fn append_tsv_row(&self, result: &SessionResult) -> Result<()> {
        if let Some(ref path) = self.current_tsv_session {
            let mut file = fs::OpenOptions::new().append(true).open(path)?;
            writeln!(file, "{}", format_tsv_row(result))?;
        }
        Ok(())
    }

    /// No-op without a JSON session
    pub fn append_json_entry(&mut self, result: &SessionResult) -> Result<()> {
        if let Some(path) = &self.current_json_session {
            self.json_data.push(format_json_entry(result));
            fs::write(path, serde_json::to_string_pretty(&self.json_data)?)?;
        }
        Ok(())
    }

    /// Append to every open session file
    pub fn record(&mut self, result: &SessionResult) -> Result<()> {
        self.append_tsv_row(result)?;
        self.append_json_entry(result)
    }

    pub fn current_tsv_session_path(&self) -> Option<&Path> {
        self.current_tsv_session.as_deref()
    }

    pub fn current_json_session_path(&self) -> Option<&Path> {
        self.current_json_session.as_deref()
    }
}
