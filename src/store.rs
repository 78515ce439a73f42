// src/store.rs
//! File-backed report history: one JSON array, newest first, capped.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::types::DailyReport;

pub const DEFAULT_CAP: usize = 30;

#[derive(Debug, Clone)]
pub struct ReportStore {
    path: PathBuf,
    cap: usize,
}

impl ReportStore {
    pub fn new(path: impl Into<PathBuf>, cap: usize) -> Self {
        Self {
            path: path.into(),
            cap: cap.max(1),
        }
    }

    pub fn from_config(cfg: &StoreConfig) -> Self {
        Self::new(cfg.path.clone(), cfg.cap)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored reports, newest first. A missing or unreadable file reads as empty;
    /// anything other than a missing file is logged.
    pub fn reports(&self) -> Vec<DailyReport> {
        let s = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "report store unreadable; treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&s) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "report store is corrupt; treating as empty");
                Vec::new()
            }
        }
    }

    /// Replace a report with the same id in place, or insert at the front; then trim to the cap.
    pub fn save(&self, report: &DailyReport) -> Result<()> {
        let mut all = self.reports();
        match all.iter().position(|r| r.id == report.id) {
            Some(i) => all[i] = report.clone(),
            None => all.insert(0, report.clone()),
        }
        all.truncate(self.cap);
        self.write_all(&all)
    }

    pub fn get(&self, id: &str) -> Option<DailyReport> {
        self.reports().into_iter().find(|r| r.id == id)
    }

    /// First report whose `date` falls on `now`'s UTC day.
    pub fn todays(&self, now: DateTime<Utc>) -> Option<DailyReport> {
        let today = now.format("%Y-%m-%d").to_string();
        self.reports()
            .into_iter()
            .find(|r| r.date.starts_with(&today))
    }

    /// Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut all = self.reports();
        let before = all.len();
        all.retain(|r| r.id != id);
        if all.len() == before {
            return Ok(false);
        }
        self.write_all(&all)?;
        Ok(true)
    }

    fn write_all(&self, reports: &[DailyReport]) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating store dir {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(reports).context("serializing reports")?;
        let tmp = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&tmp)
            .with_context(|| format!("creating {}", tmp.display()))?;
        f.write_all(json.as_bytes())?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}
