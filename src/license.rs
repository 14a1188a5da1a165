//! NLPIR license helpers.
//!
//! NLPIR ships with a time-limited license file, `Data/NLPIR.user`. When
//! initialisation fails because of the license, NLPIR appends a line to a
//! dated error log in the data directory; [`check_error_log`] reads it back.
//! Fetching a fresh license is left to the caller (see the `nlpir update`
//! command).

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Where the monthly license is published.
pub const LICENSE_URL: &str = "https://github.com/NLPIR-team/NLPIR/raw/master/License/license\
%20for%20a%20month/NLPIR-ICTCLAS%E5%88%86%E8%AF%8D%E7%B3%BB%E7%BB%9F%E6%8E%88%E6%9D%83/NLPIR.user";

pub const LICENSE_FILENAME: &str = "NLPIR.user";

/// License problems NLPIR reports in its error log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseStatus {
    Expired,
    Missing,
}

impl LicenseStatus {
    pub fn message(&self) -> &'static str {
        match self {
            LicenseStatus::Expired => {
                "Your license appears to have expired. Try running \"nlpir update\"."
            }
            LicenseStatus::Missing => {
                "Your license appears to be missing. Try running \"nlpir update\"."
            }
        }
    }
}

/// Looks for a license failure logged during the current second.
///
/// `data_dir` is the directory that contains NLPIR's `Data` directory, as
/// passed to `NLPIR_Init`. Returns `Ok(None)` if today's log does not exist
/// or has no matching line.
pub fn check_error_log(data_dir: &Path) -> io::Result<Option<LicenseStatus>> {
    check_error_log_at(data_dir, Local::now())
}

pub(crate) fn check_error_log_at(
    data_dir: &Path,
    now: DateTime<Local>,
) -> io::Result<Option<LicenseStatus>> {
    let log_path = error_log_path(data_dir, now);
    let file = match File::open(&log_path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    let timestamp = now.format("[%Y-%m-%d %H:%M:%S]").to_string();
    for line in BufReader::new(file).lines() {
        // The log is written in the engine encoding; lossy decoding is enough to
        // find the ASCII markers.
        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => continue,
            Err(e) => return Err(e),
        };
        if !line.starts_with(&timestamp) {
            continue;
        }
        if line.contains("Not valid license") {
            return Ok(Some(LicenseStatus::Expired));
        } else if line.contains("Can not open License file") {
            return Ok(Some(LicenseStatus::Missing));
        }
    }
    Ok(None)
}

fn error_log_path(data_dir: &Path, now: DateTime<Local>) -> PathBuf {
    data_dir
        .join("Data")
        .join(format!("{}.err", now.format("%Y%m%d")))
}

/// Installs `license` as `<license_dir>/NLPIR.user` if it differs from the
/// current file.
///
/// Returns whether the file changed. A missing current license counts as
/// different.
pub fn install_license(license_dir: &Path, license: &[u8]) -> io::Result<bool> {
    let license_file = license_dir.join(LICENSE_FILENAME);
    let current = match fs::read(&license_file) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(e),
    };

    if current == license {
        tracing::debug!("License at '{}' is up to date.", license_file.display());
        return Ok(false);
    }

    fs::write(&license_file, license)?;
    tracing::info!("License written to '{}'.", license_file.display());
    Ok(true)
}
