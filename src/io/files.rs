use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Trajectory file naming and discovery
// ---------------------------------------------------------------------------

pub const FILE_PREFIX: &str = "projectile_data_";
pub const FILE_EXTENSION: &str = "csv";

/// `projectile_data_YYYYMMDD_HHMMSS.csv` for the given wall-clock time.
pub fn timestamped_name(now: NaiveDateTime) -> String {
    format!("{FILE_PREFIX}{}.{FILE_EXTENSION}", now.format("%Y%m%d_%H%M%S"))
}

/// Timestamped name for the current local time.
pub fn default_output_name() -> PathBuf {
    PathBuf::from(timestamped_name(chrono::Local::now().naive_local()))
}

/// Append `.csv` unless the name already ends with it.
pub fn with_csv_extension(name: impl AsRef<Path>) -> PathBuf {
    let name = name.as_ref();
    match name.extension() {
        Some(ext) if ext == FILE_EXTENSION => name.to_path_buf(),
        _ => {
            let mut s = name.as_os_str().to_os_string();
            s.push(".");
            s.push(FILE_EXTENSION);
            PathBuf::from(s)
        }
    }
}

fn is_trajectory_file(path: &Path) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return false,
    };
    name.starts_with(FILE_PREFIX) && path.extension().map_or(false, |e| e == FILE_EXTENSION)
}

/// Most recently modified `projectile_data_*.csv` in `dir`.
pub fn find_latest(dir: impl AsRef<Path>) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_trajectory_file(p))
        .map(|p| {
            let modified = fs::metadata(&p)
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, p)
        })
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
        .map(|(_, p)| p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::time::Duration;

    #[test]
    fn timestamped_name_format() {
        let t = NaiveDate::from_ymd_opt(2026, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 1)
            .unwrap();
        assert_eq!(timestamped_name(t), "projectile_data_20260307_090501.csv");
    }

    #[test]
    fn csv_suffix_enforced() {
        assert_eq!(with_csv_extension("run"), PathBuf::from("run.csv"));
        assert_eq!(with_csv_extension("run.csv"), PathBuf::from("run.csv"));
        assert_eq!(with_csv_extension("run.v2"), PathBuf::from("run.v2.csv"));
    }

    #[test]
    fn latest_matching_file_wins() {
        let dir = std::env::temp_dir().join(format!("projectile_sim_{}_discovery", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let old = dir.join("projectile_data_20240101_000000.csv");
        let new = dir.join("projectile_data_20250101_000000.csv");
        let other = dir.join("notes.csv");
        fs::write(&old, "x").unwrap();
        fs::write(&new, "x").unwrap();
        fs::write(&other, "x").unwrap();

        let past = SystemTime::now() - Duration::from_secs(3600);
        fs::File::options().write(true).open(&old).unwrap().set_modified(past).unwrap();

        assert_eq!(find_latest(&dir), Some(new));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn no_match_is_none() {
        assert!(find_latest("/nonexistent/dir").is_none());
    }
}
