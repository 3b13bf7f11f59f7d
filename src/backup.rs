use crate::args::Config;
use crate::console::Console;
use crate::scanner::{ExtensionFilter, Scanner};
use crate::stats::UndoSummary;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Appended to the full original path to name its backup
pub const BACKUP_SUFFIX: &str = ".bak";

/// Outcome of restoring a single backup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreResult {
    Restored,
    WouldRestore,
    Failed,
}

/// `notes.txt` -> `notes.txt.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// `notes.txt.bak` -> `notes.txt`; `None` when the path is not a backup
pub fn original_path(backup: &Path) -> Option<PathBuf> {
    let name = backup.file_name()?.to_str()?;
    let stem = name.strip_suffix(BACKUP_SUFFIX)?;
    if stem.is_empty() {
        return None;
    }
    Some(backup.with_file_name(stem))
}

/// Copy `path` to its backup location, replacing an older backup
///
/// # Returns
/// * `io::Result<PathBuf>` - Where the backup was written
pub fn create_backup(path: &Path) -> io::Result<PathBuf> {
    let target = backup_path(path);
    fs::copy(path, &target)?;
    tracing::debug!(from = %path.display(), to = %target.display(), "backup written");
    Ok(target)
}

/// Move a backup back over its original
///
/// Whatever currently sits at the original path is overwritten without checks.
///
/// # Arguments
/// * `backup` - Path of the `.bak` file
/// * `dry_run` - Only report the move
/// * `console` - Output policy
///
/// # Returns
/// * `RestoreResult` - What happened to this backup
pub fn restore(backup: &Path, dry_run: bool, console: &Console) -> RestoreResult {
    let Some(original) = original_path(backup) else {
        console.warn(format!("Not a backup file: {}", backup.display()));
        return RestoreResult::Failed;
    };

    if dry_run {
        console.planned(format!("Restore: {} -> {}", backup.display(), original.display()));
        return RestoreResult::WouldRestore;
    }

    match fs::rename(backup, &original) {
        Ok(()) => {
            console.action(format!("Restored: {} -> {}", backup.display(), original.display()));
            RestoreResult::Restored
        }
        Err(err) => {
            console.warn(format!(
                "Cannot restore {} to {}: {}",
                backup.display(),
                original.display(),
                err
            ));
            RestoreResult::Failed
        }
    }
}

/// Restore every backup under the configured root
///
/// When an extension filter is set it applies to the original name, so `undo DIR txt`
/// restores `a.txt.bak` but not `a.md.bak`.
pub fn undo_tree(config: &Config, console: &Console) -> UndoSummary {
    let scanner = Scanner::from_config(config, *console);
    let backups = scanner.files(&ExtensionFilter::default(), |entry| {
        original_path(&entry.path)
            .map(|original| config.extensions.allows(&original))
            .unwrap_or(false)
    });

    let mut summary = UndoSummary::default();
    for entry in backups {
        match restore(&entry.path, config.options.dry_run, console) {
            RestoreResult::Restored => summary.restored += 1,
            RestoreResult::WouldRestore => summary.planned += 1,
            RestoreResult::Failed => summary.failed += 1,
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{Mode, Options};
    use tempfile::TempDir;

    #[test]
    fn test_backup_path_naming() {
        assert_eq!(backup_path(Path::new("dir/a.txt")), PathBuf::from("dir/a.txt.bak"));
        assert_eq!(original_path(Path::new("dir/a.txt.bak")), Some(PathBuf::from("dir/a.txt")));
        assert_eq!(original_path(Path::new("dir/a.txt")), None);
        assert_eq!(original_path(Path::new("dir/.bak")), None);
    }

    #[test]
    fn test_create_backup_overwrites_previous() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "first").unwrap();
        create_backup(&file).unwrap();

        fs::write(&file, "second").unwrap();
        let backup = create_backup(&file).unwrap();
        assert_eq!(fs::read_to_string(backup).unwrap(), "second");
    }

    #[test]
    fn test_restore_twice_fails_second_time() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        let backup = backup_path(&file);
        fs::write(&file, "new").unwrap();
        fs::write(&backup, "old").unwrap();
        let console = Console::silent();

        assert_eq!(restore(&backup, false, &console), RestoreResult::Restored);
        assert_eq!(fs::read_to_string(&file).unwrap(), "old");
        assert!(!backup.exists());
        assert_eq!(restore(&backup, false, &console), RestoreResult::Failed);
    }

    #[test]
    fn test_undo_tree_dry_run_and_filter() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "new a").unwrap();
        fs::write(dir.path().join("a.txt.bak"), "old a").unwrap();
        fs::write(dir.path().join("b.md.bak"), "old b").unwrap();
        let console = Console::silent();

        let dry = Config::new(Mode::Undo, "", "", dir.path()).with_options(Options {
            dry_run: true,
            ..Options::default()
        });
        let summary = undo_tree(&dry, &console);
        assert_eq!(summary.planned, 2);
        assert_eq!(summary.restored, 0);
        assert!(dir.path().join("a.txt.bak").exists());

        let only_txt = Config::new(Mode::Undo, "", "", dir.path()).with_extensions(["txt"]);
        let summary = undo_tree(&only_txt, &console);
        assert_eq!(summary.restored, 1);
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "old a");
        assert!(dir.path().join("b.md.bak").exists());
    }
}
