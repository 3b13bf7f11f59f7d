// tests/common/mod.rs
use anyhow::Result;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn create_test_file(dir: &Path, name: &str, content: &[u8]) -> Result<PathBuf> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(&path)?;
    file.write_all(content)?;
    Ok(path)
}

pub fn setup_test_directory() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;

    create_test_file(temp_dir.path(), "notes/todo.txt", b"fix widget\nship widget\r\n")?;
    create_test_file(temp_dir.path(), "notes/done.txt", b"nothing to see\n")?;
    create_test_file(temp_dir.path(), "notes/widget_old.md", b"# widget\n")?;
    create_test_file(temp_dir.path(), "widget_dir/inner_widget/widget.txt", b"widget inside\n")?;
    create_test_file(temp_dir.path(), "assets/logo.txt", b"\x00\x01widget\x02")?;

    Ok(temp_dir)
}

/// Every path under `root` with its bytes (None for directories), sorted
pub fn snapshot(root: &Path) -> Result<Vec<(PathBuf, Option<Vec<u8>>)>> {
    let mut out = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            let relative = path.strip_prefix(root)?.to_path_buf();
            if path.is_dir() {
                out.push((relative, None));
                pending.push(path);
            } else {
                out.push((relative, Some(fs::read(&path)?)));
            }
        }
    }

    out.sort();
    Ok(out)
}
