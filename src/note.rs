use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use walkdir::WalkDir;

/// Extension given to newly created notes, independent of the configured
/// listing extensions.
pub const NOTE_EXTENSION: &str = "note";

/// One recognized note file, as produced by enumeration. Transient.
#[derive(Debug, Clone)]
pub struct NoteEntry {
    pub title: String,
    pub path: PathBuf,
    pub modified: i64,
}

/// Recursively collect every file under `root` whose name ends with `.` +
/// one of `extensions` (case-sensitive), most recently modified first.
///
/// Unreadable subtrees are skipped. The scan is recomputed on every call.
pub fn list_notes(root: &Path, extensions: &[String]) -> Vec<NoteEntry> {
    let mut notes = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let Some(title) = match_extension(&name, extensions) else {
            continue;
        };
        let modified = entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        notes.push(NoteEntry { title, path: entry.into_path(), modified });
    }
    // Stable sort keeps traversal order for equal timestamps.
    notes.sort_by(|a, b| b.modified.cmp(&a.modified));
    notes
}

fn match_extension(name: &str, extensions: &[String]) -> Option<String> {
    for ext in extensions {
        if let Some(title) = name
            .strip_suffix(ext.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
        {
            return Some(title.to_string());
        }
    }
    None
}

/// Root-relative identifier for a note file, `/`-separated.
///
/// Stable when the root directory itself moves, not when the note moves
/// within it. Returns `None` for paths outside the root; the rest of the
/// system never produces such paths.
pub fn note_id(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> =
        rel.iter().map(|c| c.to_string_lossy().into_owned()).collect();
    Some(parts.join("/"))
}

/// Absolute path a note with this title lives at.
pub fn note_path(root: &Path, title: &str) -> PathBuf {
    root.join(format!("{title}.{NOTE_EXTENSION}"))
}

/// Create `<root>/<title>.note` with a generated title heading.
///
/// Creates the root first if needed. An existing file is left untouched:
/// the heading is written exactly once, when the note materializes.
pub fn create_note(root: &Path, title: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(root)?;
    let path = note_path(root, title);
    if !path.exists() {
        fs::write(&path, title_heading(title))?;
    }
    Ok(path)
}

pub fn title_heading(title: &str) -> String {
    format!("# {}\n", capitalize(title))
}

/// Uppercase the first character only; the rest of the title is untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
