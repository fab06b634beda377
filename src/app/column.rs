//! Column model for rill.
//!
//! A column is one vertical slot of the Miller layout. Three kinds exist:
//! an empty placeholder (optionally carrying a message), a text leaf showing
//! the name of a non-browsable file, and a directory listing that owns
//! selection and scroll state. The [Column::create] factory decides the kind
//! from what the filesystem says about a path.

use crate::core::{DirEntry, Fs};

use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Message shown in place of a listing when a path fails the access checks.
pub const NO_ACCESS_MESSAGE: &str = "NO ACCESS";
/// Message shown inside a directory column with no entries.
pub const EMPTY_DIR_MESSAGE: &str = "Empty Directory";

/// One slot of the column stack.
pub enum Column {
    /// Placeholder slot, never enterable.
    Empty { message: String },
    /// Non-browsable leaf, never enterable.
    Text { name: String, path: PathBuf },
    /// Browsable directory listing.
    Dir(DirColumn),
}

impl Column {
    /// A blank placeholder, as pushed by `enter`.
    pub fn placeholder() -> Self {
        Column::Empty {
            message: String::new(),
        }
    }

    /// Creates a new column based on the kind of file at `path`.
    ///
    /// The access checks run before the directory probe so that listing a
    /// hostile path never blocks: a path that fails them becomes an Empty
    /// column with [NO_ACCESS_MESSAGE].
    pub fn create(fs: &dyn Fs, path: &Path) -> Self {
        if !fs.is_accessible(path) {
            debug!("empty column: {}", path.display());
            Column::Empty {
                message: NO_ACCESS_MESSAGE.to_string(),
            }
        } else if fs.is_directory(path) {
            debug!("dir column: {}", path.display());
            Column::Dir(DirColumn::new(fs, path.to_path_buf()))
        } else {
            debug!("text column: {}", path.display());
            Column::Text {
                name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
                path: path.to_path_buf(),
            }
        }
    }

    /// Whether the selected item of this column can be opened as a new
    /// browsing level. Only a readable, non-empty directory qualifies.
    pub fn is_enterable(&self) -> bool {
        match self {
            Column::Dir(dir) => dir.is_enterable(),
            Column::Empty { .. } | Column::Text { .. } => false,
        }
    }

    /// The path this column shows, if it has one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Column::Empty { .. } => None,
            Column::Text { path, .. } => Some(path),
            Column::Dir(dir) => dir.path(),
        }
    }

    pub fn as_dir(&self) -> Option<&DirColumn> {
        match self {
            Column::Dir(dir) => Some(dir),
            _ => None,
        }
    }

    pub fn as_dir_mut(&mut self) -> Option<&mut DirColumn> {
        match self {
            Column::Dir(dir) => Some(dir),
            _ => None,
        }
    }

    /// Drops any selection state the column carries.
    pub fn clear_selection(&mut self) {
        if let Column::Dir(dir) = self {
            dir.selected = None;
        }
    }
}

/// A directory listing with selection and scroll state.
///
/// `path == None` marks the column inert after a listing failure: it keeps
/// whatever entries it last showed but stops reloading and cannot be
/// entered.
pub struct DirColumn {
    path: Option<PathBuf>,
    entries: Vec<DirEntry>,
    selected: Option<usize>,
    top: usize,
    accessible: bool,
    error: Option<String>,
}

impl DirColumn {
    pub fn new(fs: &dyn Fs, path: PathBuf) -> Self {
        let mut col = DirColumn {
            path: Some(path),
            entries: Vec::new(),
            selected: None,
            top: 0,
            accessible: true,
            error: None,
        };
        col.reload(fs);
        col
    }

    // Accessors

    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[inline]
    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[inline]
    pub fn top(&self) -> usize {
        self.top
    }

    pub fn is_enterable(&self) -> bool {
        self.accessible && self.path.is_some() && !self.entries.is_empty()
    }

    /// Takes the pending error string, if a reload failed since the last
    /// sweep. The viewer surfaces these in the command area.
    pub fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }

    /// Re-lists the directory from the filesystem.
    ///
    /// On a listing failure the path is cleared (the column goes inert) and
    /// an error string is left for [Self::take_error]; the entries shown so
    /// far are kept. An inert column never reloads again.
    pub fn reload(&mut self, fs: &dyn Fs) {
        let Some(path) = self.path.clone() else {
            return;
        };

        if !fs.is_accessible(&path) {
            self.accessible = false;
            return;
        }
        self.accessible = true;

        match fs.list_entries(&path) {
            Ok(entries) => {
                self.entries = entries;
                // The listing may have shrunk under us.
                if let Some(sel) = self.selected {
                    self.selected = if self.entries.is_empty() {
                        None
                    } else {
                        Some(sel.min(self.entries.len() - 1))
                    };
                }
                match self.selected {
                    Some(sel) if self.top > sel => self.top = sel,
                    None => self.top = 0,
                    _ => {}
                }
            }
            Err(err) => {
                warn!("listing failed for {}: {}", path.display(), err);
                self.path = None;
                self.error = Some(format!(
                    "ERROR: Could not load directory \"{}\".",
                    path.display()
                ));
            }
        }
    }

    /// Selects an item by offset from the currently selected item.
    ///
    /// With no current selection the offset counts from just above the
    /// first entry, so `select_rel(1)` lands on index 0.
    pub fn select_rel(&mut self, offset: isize, rows: usize) -> bool {
        let base = self.selected.map_or(-1, |s| s as isize);
        let target = base + offset;
        if target < 0 {
            return false;
        }
        self.select_abs(target as usize, rows)
    }

    /// Selects an item by absolute index, scrolling `top` as needed to keep
    /// the selection inside a window of `rows` visible rows.
    ///
    /// Returns true if the selection was valid, false otherwise (no state
    /// change).
    pub fn select_abs(&mut self, index: usize, rows: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.selected = Some(index);

        if index < self.top {
            self.top = index;
        } else if rows >= 2 && index - self.top > rows - 2 {
            self.top = index + 2 - rows;
        }
        true
    }

    /// Selects the entry best matching `query`, case-insensitively.
    ///
    /// An exact full-name match wins immediately. Otherwise entries score by
    /// counting position-by-position character agreement with the query (up
    /// to the shorter length), and the first entry with a strictly higher
    /// score than any before it wins. With no exact match and no score above
    /// zero the selection stays put.
    pub fn select_by_prefix(&mut self, query: &str, rows: usize) -> bool {
        if self.path.is_none() {
            return false;
        }

        let query = query.to_lowercase();
        let mut best_count = 0usize;
        let mut best: Option<usize> = None;

        for (idx, entry) in self.entries.iter().enumerate() {
            let name = entry.name().to_lowercase();

            if name == query {
                best = Some(idx);
                break;
            }

            let count = name
                .chars()
                .zip(query.chars())
                .filter(|(a, b)| a == b)
                .count();
            if count > best_count {
                best_count = count;
                best = Some(idx);
            }
        }

        match best {
            Some(idx) => self.select_abs(idx, rows),
            None => false,
        }
    }

    /// The full path of the currently selected entry.
    pub fn selected_path(&self) -> Option<PathBuf> {
        let path = self.path.as_ref()?;
        let entry = self.entries.get(self.selected?)?;
        Some(path.join(entry.name()))
    }

    /// Builds the column for whatever is currently selected here.
    pub fn column_for_selection(&self, fs: &dyn Fs) -> Column {
        match self.selected_path() {
            Some(path) => Column::create(fs, &path),
            None => Column::placeholder(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fsx::testfs::MockFs;
    use crate::core::OsFs;
    use std::fs::File;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const ROWS: usize = 10;

    fn listing(names: &[&str]) -> MockFs {
        let entries: Vec<(&str, bool)> = names.iter().map(|n| (*n, false)).collect();
        MockFs::default().with_dir("/d", &entries)
    }

    #[test]
    fn factory_classifies_paths() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("notes.txt");
        File::create(&file)?;

        assert!(matches!(
            Column::create(&OsFs, dir.path()),
            Column::Dir(_)
        ));
        assert!(matches!(
            Column::create(&OsFs, &file),
            Column::Text { .. }
        ));

        let missing = PathBuf::from("/path/does/not/exist");
        match Column::create(&OsFs, &missing) {
            Column::Empty { message } => assert_eq!(message, NO_ACCESS_MESSAGE),
            _ => panic!("missing path should produce an Empty column"),
        }
        Ok(())
    }

    #[test]
    fn empty_directory_is_not_enterable() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let col = Column::create(&OsFs, dir.path());
        assert!(!col.is_enterable());

        let dir_col = col.as_dir().ok_or("expected a directory column")?;
        assert_eq!(dir_col.selected(), None);
        assert!(dir_col.entries().is_empty());
        Ok(())
    }

    #[test]
    fn select_abs_rejects_out_of_bounds() {
        let fs = listing(&["alpha", "beta", "gamma"]);
        let mut col = DirColumn::new(&fs, PathBuf::from("/d"));

        assert!(!col.select_abs(3, ROWS));
        assert_eq!(col.selected(), None);
        assert_eq!(col.top(), 0);

        assert!(col.select_abs(2, ROWS));
        assert_eq!(col.selected(), Some(2));
    }

    #[test]
    fn select_rel_counts_from_above_first_entry() {
        let fs = listing(&["alpha", "beta", "gamma"]);
        let mut col = DirColumn::new(&fs, PathBuf::from("/d"));

        assert!(!col.select_rel(-1, ROWS));
        assert!(col.select_rel(1, ROWS));
        assert_eq!(col.selected(), Some(0));
        assert!(col.select_rel(1, ROWS));
        assert_eq!(col.selected(), Some(1));
    }

    #[test]
    fn window_follows_selection() {
        let names: Vec<String> = (0..20).map(|i| format!("entry_{i:02}")).collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let fs = listing(&refs);
        let mut col = DirColumn::new(&fs, PathBuf::from("/d"));
        let rows = 5;

        // Walking down pushes the window once the selection passes the
        // second-to-last visible row.
        for i in 0..8 {
            assert!(col.select_abs(i, rows));
        }
        assert_eq!(col.selected(), Some(7));
        assert_eq!(col.top(), 7 + 2 - rows);

        // Jumping above the window snaps the window to the selection.
        assert!(col.select_abs(1, rows));
        assert_eq!(col.top(), 1);

        // Within the window, top stays put.
        assert!(col.select_abs(2, rows));
        assert_eq!(col.top(), 1);
    }

    #[test]
    fn prefix_match_scores_positionally() {
        let fs = listing(&["alpha", "beta", "gamma"]);
        let mut col = DirColumn::new(&fs, PathBuf::from("/d"));

        // "be": alpha=0, beta=2, gamma=0
        assert!(col.select_by_prefix("be", ROWS));
        assert_eq!(col.selected(), Some(1));
    }

    #[test]
    fn prefix_match_exact_name_wins() {
        let fs = listing(&["gamma_ray", "gamma", "gam"]);
        let mut col = DirColumn::new(&fs, PathBuf::from("/d"));

        assert!(col.select_by_prefix("GAMMA", ROWS));
        assert_eq!(col.selected(), Some(1));
    }

    #[test]
    fn prefix_match_tie_keeps_earliest() {
        let fs = listing(&["door", "dome", "dozen"]);
        let mut col = DirColumn::new(&fs, PathBuf::from("/d"));

        // All three score 2 on "do"; strict > keeps the first.
        assert!(col.select_by_prefix("do", ROWS));
        assert_eq!(col.selected(), Some(0));
    }

    #[test]
    fn prefix_match_no_score_leaves_selection() {
        let fs = listing(&["alpha", "beta"]);
        let mut col = DirColumn::new(&fs, PathBuf::from("/d"));
        col.select_abs(1, ROWS);

        assert!(!col.select_by_prefix("zz", ROWS));
        assert_eq!(col.selected(), Some(1));
    }

    #[test]
    fn prefix_match_is_deterministic() {
        let fs = listing(&["alpha", "albatross", "alpine"]);
        let mut col = DirColumn::new(&fs, PathBuf::from("/d"));

        col.select_by_prefix("alp", ROWS);
        let first = col.selected();
        for _ in 0..10 {
            col.select_by_prefix("alp", ROWS);
            assert_eq!(col.selected(), first);
        }
    }

    #[test]
    fn listing_failure_marks_column_inert() {
        let good = MockFs::default().with_dir("/d", &[("keep_me", false)]);
        let bad = MockFs::default()
            .with_dir("/d", &[("keep_me", false)])
            .fail_listing("/d");

        // First load succeeds and shows entries.
        let mut col = DirColumn::new(&good, PathBuf::from("/d"));
        assert_eq!(col.entries().len(), 1);
        assert!(col.is_enterable());

        // Next reload fails: path cleared, entries retained, error pending.
        col.reload(&bad);
        assert!(col.path().is_none());
        assert_eq!(col.entries().len(), 1, "stale entries must be kept");
        assert!(!col.is_enterable());
        let err = col.take_error().expect("reload failure should leave an error");
        assert!(err.contains("Could not load directory"));
        assert!(col.take_error().is_none(), "error is taken once");

        // Inert columns skip further reloads without new errors.
        col.reload(&good);
        assert!(col.path().is_none());
        assert!(col.take_error().is_none());
    }
}
