//! Multi-column viewer for rill.
//!
//! Owns the ordered stack of columns running from an ancestor directory down
//! to the currently inspected leaf, plus the screen regions the visible tail
//! of that stack is drawn into. The column at `len - 2` is the active one
//! (its selection is what the user moves); the rightmost column always
//! previews the active selection. The stack never shrinks below two columns.

use crate::app::column::{Column, DirColumn};
use crate::core::Fs;

use ratatui::layout::Rect;
use std::path::{MAIN_SEPARATOR, Path};
use std::time::{Duration, Instant};

/// Fewest columns the layout will ever show.
pub const MIN_COLUMNS: usize = 3;
/// Narrowest a column may get before a layout request is refused.
pub const MIN_COLUMN_WIDTH: u16 = 6;

/// The column stack and its screen layout.
pub struct Viewer {
    columns: Vec<Column>,
    regions: Vec<Rect>,
    column_count: usize,
    area: Rect,
    buffer: SelectBuffer,
}

impl Viewer {
    /// Builds the stack with one directory column per path component from
    /// the filesystem root down to `start`, inclusive, then lays out the
    /// requested number of regions.
    ///
    /// `start` must be absolute. Starting at the root itself duplicates the
    /// root column so the two-column floor holds from the beginning.
    pub fn new(
        fs: &dyn Fs,
        start: &Path,
        area: Rect,
        columns: usize,
        select_timeout: Duration,
    ) -> Self {
        let mut ancestors: Vec<&Path> = start.ancestors().collect();
        ancestors.reverse();

        let mut stack: Vec<Column> = ancestors
            .iter()
            .map(|path| Column::Dir(DirColumn::new(fs, path.to_path_buf())))
            .collect();
        while stack.len() < 2 {
            let root = ancestors.first().copied().unwrap_or(start);
            stack.push(Column::Dir(DirColumn::new(fs, root.to_path_buf())));
        }

        let mut viewer = Viewer {
            columns: stack,
            regions: Vec::new(),
            column_count: 0,
            area,
            buffer: SelectBuffer::new(select_timeout),
        };
        let wanted = columns.max(MIN_COLUMNS);
        if !viewer.set_column_count(wanted) {
            viewer.resize(area);
        }
        viewer
    }

    // Accessors

    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[inline]
    pub fn regions(&self) -> &[Rect] {
        &self.regions
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// The content area the regions are laid out in.
    #[inline]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// The column whose selection the user is editing (second from the
    /// right).
    pub fn active(&self) -> &Column {
        &self.columns[self.columns.len() - 2]
    }

    fn active_dir_mut(&mut self) -> Option<&mut DirColumn> {
        let idx = self.columns.len() - 2;
        self.columns[idx].as_dir_mut()
    }

    /// Path of the active column, for the status line.
    pub fn active_path(&self) -> Option<&Path> {
        self.active().path()
    }

    /// Path previewed by the rightmost column; this is what the selection
    /// currently points at.
    pub fn selected_path(&self) -> Option<&Path> {
        self.columns.last().and_then(|col| col.path())
    }

    fn rows(&self) -> usize {
        self.area.height as usize
    }

    // Layout

    /// Lays out `count` column regions across the viewer area, the division
    /// remainder becoming a left margin.
    ///
    /// Refused (no state change, returns false) when `count` is below
    /// [MIN_COLUMNS] or the resulting column width is below
    /// [MIN_COLUMN_WIDTH].
    pub fn set_column_count(&mut self, count: usize) -> bool {
        if count < MIN_COLUMNS || count > self.area.width as usize {
            return false;
        }
        if self.area.width / (count as u16) < MIN_COLUMN_WIDTH {
            return false;
        }
        self.rebuild_regions(count);
        true
    }

    pub fn add_column(&mut self) -> bool {
        self.set_column_count(self.column_count + 1)
    }

    pub fn remove_column(&mut self) -> bool {
        self.set_column_count(self.column_count.saturating_sub(1))
    }

    /// Rebuilds every region for a new terminal size.
    ///
    /// Regions are never kept across a resize. The current column count is
    /// retained when it still fits, otherwise the largest fitting count
    /// wins, floored at [MIN_COLUMNS] even if that leaves columns narrower
    /// than the minimum on a tiny terminal.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        let mut count = self.column_count.max(MIN_COLUMNS);
        while count > MIN_COLUMNS
            && (count > area.width as usize || area.width / (count as u16) < MIN_COLUMN_WIDTH)
        {
            count -= 1;
        }
        self.rebuild_regions(count);
    }

    fn rebuild_regions(&mut self, count: usize) {
        self.column_count = count;
        let count = count as u16;
        let width = if count == 0 { 0 } else { self.area.width / count };
        let margin = if count == 0 { 0 } else { self.area.width % count };

        self.regions = (0..count)
            .map(|i| {
                Rect::new(
                    self.area.x + margin + i * width,
                    self.area.y,
                    width,
                    self.area.height,
                )
            })
            .collect();
    }

    /// Pairs each visible region with the column drawn into it.
    ///
    /// Alignment anchors on the rightmost column: region slot `i` shows the
    /// stack entry `i - region_count` from the end, and when the stack is
    /// shorter than the region count the leftmost slots stay blank.
    pub fn visible_columns(&self) -> impl Iterator<Item = (Rect, &Column)> {
        let stack_len = self.columns.len() as isize;
        let region_count = self.regions.len() as isize;

        self.regions.iter().enumerate().filter_map(move |(i, rect)| {
            let offset = i as isize - region_count;
            if offset >= -stack_len {
                Some((*rect, &self.columns[(stack_len + offset) as usize]))
            } else {
                None
            }
        })
    }

    // Navigation

    /// Moves the active selection by `offset` and rebuilds the preview
    /// column for the new selection. Returns false (nothing changes) when
    /// the move falls outside the listing.
    pub fn select_rel(&mut self, fs: &dyn Fs, offset: isize) -> bool {
        debug_assert!(self.columns.len() >= 2);
        let rows = self.rows();

        let preview = {
            let Some(dir) = self.active_dir_mut() else {
                return false;
            };
            if !dir.select_rel(offset, rows) {
                return false;
            }
            dir.column_for_selection(fs)
        };

        let last = self.columns.len() - 1;
        self.columns[last] = preview;
        true
    }

    /// Enters the previewed item, pushing a fresh placeholder as the new
    /// rightmost slot. Only enterable previews succeed.
    pub fn enter(&mut self) -> bool {
        if self.columns.last().is_some_and(|col| col.is_enterable()) {
            self.columns.push(Column::placeholder());
            true
        } else {
            false
        }
    }

    /// Leaves the active column: pops the rightmost slot and clears the
    /// selection of the column that becomes rightmost. Refused at the
    /// two-column floor.
    pub fn leave(&mut self) -> bool {
        if self.columns.len() > 2 {
            self.columns.pop();
            if let Some(last) = self.columns.last_mut() {
                last.clear_selection();
            }
            true
        } else {
            false
        }
    }

    /// Feeds one typed character into the type-ahead buffer and jumps the
    /// active selection to the best prefix match.
    ///
    /// Characters arriving within the timeout window extend the running
    /// buffer; a pause starts a new one. A path separator that extends a
    /// burst first enters the previewed directory, then joins the buffer
    /// like any other character.
    pub fn buffer_select(&mut self, fs: &dyn Fs, ch: char) -> bool {
        let now = Instant::now();
        let continuing = self.buffer.is_continuing(now);

        if continuing && ch == MAIN_SEPARATOR {
            self.enter();
        }
        self.buffer.push(ch, now, continuing);

        let rows = self.rows();
        let query = self.buffer.text().to_owned();
        if let Some(dir) = self.active_dir_mut() {
            dir.select_by_prefix(&query, rows);
        }
        // Re-assert the selection so the preview column follows it.
        self.select_rel(fs, 0)
    }

    /// Applies the freshness policy and sweeps pending column errors.
    ///
    /// With `reload` set, every directory column in the visible tail
    /// re-lists itself (the always-fresh policy); without it only the error
    /// sweep runs. Returned strings belong in the command area.
    pub fn refresh(&mut self, fs: &dyn Fs, reload: bool) -> Vec<String> {
        let first_visible = self.columns.len().saturating_sub(self.regions.len());
        let mut errors = Vec::new();

        for (idx, col) in self.columns.iter_mut().enumerate() {
            if let Some(dir) = col.as_dir_mut() {
                if reload && idx >= first_visible {
                    dir.reload(fs);
                }
                if let Some(err) = dir.take_error() {
                    errors.push(err);
                }
            }
        }
        errors
    }
}

/// Transient type-ahead state: the characters of the current burst and when
/// the last one arrived.
struct SelectBuffer {
    text: String,
    last: Option<Instant>,
    timeout: Duration,
}

impl SelectBuffer {
    fn new(timeout: Duration) -> Self {
        SelectBuffer {
            text: String::new(),
            last: None,
            timeout,
        }
    }

    #[inline]
    fn text(&self) -> &str {
        &self.text
    }

    /// Whether a character arriving `now` continues the current burst.
    fn is_continuing(&self, now: Instant) -> bool {
        self.last
            .is_some_and(|last| now.duration_since(last) < self.timeout)
    }

    fn push(&mut self, ch: char, now: Instant, continuing: bool) {
        if !continuing {
            self.text.clear();
        }
        self.text.push(ch);
        self.last = Some(now);
    }
}
