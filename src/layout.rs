//! Page layout policies and the pager that assigns labels to pages

use crate::constants::{LETTER_HEIGHT_MM, LETTER_WIDTH_MM};
use crate::error::ValidationError;
use crate::geometry::positive;
use tracing::trace;

/// How labels are arranged on pages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageLayoutPolicy {
    /// Continuous roll: each page is a single row of labels sized to fit it
    PerRowPage {
        labels_per_row: u32,
        /// Left edge to left edge distance between labels in a row
        horizontal_spacing: f32,
    },
    /// Fixed sheet holding a grid of labels
    GridPage {
        labels_per_row: u32,
        horizontal_spacing: f32,
        /// Top edge to top edge distance between rows
        vertical_spacing: f32,
        page_width: f32,
        page_height: f32,
        /// Only reduces how many rows fit; the first row stays flush with the
        /// top edge
        page_margin_top: f32,
        page_margin_left: f32,
    },
}

impl PageLayoutPolicy {
    /// One row per page
    pub fn per_row(labels_per_row: u32, horizontal_spacing: f32) -> Self {
        Self::PerRowPage {
            labels_per_row,
            horizontal_spacing,
        }
    }

    /// Grid on a US Letter sheet with no page margins
    pub fn grid(labels_per_row: u32, horizontal_spacing: f32, vertical_spacing: f32) -> Self {
        Self::GridPage {
            labels_per_row,
            horizontal_spacing,
            vertical_spacing,
            page_width: LETTER_WIDTH_MM,
            page_height: LETTER_HEIGHT_MM,
            page_margin_top: 0.0,
            page_margin_left: 0.0,
        }
    }

    /// Set the sheet size of a grid layout; no effect on per-row layouts
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        if let Self::GridPage {
            page_width,
            page_height,
            ..
        } = &mut self
        {
            *page_width = width;
            *page_height = height;
        }
        self
    }

    /// Set the page margins of a grid layout; no effect on per-row layouts
    pub fn with_page_margins(mut self, top: f32, left: f32) -> Self {
        if let Self::GridPage {
            page_margin_top,
            page_margin_left,
            ..
        } = &mut self
        {
            *page_margin_top = top;
            *page_margin_left = left;
        }
        self
    }

    pub fn labels_per_row(&self) -> u32 {
        match self {
            Self::PerRowPage { labels_per_row, .. } | Self::GridPage { labels_per_row, .. } => {
                *labels_per_row
            }
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.labels_per_row() == 0 {
            return Err(ValidationError::ZeroCount("labels per row"));
        }
        match *self {
            Self::PerRowPage {
                horizontal_spacing, ..
            } => positive("horizontal spacing", horizontal_spacing),
            Self::GridPage {
                horizontal_spacing,
                vertical_spacing,
                page_width,
                page_height,
                page_margin_top,
                page_margin_left,
                ..
            } => {
                positive("horizontal spacing", horizontal_spacing)?;
                positive("vertical spacing", vertical_spacing)?;
                positive("page width", page_width)?;
                positive("page height", page_height)?;
                for (field, value) in [
                    ("page top margin", page_margin_top),
                    ("page left margin", page_margin_left),
                ] {
                    if !(value >= 0.0) {
                        return Err(ValidationError::NegativeMargin { field, value });
                    }
                }
                Ok(())
            }
        }
    }

    /// Resolve page size and capacity for labels of the given frame size
    pub fn resolve(&self, frame: (f32, f32)) -> PageLayout {
        let (label_width, label_height) = frame;
        match *self {
            Self::PerRowPage {
                labels_per_row,
                horizontal_spacing,
            } => PageLayout {
                page_width: labels_per_row.saturating_sub(1) as f32 * horizontal_spacing + label_width,
                page_height: label_height,
                labels_per_row,
                labels_per_column: 1,
                left: 0.0,
                horizontal_spacing,
                vertical_spacing: label_height,
            },
            Self::GridPage {
                labels_per_row,
                horizontal_spacing,
                vertical_spacing,
                page_width,
                page_height,
                page_margin_top,
                page_margin_left,
            } => {
                let rows = ((page_height - page_margin_top) / vertical_spacing).floor();
                PageLayout {
                    page_width,
                    page_height,
                    labels_per_row,
                    labels_per_column: (rows.max(1.0)) as u32,
                    left: page_margin_left,
                    horizontal_spacing,
                    vertical_spacing,
                }
            }
        }
    }
}

/// Concrete page dimensions and grid for one job
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub labels_per_row: u32,
    pub labels_per_column: u32,
    pub left: f32,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
}

impl PageLayout {
    /// Labels that fit on one page
    pub fn capacity(&self) -> usize {
        self.labels_per_row as usize * self.labels_per_column as usize
    }

    /// Top-left corner of the label at `index_on_page`.
    ///
    /// Row 0 is flush with the top edge; row `n` starts at `n *
    /// vertical_spacing`.
    pub fn slot(&self, index_on_page: usize) -> (f32, f32) {
        let per_row = self.labels_per_row.max(1) as usize;
        let column = index_on_page % per_row;
        let row = index_on_page / per_row;
        let x = self.left + column as f32 * self.horizontal_spacing;
        let y = if row == 0 {
            0.0
        } else {
            row as f32 * self.vertical_spacing
        };
        (x, y)
    }
}

/// Pager state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerState {
    FillingPage,
    PageFull,
}

/// Where the next label goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// A new page has to be opened before drawing this label
    pub new_page: bool,
    /// Zero-based page number
    pub page: usize,
    pub index_on_page: usize,
}

/// Assigns consecutive labels to pages of a fixed capacity
#[derive(Debug, Clone)]
pub struct Pager {
    capacity: usize,
    state: PagerState,
    on_page: usize,
    pages: usize,
}

impl Pager {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: PagerState::FillingPage,
            on_page: 0,
            pages: 0,
        }
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    /// Pages opened so far
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Claim the slot for the next label
    pub fn place(&mut self) -> Placement {
        let new_page = self.pages == 0 || self.state == PagerState::PageFull;
        if new_page {
            self.pages += 1;
            self.on_page = 0;
            self.state = PagerState::FillingPage;
            trace!("Opening page {}", self.pages);
        }

        let index_on_page = self.on_page;
        self.on_page += 1;
        if self.on_page >= self.capacity {
            self.state = PagerState::PageFull;
        }

        Placement {
            new_page,
            page: self.pages - 1,
            index_on_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Labels per page when `total` labels are paged at `capacity`
    fn page_counts(total: usize, capacity: usize) -> Vec<usize> {
        let mut pager = Pager::new(capacity);
        let mut counts: Vec<usize> = Vec::new();
        for _ in 0..total {
            let placement = pager.place();
            if placement.new_page {
                counts.push(0);
            }
            if let Some(count) = counts.last_mut() {
                *count += 1;
            }
        }
        counts
    }

    #[test]
    fn test_per_row_pagination() {
        let layout = PageLayoutPolicy::per_row(4, 30.0).resolve((25.0, 12.0));
        assert_eq!(layout.capacity(), 4);
        assert_eq!(page_counts(10, layout.capacity()), vec![4, 4, 2]);
    }

    #[test]
    fn test_per_row_page_size() {
        let layout = PageLayoutPolicy::per_row(3, 155.0).resolve((150.0, 100.0));
        assert!((layout.page_width - 460.0).abs() < 1e-3);
        assert_eq!(layout.page_height, 100.0);
        assert_eq!(layout.slot(2), (310.0, 0.0));
    }

    #[test]
    fn test_grid_pagination() {
        // (279.4 - 0) / 80 floors to 3 rows
        let layout = PageLayoutPolicy::grid(2, 100.0, 80.0).resolve((90.0, 20.0));
        assert_eq!(layout.labels_per_column, 3);
        assert_eq!(layout.capacity(), 6);
        assert_eq!(page_counts(13, layout.capacity()), vec![6, 6, 1]);
    }

    #[test]
    fn test_grid_top_margin_reduces_rows() {
        let layout = PageLayoutPolicy::grid(1, 100.0, 80.0)
            .with_page_margins(40.0, 0.0)
            .resolve((90.0, 20.0));
        assert_eq!(layout.labels_per_column, 2);
    }

    #[test]
    fn test_grid_has_at_least_one_row() {
        let layout = PageLayoutPolicy::grid(2, 50.0, 500.0).resolve((40.0, 20.0));
        assert_eq!(layout.labels_per_column, 1);
        assert_eq!(page_counts(3, layout.capacity()), vec![2, 1]);
    }

    #[test]
    fn test_first_row_flush_with_top_edge() {
        let layout = PageLayoutPolicy::grid(2, 100.0, 45.72)
            .with_page_margins(25.0, 12.0)
            .resolve((90.0, 20.0));
        assert_eq!(layout.slot(0), (12.0, 0.0));
        assert_eq!(layout.slot(1), (112.0, 0.0));
        assert_eq!(layout.slot(2), (12.0, 45.72));
        assert!((layout.slot(5).1 - 2.0 * 45.72).abs() < 1e-4);
    }

    #[test]
    fn test_pager_states() {
        let mut pager = Pager::new(2);
        assert_eq!(pager.state(), PagerState::FillingPage);
        assert!(pager.place().new_page);
        assert_eq!(pager.state(), PagerState::FillingPage);
        let second = pager.place();
        assert!(!second.new_page);
        assert_eq!(second.index_on_page, 1);
        assert_eq!(pager.state(), PagerState::PageFull);
        let third = pager.place();
        assert!(third.new_page);
        assert_eq!(third.page, 1);
        assert_eq!(third.index_on_page, 0);
        assert_eq!(pager.page_count(), 2);
    }

    #[test]
    fn test_exact_fill_has_no_trailing_page() {
        assert_eq!(page_counts(8, 4), vec![4, 4]);
        assert!(page_counts(0, 4).is_empty());
    }

    #[test]
    fn test_policy_validation() {
        assert_eq!(
            PageLayoutPolicy::per_row(0, 10.0).validate(),
            Err(ValidationError::ZeroCount("labels per row"))
        );
        assert!(PageLayoutPolicy::per_row(2, 0.0).validate().is_err());
        assert!(PageLayoutPolicy::grid(2, 10.0, -1.0).validate().is_err());
        assert!(
            PageLayoutPolicy::grid(2, 10.0, 10.0)
                .with_page_margins(-1.0, 0.0)
                .validate()
                .is_err()
        );
        assert!(PageLayoutPolicy::grid(2, 10.0, 10.0).validate().is_ok());
    }
}
