//! Offset pagination over the already-filtered, in-memory sequence.
//!
//! Page changes never refetch or re-filter anything; they slice the same
//! sequence again. Out-of-range input degrades to an empty slice, never an
//! error.

/// Posts shown per listing page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Numbered pages kept visible on each side of the current page.
const WINDOW: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// The clamped 1-based page number actually shown.
    pub number: usize,
    pub total_pages: usize,
}

/// Slice `items` for the given 1-based page, clipped to bounds.
/// `total_pages == 0` exactly when `items` is empty. An out-of-range
/// request still yields an empty slice, but the reported `number` is
/// clamped so it agrees with the control bar.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let requested = page.max(1);
    let total_pages = items.len().div_ceil(page_size);

    let start = (requested - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: &items[start..end],
        number: requested.min(total_pages.max(1)),
        total_pages,
    }
}

/// One entry of the rendered pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    /// Jump to the previous page; present iff the current page is not the first.
    Previous(usize),
    Number { page: usize, active: bool },
    /// A collapsed run of hidden page numbers.
    Ellipsis,
    /// Jump to the next page; present iff the current page is not the last.
    Next(usize),
}

/// Controls for the pagination bar: first and last page always, a ±2 window
/// around the current page, one ellipsis per collapsed gap. Empty when there
/// is at most one page.
pub fn page_controls(page: usize, total_pages: usize) -> Vec<PageControl> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let page = page.clamp(1, total_pages);
    let mut controls = Vec::new();

    if page > 1 {
        controls.push(PageControl::Previous(page - 1));
    }

    for candidate in 1..=total_pages {
        let in_window = candidate + WINDOW >= page && candidate <= page + WINDOW;
        if candidate == 1 || candidate == total_pages || in_window {
            controls.push(PageControl::Number {
                page: candidate,
                active: candidate == page,
            });
        } else if candidate + WINDOW + 1 == page || candidate == page + WINDOW + 1 {
            controls.push(PageControl::Ellipsis);
        }
    }

    if page < total_pages {
        controls.push(PageControl::Next(page + 1));
    }

    controls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_zero_pages_and_no_controls() {
        let page = paginate::<u32>(&[], 1, DEFAULT_PAGE_SIZE);
        assert!(page.items.is_empty());
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page_controls(page.number, page.total_pages).is_empty());
    }

    #[test]
    fn seven_items_split_into_six_and_one() {
        let items: Vec<u32> = (1..=7).collect();

        let first = paginate(&items, 1, 6);
        assert_eq!(first.items, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(first.total_pages, 2);

        let second = paginate(&items, 2, 6);
        assert_eq!(second.items, &[7]);
        assert_eq!(second.total_pages, 2);
    }

    #[test]
    fn out_of_range_page_yields_empty_slice_without_panicking() {
        let items: Vec<u32> = (1..=7).collect();
        for page in [3, 50, usize::MAX] {
            let result = paginate(&items, page, 6);
            assert!(result.items.is_empty());
            assert_eq!(result.total_pages, 2);
        }
    }

    #[test]
    fn out_of_range_page_reports_the_last_real_page() {
        let items: Vec<u32> = (1..=7).collect();
        let result = paginate(&items, 50, 6);
        assert_eq!(result.number, 2);

        // The reported number and the control bar's active page agree.
        let active = page_controls(result.number, result.total_pages)
            .into_iter()
            .find_map(|c| match c {
                PageControl::Number { page, active: true } => Some(page),
                _ => None,
            });
        assert_eq!(active, Some(result.number));
    }

    #[test]
    fn page_zero_is_treated_as_page_one() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(paginate(&items, 0, 6).items, paginate(&items, 1, 6).items);
    }

    #[test]
    fn single_page_produces_no_controls() {
        assert!(page_controls(1, 1).is_empty());
    }

    #[test]
    fn first_page_has_next_but_no_previous() {
        let controls = page_controls(1, 10);
        assert_eq!(
            controls,
            vec![
                PageControl::Number {
                    page: 1,
                    active: true
                },
                PageControl::Number {
                    page: 2,
                    active: false
                },
                PageControl::Number {
                    page: 3,
                    active: false
                },
                PageControl::Ellipsis,
                PageControl::Number {
                    page: 10,
                    active: false
                },
                PageControl::Next(2),
            ]
        );
    }

    #[test]
    fn middle_page_shows_window_with_two_gaps() {
        let controls = page_controls(6, 12);
        assert_eq!(
            controls,
            vec![
                PageControl::Previous(5),
                PageControl::Number {
                    page: 1,
                    active: false
                },
                PageControl::Ellipsis,
                PageControl::Number {
                    page: 4,
                    active: false
                },
                PageControl::Number {
                    page: 5,
                    active: false
                },
                PageControl::Number {
                    page: 6,
                    active: true
                },
                PageControl::Number {
                    page: 7,
                    active: false
                },
                PageControl::Number {
                    page: 8,
                    active: false
                },
                PageControl::Ellipsis,
                PageControl::Number {
                    page: 12,
                    active: false
                },
                PageControl::Next(7),
            ]
        );
    }

    #[test]
    fn last_page_has_previous_but_no_next() {
        let controls = page_controls(10, 10);
        assert!(matches!(controls.first(), Some(PageControl::Previous(9))));
        assert!(!controls.iter().any(|c| matches!(c, PageControl::Next(_))));
    }

    #[test]
    fn adjacent_gap_of_one_page_still_collapses_to_ellipsis() {
        // Pages 1..=7 with current page 5: page 2 is the only hidden one.
        let controls = page_controls(5, 7);
        let ellipses = controls
            .iter()
            .filter(|c| matches!(c, PageControl::Ellipsis))
            .count();
        assert_eq!(ellipses, 1);
    }
}
