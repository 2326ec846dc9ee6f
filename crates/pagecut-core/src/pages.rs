//! Page selection parsing for extract-style operations.

use crate::error::SelectionError;

type Result<T> = std::result::Result<T, SelectionError>;

/// Parse a 1-based page selection such as `1,3,5-7,10-` against a document
/// with `page_count` pages, returning 0-based page indices in selection
/// order.
///
/// An open-ended range (`10-`) runs to the last page. Page 0, pages beyond
/// the document end, and reversed ranges are rejected.
pub fn parse_page_selection(spec: &str, page_count: usize) -> Result<Vec<usize>> {
    let mut pages = Vec::new();

    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((start_str, end_str)) = part.split_once('-') {
            let start_str = start_str.trim();
            let end_str = end_str.trim();

            if start_str.is_empty() || end_str.contains('-') {
                return Err(SelectionError::InvalidRange(part.to_string()));
            }

            let start = parse_page(start_str, page_count)?;
            let end = if end_str.is_empty() {
                page_count
            } else {
                parse_page(end_str, page_count)?
            };

            if start > end {
                return Err(SelectionError::ReversedRange(part.to_string()));
            }
            pages.extend((start..=end).map(|page| page - 1));
        } else {
            pages.push(parse_page(part, page_count)? - 1);
        }
    }

    if pages.is_empty() {
        return Err(SelectionError::Empty);
    }
    Ok(pages)
}

/// 0-based indices of the pages with odd 1-based numbers: 1, 3, 5, ...
pub fn odd_pages(page_count: usize) -> Vec<usize> {
    (0..page_count).step_by(2).collect()
}

/// 0-based indices of the pages with even 1-based numbers: 2, 4, 6, ...
pub fn even_pages(page_count: usize) -> Vec<usize> {
    (1..page_count).step_by(2).collect()
}

fn parse_page(text: &str, page_count: usize) -> Result<usize> {
    let page: usize = text
        .parse()
        .map_err(|_| SelectionError::InvalidNumber(text.to_string()))?;
    if page == 0 {
        return Err(SelectionError::PageZero);
    }
    if page > page_count {
        return Err(SelectionError::OutOfRange { page, page_count });
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_singles_ranges_and_open_end() {
        let pages = parse_page_selection("1,3,5-7,10-", 12).unwrap();
        assert_eq!(pages, vec![0, 2, 4, 5, 6, 9, 10, 11]);
    }

    #[test]
    fn keeps_selection_order() {
        let pages = parse_page_selection("4,1-2", 5).unwrap();
        assert_eq!(pages, vec![3, 0, 1]);
    }

    #[test]
    fn rejects_page_zero() {
        assert!(matches!(
            parse_page_selection("0", 5),
            Err(SelectionError::PageZero)
        ));
    }

    #[test]
    fn rejects_out_of_range_page() {
        assert!(matches!(
            parse_page_selection("7", 5),
            Err(SelectionError::OutOfRange { page: 7, page_count: 5 })
        ));
    }

    #[test]
    fn rejects_reversed_range() {
        assert!(matches!(
            parse_page_selection("5-3", 5),
            Err(SelectionError::ReversedRange(_))
        ));
    }

    #[test]
    fn rejects_non_numeric_and_double_dash() {
        assert!(matches!(
            parse_page_selection("abc", 5),
            Err(SelectionError::InvalidNumber(_))
        ));
        assert!(matches!(
            parse_page_selection("1-2-3", 5),
            Err(SelectionError::InvalidRange(_))
        ));
    }

    #[test]
    fn empty_selection_is_an_error() {
        assert!(matches!(
            parse_page_selection(" , ", 5),
            Err(SelectionError::Empty)
        ));
    }

    #[test]
    fn odd_and_even_helpers() {
        assert_eq!(odd_pages(5), vec![0, 2, 4]);
        assert_eq!(even_pages(5), vec![1, 3]);
        assert_eq!(even_pages(1), Vec::<usize>::new());
    }
}
