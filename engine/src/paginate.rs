/// Consecutive pages of `page_size` items, the last page shorter when the
/// length is not a multiple. A page size of zero yields no pages.
pub fn paginate<T>(items: &[T], page_size: usize) -> Vec<&[T]> {
    if page_size == 0 {
        return Vec::new();
    }
    items.chunks(page_size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_takes_the_remainder() {
        let items = [1, 2, 3, 4, 5];
        let pages = paginate(&items, 2);
        assert_eq!(pages, vec![&[1, 2][..], &[3, 4], &[5]]);
    }

    #[test]
    fn exact_multiple_fills_every_page() {
        let items = [1, 2, 3, 4];
        let pages = paginate(&items, 2);
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|page| page.len() == 2));
    }

    #[test]
    fn oversized_page_is_a_single_page() {
        let items = [1, 2, 3];
        assert_eq!(paginate(&items, 10), vec![&items[..]]);
    }

    #[test]
    fn zero_page_size_yields_no_pages() {
        let items = [1, 2, 3];
        assert!(paginate(&items, 0).is_empty());
        assert!(paginate::<i32>(&[], 3).is_empty());
    }
}
