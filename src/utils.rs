///
/// Check if all items from iterator is the same value
/// If so, return the unique value.
/// Otherwise (including the iterator has no value) return none.
///
pub fn all_same_value<T: PartialEq + Clone, I: Iterator<Item = T>>(mut iter: I) -> Option<T> {
    match iter.next() {
        Some(first) => {
            if iter.all(|item| item == first) {
                Some(first)
            } else {
                None
            }
        }
        None => None,
    }
}

use std::time::Instant;
///
/// measure time in milli-seconds (ms) of closure.
///
pub fn timer<F, T>(f: F) -> (T, u128)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let ret = f();
    let duration = start.elapsed();
    (ret, duration.as_millis())
}

use indicatif::ProgressStyle;
///
/// progress bar style shared by window scans
///
pub fn progress_common_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "[{elapsed_precise}/{eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_same_value_test() {
        {
            let xs = vec![0, 1, 2, 5, 3];
            assert_eq!(all_same_value(xs.iter()), None);
        }
        {
            let xs = vec![0, 0, 0];
            assert_eq!(all_same_value(xs.iter()), Some(&0));
        }
        {
            let xs = vec![5];
            assert_eq!(all_same_value(xs.iter()), Some(&5));
        }
        {
            let xs: Vec<usize> = Vec::new();
            assert_eq!(all_same_value(xs.iter()), None);
        }
    }

    #[test]
    fn timer_returns_value() {
        let (x, _ms) = timer(|| 1 + 1);
        assert_eq!(x, 2);
    }
}
