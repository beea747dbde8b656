//! Stream scan: slide a window of fixed size over a stream and report the
//! cheapest window to level.
//!
//! The first `W` values prime the window; every later value evicts the oldest
//! one and the resulting price is folded into the running minimum.

use serde::Serialize;
use tracing::{Span, debug, field, info, instrument};

use crate::error::WindowError;
use crate::median_cost::MedianCostWindow;

/// Outcome of a full scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub window_size: usize,
    /// Number of windows evaluated: `n - W + 1`.
    pub windows: usize,
    /// Lowest leveling cost over all windows.
    pub min_price: i128,
    /// Stream index where the first cheapest window starts.
    pub best_window_start: usize,
}

/// Minimum leveling cost over every window of `window_size` consecutive values.
#[instrument(
    target = "scan",
    skip(values),
    fields(windows = field::Empty, min_price = field::Empty)
)]
pub fn scan<I>(window_size: usize, values: I) -> Result<ScanReport, WindowError>
where
    I: IntoIterator<Item = i64>,
{
    let mut best: Option<ScanReport> = None;

    let windows = slide(window_size, values, |start, price| match best.as_mut() {
        Some(report) if price >= report.min_price => {}
        Some(report) => {
            debug!(start, price, previous = %report.min_price, "new minimum price");
            report.min_price = price;
            report.best_window_start = start;
        }
        None => {
            best = Some(ScanReport {
                window_size,
                windows: 0,
                min_price: price,
                best_window_start: start,
            });
        }
    })?;

    // `slide` evaluates at least one window or fails.
    let mut report = best.ok_or(WindowError::EmptyWindow)?;
    report.windows = windows;

    let span = Span::current();
    span.record("windows", windows);
    span.record("min_price", field::display(report.min_price));

    info!(
        windows,
        min_price = %report.min_price,
        best_window_start = report.best_window_start,
        "scan complete"
    );

    Ok(report)
}

/// Leveling cost of every window, in stream order.
pub fn window_prices<I>(window_size: usize, values: I) -> Result<Vec<i128>, WindowError>
where
    I: IntoIterator<Item = i64>,
{
    let mut prices = Vec::new();
    slide(window_size, values, |_, price| prices.push(price))?;
    Ok(prices)
}

/// Prime the window, then slide it one value at a time, handing each window's
/// start index and price to `on_price`. Returns the number of windows.
fn slide<I, F>(window_size: usize, values: I, mut on_price: F) -> Result<usize, WindowError>
where
    I: IntoIterator<Item = i64>,
    F: FnMut(usize, i128),
{
    let mut window = MedianCostWindow::new(window_size)?;
    let mut values = values.into_iter();

    for value in values.by_ref().take(window_size) {
        window.insert(value)?;
    }
    if !window.is_full() {
        return Err(WindowError::StreamTooShort {
            window_size,
            len: window.len(),
        });
    }

    on_price(0, window.price()?);
    let mut windows = 1;

    for value in values {
        window.remove()?;
        window.insert(value)?;
        on_price(windows, window.price()?);
        windows += 1;
    }

    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn reports_cheapest_window() {
        let report = scan(3, [1, 5, 3, 2, 8]).unwrap();

        assert_eq!(
            report,
            ScanReport {
                window_size: 3,
                windows: 3,
                min_price: 3,
                best_window_start: 1,
            }
        );
    }

    #[test]
    fn prices_every_window_in_order() {
        assert_eq!(window_prices(3, [1, 5, 3, 2, 8]).unwrap(), vec![4, 3, 6]);
    }

    #[test]
    fn stream_exactly_one_window_long() {
        let report = scan(4, [10, 0, 10, 0]).unwrap();

        assert_eq!(report.windows, 1);
        assert_eq!(report.min_price, 20);
        assert_eq!(report.best_window_start, 0);
    }

    #[test]
    fn ties_keep_the_earliest_window() {
        let report = scan(2, [1, 2, 3, 4]).unwrap();

        assert_eq!(report.min_price, 1);
        assert_eq!(report.best_window_start, 0);
        assert_eq!(report.windows, 3);
    }

    #[test]
    fn short_stream_is_rejected() {
        assert_eq!(
            scan(4, [1, 2, 3]).unwrap_err(),
            WindowError::StreamTooShort {
                window_size: 4,
                len: 3,
            }
        );
        assert_eq!(
            window_prices(1, std::iter::empty()).unwrap_err(),
            WindowError::StreamTooShort {
                window_size: 1,
                len: 0,
            }
        );
    }

    #[test]
    fn zero_window_is_rejected() {
        assert_eq!(scan(0, [1, 2]).unwrap_err(), WindowError::ZeroCapacity);
    }

    #[test]
    fn report_serializes_flat() {
        let report = scan(3, [1, 5, 3, 2, 8]).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "window_size": 3,
                "windows": 3,
                "min_price": 3,
                "best_window_start": 1,
            })
        );
    }

    #[traced_test]
    #[test]
    fn logs_new_minimum_and_completion() {
        scan(3, [9, 1, 5, 3, 2, 8]).unwrap();

        assert!(logs_contain("new minimum price"));
        assert!(logs_contain("scan complete"));
    }
}
