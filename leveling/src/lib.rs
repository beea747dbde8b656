pub mod error;
pub mod indexed_heap;
pub mod median_cost;
pub mod scan;
pub mod slot_ring;

pub use error::WindowError;
pub use median_cost::MedianCostWindow;
pub use scan::{ScanReport, scan, window_prices};
