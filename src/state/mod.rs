/// State management module
///
/// This module handles all application state, including:
/// - Work item records and catalog loading (data.rs, catalog.rs)
/// - Filtering of the visible grid (filter.rs)
/// - Image carousels and the detail/zoom overlays (carousel.rs, expansion.rs)
/// - The password gate and its persistent store (gate.rs, storage.rs)

pub mod carousel;
pub mod catalog;
pub mod data;
pub mod expansion;
pub mod filter;
pub mod gate;
pub mod storage;
