mod page_view_tracker;

pub use page_view_tracker::PageViewTracker;
