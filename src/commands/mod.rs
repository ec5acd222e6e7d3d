mod scan;

pub use scan::cmd_scan;
