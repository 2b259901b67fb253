pub(crate) mod scroll_region;
pub(crate) mod scrub;
pub(crate) mod state;
