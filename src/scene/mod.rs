pub(crate) mod lookup;
pub(crate) mod model;
pub(crate) mod preset;
pub(crate) mod state;
pub(crate) mod target;
