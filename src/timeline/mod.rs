pub(crate) mod dsl;
pub(crate) mod phase;
pub(crate) mod track;
