pub(crate) mod epicycle;
pub(crate) mod trace;
