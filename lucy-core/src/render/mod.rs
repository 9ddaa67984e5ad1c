//! Frame geometry and the adapters that turn it into pixels.

pub(crate) mod adapter;
pub(crate) mod cpu;
pub(crate) mod geometry;
pub(crate) mod style;
