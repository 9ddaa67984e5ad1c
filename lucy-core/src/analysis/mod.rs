pub(crate) mod normalize;
pub(crate) mod spectrum;
pub(crate) mod transform;
