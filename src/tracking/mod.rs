pub(crate) mod adjust;
pub(crate) mod bbox;
pub(crate) mod codec;
pub(crate) mod interpolate;
pub(crate) mod properties;
pub(crate) mod shared;
pub(crate) mod timeline;
pub(crate) mod track;
