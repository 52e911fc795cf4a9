pub(crate) mod classify;
pub(crate) mod flow;
pub(crate) mod geometry;
pub(crate) mod select;
pub(crate) mod split;
pub(crate) mod text;
