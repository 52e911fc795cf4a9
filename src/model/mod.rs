pub(crate) mod entry;
pub(crate) mod page;
pub(crate) mod time;
