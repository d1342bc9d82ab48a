pub(crate) mod background;
pub(crate) mod compositor;
pub(crate) mod error;
pub(crate) mod layout;
pub(crate) mod shop;
