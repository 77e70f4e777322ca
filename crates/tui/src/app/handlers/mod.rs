pub(crate) mod keys;
pub(crate) mod search;

pub(crate) use keys::{handle_key, handle_mouse};
