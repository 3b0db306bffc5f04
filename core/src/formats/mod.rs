pub mod grid;
pub mod read_ext;
pub mod volume;

pub(crate) mod util;
