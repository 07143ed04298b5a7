pub mod extract;
pub mod normalize;

pub use extract::{extract_dl_candidate, extract_rc_candidate};
pub use normalize::{canonicalize, normalize};
