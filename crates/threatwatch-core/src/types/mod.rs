mod feed;
mod record;
mod set;

pub use feed::*;
pub use record::*;
pub use set::*;
