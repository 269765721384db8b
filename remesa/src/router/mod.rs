pub mod dispatch;
pub mod quotes;

pub mod util;
