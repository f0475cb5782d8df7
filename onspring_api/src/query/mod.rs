mod common;
pub use self::common::Query;

mod paging;
pub use self::paging::{PagingRequest, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
