mod api;

pub use self::api::{ApiResponse, ApiResponsePagination, Pagination};
