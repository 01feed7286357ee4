pub mod cookie;
pub mod selectors;
pub mod upload;

pub use cookie::SessionCookie;
pub use upload::{UploadRequest, ALLOWED_VIDEO_EXTENSIONS};
