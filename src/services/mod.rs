pub mod caption_service;
pub mod cookie_store;

pub use caption_service::CaptionService;
pub use cookie_store::CookieStore;
