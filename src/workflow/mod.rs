pub mod login_flow;
pub mod upload_flow;

pub use login_flow::{LoginFlow, LoginOutcome};
pub use upload_flow::{PublishOutcome, PublishStrategy, UploadFlow, PUBLISH_STRATEGIES};
