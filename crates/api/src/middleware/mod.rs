//! HTTP middleware: request ids and the two authentication gates.

mod auth;
mod request_id;

pub use auth::{require_robot_key, require_session, CurrentUser, RobotApiKey};
pub use request_id::{RequestId, RequestIdLayer, REQUEST_ID_HEADER};
