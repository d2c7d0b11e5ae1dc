use axum::response::Response;
use tracing::debug;

use crate::guard::CurrentUser;
use crate::views;

pub async fn home() -> Response {
    views::home()
}

pub async fn secrets(CurrentUser(user): CurrentUser) -> Response {
    debug!(user = %user.to_info().display_name(), "serving secrets");
    views::secrets()
}
