//! Placeholder resources guarded by the role table.

use axum::http::Method;

fn stub(method: &Method, area: &str) -> String {
    format!("{}:: {} controller", method, area)
}

pub async fn admin(method: Method) -> String {
    stub(&method, "admin")
}

pub async fn moderator(method: Method) -> String {
    stub(&method, "moderator")
}

pub async fn user(method: Method) -> String {
    stub(&method, "user")
}
