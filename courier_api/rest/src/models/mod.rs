use serde::Serialize;

pub mod contact;

#[derive(Serialize)]
pub struct ApiError {
    pub detail: &'static str,
}

#[derive(Serialize)]
pub struct ApiHealthStatus {
    pub http: bool,
    pub cache: bool,
    pub email: bool,
}
