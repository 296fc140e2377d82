use rouille::Response;

use crate::quiz::error::QuizError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
}

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        // every quiz error comes from what the client asked for
        ApiError::BadRequest(err.to_string())
    }
}

impl From<rouille::input::json::JsonError> for ApiError {
    fn from(err: rouille::input::json::JsonError) -> Self {
        ApiError::BadRequest(format!("invalid request body: {err}"))
    }
}

impl ApiError {
    pub fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => Response::text(msg).with_status_code(404),

            ApiError::BadRequest(msg) => Response::text(msg).with_status_code(400),
        }
    }
}
