use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use helius_client::HeliusError;
use serde::Serialize;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<HeliusError> for Error {
    fn from(e: HeliusError) -> Self {
        match e {
            HeliusError::Status { status, body } => Error::Upstream {
                status: status.as_u16(),
                body,
            },
            HeliusError::Rpc(message) => Error::Upstream {
                status: StatusCode::OK.as_u16(),
                body: message,
            },
            HeliusError::Http(e) => Error::Http(e),
            HeliusError::Other(e) => Error::Other(e),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn build<E: ResponseError>(e: &E) -> HttpResponse {
        HttpResponse::build(e.status_code()).json(ErrorBody {
            error: e.to_string(),
        })
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Upstream { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        ErrorBody::build(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_failures_map_to_bad_gateway() {
        let error = Error::from(HeliusError::Status {
            status: reqwest::StatusCode::IM_A_TEAPOT,
            body: "nope".to_owned(),
        });
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
        assert!(error.to_string().contains("418"));
    }

    #[test]
    fn rpc_errors_in_success_responses_are_upstream_failures() {
        let error = Error::from(HeliusError::Rpc("tree is full".to_owned()));
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
        assert!(error.to_string().contains("tree is full"));
    }

    #[test]
    fn invalid_request_is_bad_request() {
        let error = Error::InvalidRequest("missing field: method".to_owned());
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }
}
