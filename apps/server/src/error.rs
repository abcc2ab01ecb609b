use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tradechat_core::errors::Error as CoreError;

#[derive(Error, Debug)]
#[error(transparent)]
pub struct ApiError(#[from] CoreError);

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let e = &self.0;
        let (status, msg) = match e {
            // Price lookups: the provider's last error is the detail
            CoreError::MarketData(inner) if inner.is_not_found() => {
                (StatusCode::NOT_FOUND, inner.to_string())
            }
            _ if e.is_trade_not_found() => (StatusCode::NOT_FOUND, "trade_not_found".to_string()),
            CoreError::Trade(_) | CoreError::Validation(_) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", msg);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tradechat_core::errors::{DatabaseError, ValidationError};
    use tradechat_core::TradeError;
    use tradechat_market_data::MarketDataError;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        let lookup = CoreError::MarketData(MarketDataError::SymbolNotResolvable {
            symbol: "X".to_string(),
            message: "nothing".to_string(),
        });
        assert_eq!(status_of(lookup), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(CoreError::MarketData(MarketDataError::CredentialMissing(
                "OPENAI".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(CoreError::from(TradeError::NotFound(3))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CoreError::from(TradeError::InvalidSide("hold".to_string()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CoreError::Database(DatabaseError::QueryFailed("boom".to_string()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(CoreError::Validation(ValidationError::InvalidInput(
                "bad".to_string()
            ))),
            StatusCode::BAD_REQUEST
        );
    }
}
