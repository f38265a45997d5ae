//! Response Envelope

use salvo::{
    catcher::Catcher,
    http::{ResBody, StatusCode},
    oapi::ToSchema,
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// Successful response wrapper shared by every resource endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct Envelope<T: ToSchema + 'static> {
    /// Always `true`; failures use [`ErrorEnvelope`]
    pub success: bool,

    /// Human-readable outcome
    pub message: String,

    /// The payload
    pub data: T,
}

impl<T: ToSchema + 'static> Envelope<T> {
    pub(crate) fn ok(message: &str, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.to_string(),
            data,
        })
    }
}

/// Failure wrapper written for every 4xx and 5xx response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorEnvelope {
    /// Always `false`
    pub success: bool,

    /// What went wrong, e.g. `Route not found`
    pub message: String,

    /// Status name, e.g. `Not Found`
    pub error: String,
}

impl ErrorEnvelope {
    fn from_response(res: &Response) -> Self {
        if let ResBody::Error(error) = &res.body {
            return Self {
                success: false,
                message: error.brief.clone(),
                error: error.name.clone(),
            };
        }

        let name = res
            .status_code
            .unwrap_or(StatusCode::NOT_FOUND)
            .canonical_reason()
            .unwrap_or("Error")
            .to_string();

        Self {
            success: false,
            message: name.clone(),
            error: name,
        }
    }
}

#[handler]
async fn render_error(res: &mut Response, ctrl: &mut FlowCtrl) {
    let envelope = ErrorEnvelope::from_response(res);

    res.render(Json(envelope));
    ctrl.skip_rest();
}

/// Catcher that rewrites error responses into [`ErrorEnvelope`]s.
pub(crate) fn catcher() -> Catcher {
    Catcher::default().hoop(render_error)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn conflict() -> Result<&'static str, StatusError> {
        Err(StatusError::conflict().brief("Carrier already exists"))
    }

    fn make_service() -> Service {
        Service::new(Router::with_path("conflict").get(conflict)).catcher(catcher())
    }

    #[tokio::test]
    async fn test_status_errors_keep_their_brief() -> TestResult {
        let mut res = TestClient::get("http://example.com/conflict")
            .send(&make_service())
            .await;

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert!(!body.success);
        assert_eq!(body.message, "Carrier already exists");
        assert_eq!(body.error, "Conflict");

        Ok(())
    }

    #[tokio::test]
    async fn test_unmatched_paths_are_enveloped() -> TestResult {
        let mut res = TestClient::get("http://example.com/nowhere")
            .send(&make_service())
            .await;

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert!(!body.success);
        assert_eq!(body.error, "Not Found");

        Ok(())
    }
}
