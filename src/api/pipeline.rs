//! One submission: bounded API call, then local storage of the PDF

use super::error::{ApiError, SubmissionError};
use super::traits::DocGenApi;
use crate::state::forms::SubmissionRequest;
use crate::state::{PdfHandle, PdfStore};
use std::time::Duration;

/// Run `request` against `api`, giving up after `timeout`.
///
/// No retries: every call is one independent request.
pub async fn run_submission(
    api: &dyn DocGenApi,
    store: &PdfStore,
    request: &SubmissionRequest,
    timeout: Duration,
) -> Result<PdfHandle, SubmissionError> {
    tracing::info!(
        "Submitting {} (ticket {}) to {}",
        request.kind,
        request.ticket,
        request.url
    );

    let result = match tokio::time::timeout(timeout, api.generate_pdf(&request.url, &request.body))
        .await
    {
        Ok(result) => result.map_err(SubmissionError::from),
        Err(_) => Err(ApiError::Timeout(timeout).into()),
    };

    let result = result.and_then(|bytes| Ok(store.create(request.kind, &bytes)?));
    match &result {
        Ok(handle) => tracing::info!(
            "Ticket {} produced {} ({})",
            request.ticket,
            handle.path().display(),
            handle.info().human_size()
        ),
        Err(e) => tracing::warn!("Ticket {} failed: {}", request.ticket, e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockDocGenApi;
    use crate::document::{catalog, DocumentKind};
    use crate::state::forms::{FormSession, SubmissionTicket};
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};
    use uuid::Uuid;

    fn temp_store() -> PdfStore {
        PdfStore::new(std::env::temp_dir().join(format!("deedwright-pipeline-{}", Uuid::new_v4())))
    }

    fn request() -> SubmissionRequest {
        SubmissionRequest {
            ticket: SubmissionTicket::first(),
            kind: DocumentKind::Nda,
            url: "https://api.example.com/generate-general-nda-pdf".to_string(),
            body: json!({ "jurisdiction": "Mumbai" }),
        }
    }

    #[tokio::test]
    async fn test_success_stores_pdf() {
        let mut api = MockDocGenApi::new();
        api.expect_generate_pdf()
            .times(1)
            .returning(|_, _| Ok(b"%PDF-1.5 body".to_vec()));
        let store = temp_store();

        let handle = assert_ok!(
            run_submission(&api, &store, &request(), Duration::from_secs(5)).await
        );
        assert_eq!(handle.kind(), DocumentKind::Nda);
        assert_eq!(handle.info().version.as_deref(), Some("1.5"));
        assert!(handle.path().starts_with(store.dir()));
        drop(handle);
        let _ = std::fs::remove_dir_all(store.dir());
    }

    #[tokio::test]
    async fn test_status_error_is_passed_through() {
        let mut api = MockDocGenApi::new();
        api.expect_generate_pdf()
            .times(1)
            .returning(|_, _| Err(ApiError::Status(503)));

        let err = assert_err!(
            run_submission(&api, &temp_store(), &request(), Duration::from_secs(5)).await
        );
        assert!(matches!(err, SubmissionError::Api(ApiError::Status(503))));
    }

    struct SlowApi;

    #[async_trait::async_trait]
    impl DocGenApi for SlowApi {
        async fn generate_pdf(
            &self,
            _url: &str,
            _body: &serde_json::Value,
        ) -> Result<Vec<u8>, ApiError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_api_times_out() {
        let err = assert_err!(
            run_submission(&SlowApi, &temp_store(), &request(), Duration::from_secs(30)).await
        );
        assert!(matches!(
            err,
            SubmissionError::Api(ApiError::Timeout(d)) if d == Duration::from_secs(30)
        ));
    }

    #[tokio::test]
    async fn test_nda_session_issues_one_post_with_all_fields() {
        let schema = catalog::schema(DocumentKind::Nda).unwrap();
        let url = DocumentKind::Nda.endpoint_url("https://api.example.com");
        let mut session = FormSession::new(schema, url.clone());
        let paths: Vec<String> = session.schema().fields().map(|f| f.path.to_string()).collect();
        for path in &paths {
            session.update_field(path, "filled").unwrap();
        }
        session.go_to_step(isize::MAX);

        let request = session.prepare_submission().expect("validation should pass");
        assert!(session.is_submitting());

        let mut api = MockDocGenApi::new();
        let expected_url = url.clone();
        api.expect_generate_pdf()
            .withf(move |url, body| {
                let object = body.as_object().expect("JSON object body");
                url.to_string() == expected_url
                    && object.len() == 8
                    && object.values().all(|v| v == "filled")
            })
            .times(1)
            .returning(|_, _| Ok(b"%PDF-1.4".to_vec()));

        let store = temp_store();
        let outcome = run_submission(&api, &store, &request, Duration::from_secs(5)).await;
        session.complete_submission(request.ticket, outcome);

        assert!(session.is_submitted());
        assert!(session.success());
        let _ = std::fs::remove_dir_all(store.dir());
    }
}
