#[cfg(test)]
mod mx_routes_edge_case_tests {
    use crate::config::{ALLOWED_ORIGIN, Settings};
    use crate::models::{ValidationReport, Verdict};
    use crate::routes::mx::*;
    use crate::validation::batch::BatchValidator;
    use crate::validation::dnsmx::{DnsMxResolver, MockMxLookup, MxLookup};
    use actix_web::{App, http::StatusCode, http::header, test, web};
    use serde_json::json;
    use std::sync::Arc;

    async fn create_test_app(
        lookup: Arc<dyn MxLookup>,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new()
                .app_data(web::Data::new(BatchValidator::new(lookup)))
                .configure(configure_routes),
        )
        .await
    }

    fn echo_lookup() -> Arc<dyn MxLookup> {
        let mut mock = MockMxLookup::new();
        mock.expect_lookup_mx()
            .returning(|domain: &str| Ok(vec![format!("mx.{domain}")]));
        Arc::new(mock)
    }

    fn resolver_lookup() -> Arc<dyn MxLookup> {
        Arc::new(DnsMxResolver::from_settings(&Settings::default()).unwrap())
    }

    #[actix_web::test]
    async fn test_missing_domains_field() {
        let app = create_test_app(echo_lookup()).await;
        let req = test::TestRequest::post()
            .uri("/")
            .set_json(json!({}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        assert_eq!(&body[..], br#"{"results":[]}"#);
    }

    #[actix_web::test]
    async fn test_null_domains_field() {
        let app = create_test_app(echo_lookup()).await;
        let req = test::TestRequest::post()
            .uri("/")
            .set_json(json!({ "domains": null }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_empty_body_is_bad_request() {
        let app = create_test_app(echo_lookup()).await;
        let req = test::TestRequest::post().uri("/").to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            ALLOWED_ORIGIN
        );
    }

    #[actix_web::test]
    async fn test_wrong_shapes_are_bad_requests() {
        let app = create_test_app(echo_lookup()).await;

        for payload in [
            r#"["gmail.com"]"#,
            r#"{"domains": "gmail.com"}"#,
            r#"{"domains": [42]}"#,
            "domains=gmail.com",
        ] {
            let req = test::TestRequest::post()
                .uri("/")
                .set_payload(payload)
                .to_request();

            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {payload}");
        }
    }

    #[actix_web::test]
    async fn test_missing_content_type_is_accepted() {
        let app = create_test_app(echo_lookup()).await;
        let req = test::TestRequest::post()
            .uri("/")
            .set_payload(r#"{"domains": ["example.com"]}"#)
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[actix_web::test]
    async fn test_duplicate_domains_each_get_a_result() {
        let app = create_test_app(echo_lookup()).await;
        let req = test::TestRequest::post()
            .uri("/")
            .set_json(json!({ "domains": ["dup.com", "dup.com", "dup.com", ""] }))
            .to_request();

        let report: ValidationReport = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report.results.len(), 4);
        assert_eq!(
            report.results.iter().filter(|r| r.domain == "dup.com").count(),
            3
        );
        assert!(report.results.iter().all(|r| r.valid));
    }

    #[actix_web::test]
    async fn test_large_batch_preserves_length() {
        let app = create_test_app(echo_lookup()).await;
        let domains: Vec<String> = (0..200).map(|i| format!("d{i}.example")).collect();
        let req = test::TestRequest::post()
            .uri("/")
            .set_json(json!({ "domains": domains }))
            .to_request();

        let report: ValidationReport = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report.results.len(), 200);
    }

    #[actix_web::test]
    async fn test_nxdomain_is_unresolvable() {
        let app = create_test_app(resolver_lookup()).await;
        let req = test::TestRequest::post()
            .uri("/")
            .set_json(json!({ "domains": ["nxdomain-test-zzz.invalid"] }))
            .to_request();

        let report: ValidationReport = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report.results.len(), 1);

        let result = &report.results[0];
        assert_eq!(result.domain, "nxdomain-test-zzz.invalid");
        assert!(!result.valid);
        assert_eq!(result.status, Verdict::Unresolvable);
        assert!(result.any_mx.is_empty());
    }

    #[actix_web::test]
    #[ignore = "requires live DNS"]
    async fn test_gmail_has_valid_mx() {
        let app = create_test_app(resolver_lookup()).await;
        let req = test::TestRequest::post()
            .uri("/")
            .set_json(json!({ "domains": ["gmail.com"] }))
            .to_request();

        let report: ValidationReport = test::call_and_read_body_json(&app, req).await;
        let result = &report.results[0];
        assert_eq!(result.domain, "gmail.com");
        assert!(result.valid);
        assert_eq!(result.status, Verdict::ValidMx);
        assert!(result.any_mx.contains("gmail-smtp-in"), "got {}", result.any_mx);
    }

    #[actix_web::test]
    #[ignore = "requires live DNS"]
    async fn test_repeated_validation_is_stable() {
        let app = create_test_app(resolver_lookup()).await;
        let mut statuses = Vec::new();

        for _ in 0..3 {
            let req = test::TestRequest::post()
                .uri("/")
                .set_json(json!({ "domains": ["gmail.com"] }))
                .to_request();
            let report: ValidationReport = test::call_and_read_body_json(&app, req).await;
            statuses.push(report.results[0].status);
        }

        assert!(statuses.iter().all(|s| *s == statuses[0]));
    }
}
