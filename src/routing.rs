//! Application router configuration with session-scoped and open route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    AppState,
    endpoints,
    error::ErrorBody,
    session::session_guard,
    stores::TransactionStore,
    transaction::{
        create_transaction_endpoint, get_summary_endpoint, get_transaction_endpoint,
        list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Reading transactions requires a session cookie. Creating a transaction does
/// not, and starts a new session when the cookie is missing.
pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let session_routes = Router::new()
        .route(endpoints::TRANSACTIONS, get(list_transactions_endpoint::<T>))
        .route(endpoints::SUMMARY, get(get_summary_endpoint::<T>))
        .route(endpoints::TRANSACTION, get(get_transaction_endpoint::<T>))
        .route_layer(middleware::from_fn(session_guard));

    let open_routes = Router::new().route(
        endpoints::TRANSACTIONS,
        post(create_transaction_endpoint::<T>),
    );

    session_routes
        .merge(open_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found.".to_owned(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod routing_tests {
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use axum_extra::extract::cookie::Cookie;
    use axum_test::{TestResponse, TestServer};
    use rusqlite::Connection;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use crate::{
        AppState,
        endpoints::{self, format_endpoint},
        initialize_db,
        session::COOKIE_SESSION_ID,
        stores::{InMemoryTransactionStore, SQLiteTransactionStore, TransactionStore},
        transaction::{SummaryResponse, TransactionResponse, TransactionsResponse},
    };

    use super::build_router;

    fn get_test_server_with_store<T>(store: T) -> TestServer
    where
        T: TransactionStore + Clone + Send + Sync + 'static,
    {
        let app = build_router(AppState::new(store));

        TestServer::new(app).expect("Could not create test server.")
    }

    fn get_test_server() -> TestServer {
        let conn = Connection::open_in_memory().unwrap();
        initialize_db(&conn).unwrap();

        get_test_server_with_store(SQLiteTransactionStore::new(Arc::new(Mutex::new(conn))))
    }

    async fn post_transaction(
        server: &TestServer,
        session_cookie: Option<&Cookie<'static>>,
        body: Value,
    ) -> TestResponse {
        let request = server.post(endpoints::TRANSACTIONS).json(&body);

        match session_cookie {
            Some(cookie) => request.add_cookie(cookie.clone()).await,
            None => request.await,
        }
    }

    async fn get_summary(server: &TestServer, session_cookie: &Cookie<'static>) -> f64 {
        server
            .get(endpoints::SUMMARY)
            .add_cookie(session_cookie.clone())
            .await
            .json::<SummaryResponse>()
            .summary
            .amount
    }

    #[tokio::test]
    async fn create_without_cookie_starts_session() {
        let server = get_test_server();

        let response = post_transaction(
            &server,
            None,
            json!({ "title": "Salary", "amaunt": 5000, "type": "credit" }),
        )
        .await;

        response.assert_status(StatusCode::CREATED);
        assert!(response.as_bytes().is_empty());
        let cookie = response.cookie(COOKIE_SESSION_ID);
        assert!(Uuid::parse_str(cookie.value()).is_ok());
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604_800)));

        let transactions = server
            .get(endpoints::TRANSACTIONS)
            .add_cookie(cookie.clone())
            .await
            .json::<TransactionsResponse>()
            .transactions;
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].title, "Salary");
        assert_eq!(transactions[0].amount, 5000.0);
        assert_eq!(transactions[0].session_id.as_str(), cookie.value());
    }

    #[tokio::test]
    async fn create_with_cookie_does_not_issue_new_cookie() {
        let server = get_test_server();
        let cookie = Cookie::new(COOKIE_SESSION_ID, "existing-session");

        let response = post_transaction(
            &server,
            Some(&cookie),
            json!({ "title": "Rent", "amaunt": 1200, "type": "debit" }),
        )
        .await;

        response.assert_status(StatusCode::CREATED);
        assert!(response.maybe_cookie(COOKIE_SESSION_ID).is_none());
        assert_eq!(get_summary(&server, &cookie).await, -1200.0);
    }

    #[tokio::test]
    async fn summary_follows_credits_and_debits() {
        let server = get_test_server();

        let response = post_transaction(
            &server,
            None,
            json!({ "title": "Salary", "amaunt": 5000, "type": "credit" }),
        )
        .await;
        let cookie = response.cookie(COOKIE_SESSION_ID);
        let response = server
            .get(endpoints::SUMMARY)
            .add_cookie(cookie.clone())
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "summary": { "amount": 5000.0 } }));

        post_transaction(
            &server,
            Some(&cookie),
            json!({ "title": "Rent", "amaunt": 1200, "type": "debit" }),
        )
        .await
        .assert_status(StatusCode::CREATED);

        assert_eq!(get_summary(&server, &cookie).await, 3800.0);
    }

    #[tokio::test]
    async fn summary_of_new_session_is_zero() {
        let server = get_test_server();

        let response = server
            .get(endpoints::SUMMARY)
            .add_cookie(Cookie::new(COOKIE_SESSION_ID, "never-used"))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "summary": { "amount": 0.0 } }));
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let server = get_test_server();
        let alice = Cookie::new(COOKIE_SESSION_ID, "alice");
        let bob = Cookie::new(COOKIE_SESSION_ID, "bob");
        post_transaction(
            &server,
            Some(&alice),
            json!({ "title": "Alice's salary", "amaunt": 100, "type": "credit" }),
        )
        .await
        .assert_status(StatusCode::CREATED);
        post_transaction(
            &server,
            Some(&bob),
            json!({ "title": "Bob's rent", "amaunt": 40, "type": "debit" }),
        )
        .await
        .assert_status(StatusCode::CREATED);

        let bobs_transactions = server
            .get(endpoints::TRANSACTIONS)
            .add_cookie(bob.clone())
            .await
            .json::<TransactionsResponse>()
            .transactions;
        assert_eq!(bobs_transactions.len(), 1);
        assert!(bobs_transactions.iter().all(|transaction| transaction.session_id.as_str() == "bob"));

        let alices_transactions = server
            .get(endpoints::TRANSACTIONS)
            .add_cookie(alice.clone())
            .await
            .json::<TransactionsResponse>()
            .transactions;
        let alices_id = alices_transactions[0].id;

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, alices_id))
            .add_cookie(bob.clone())
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "transaction": null }));

        assert_eq!(get_summary(&server, &bob).await, -40.0);
        assert_eq!(get_summary(&server, &alice).await, 100.0);
    }

    #[tokio::test]
    async fn get_own_transaction_by_id() {
        let server = get_test_server();
        let cookie = Cookie::new(COOKIE_SESSION_ID, "owner");
        post_transaction(
            &server,
            Some(&cookie),
            json!({ "title": "Coffee", "amaunt": 4.5, "type": "debit" }),
        )
        .await
        .assert_status(StatusCode::CREATED);
        let id = server
            .get(endpoints::TRANSACTIONS)
            .add_cookie(cookie.clone())
            .await
            .json::<TransactionsResponse>()
            .transactions[0]
            .id;

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, id))
            .add_cookie(cookie.clone())
            .await;

        response.assert_status_ok();
        let transaction = response
            .json::<TransactionResponse>()
            .transaction
            .expect("transaction should be returned");
        assert_eq!(transaction.id, id);
        assert_eq!(transaction.title, "Coffee");
        assert_eq!(transaction.amount, -4.5);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let server = get_test_server();

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, Uuid::new_v4()))
            .add_cookie(Cookie::new(COOKIE_SESSION_ID, "owner"))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "transaction": null }));
    }

    #[tokio::test]
    async fn get_malformed_id_is_bad_request() {
        let server = get_test_server();

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, "not-a-uuid"))
            .add_cookie(Cookie::new(COOKIE_SESSION_ID, "owner"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_non_hyphenated_id_is_bad_request() {
        let server = get_test_server();
        let id = Uuid::new_v4();

        for raw_id in [id.simple().to_string(), id.urn().to_string()] {
            let response = server
                .get(&format_endpoint(endpoints::TRANSACTION, &raw_id))
                .add_cookie(Cookie::new(COOKIE_SESSION_ID, "owner"))
                .await;

            response.assert_status(StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn overflowing_balance_is_rejected() {
        let server = get_test_server();
        let cookie = Cookie::new(COOKIE_SESSION_ID, "high-roller");
        let body = json!({ "title": "x", "amaunt": 1.7e308, "type": "credit" });

        post_transaction(&server, Some(&cookie), body.clone())
            .await
            .assert_status(StatusCode::CREATED);
        post_transaction(&server, Some(&cookie), body)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .get(endpoints::SUMMARY)
            .add_cookie(cookie.clone())
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "summary": { "amount": 1.7e308 } }));
    }

    #[tokio::test]
    async fn reads_require_session_cookie() {
        let server = get_test_server();

        for path in [
            endpoints::TRANSACTIONS.to_owned(),
            endpoints::SUMMARY.to_owned(),
            format_endpoint(endpoints::TRANSACTION, Uuid::new_v4()),
        ] {
            let response = server.get(&path).await;

            response.assert_status(StatusCode::UNAUTHORIZED);
            response.assert_json(&json!({ "error": "Unauthorized." }));
            assert!(
                response.maybe_cookie(COOKIE_SESSION_ID).is_none(),
                "GET {path} should not start a session"
            );
        }
    }

    #[tokio::test]
    async fn invalid_body_is_rejected_without_side_effects() {
        let server = get_test_server();

        for body in [
            json!({ "title": "Salary", "amaunt": "five", "type": "credit" }),
            json!({ "title": "Salary", "amaunt": 5, "type": "refund" }),
            json!({ "amaunt": 5, "type": "credit" }),
            json!({ "title": "", "amaunt": 5, "type": "credit" }),
            json!({ "title": "Salary", "amaunt": -5, "type": "credit" }),
        ] {
            let response = post_transaction(&server, None, body.clone()).await;

            response.assert_status(StatusCode::BAD_REQUEST);
            assert!(
                response.maybe_cookie(COOKIE_SESSION_ID).is_none(),
                "{body} should not start a session"
            );
        }

        let cookie = Cookie::new(COOKIE_SESSION_ID, "careful");
        post_transaction(
            &server,
            Some(&cookie),
            json!({ "title": "Salary", "amaunt": "five", "type": "credit" }),
        )
        .await
        .assert_status(StatusCode::BAD_REQUEST);
        let transactions = server
            .get(endpoints::TRANSACTIONS)
            .add_cookie(cookie.clone())
            .await
            .json::<TransactionsResponse>()
            .transactions;
        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn works_with_in_memory_store() {
        let server = get_test_server_with_store(InMemoryTransactionStore::new());

        let response = post_transaction(
            &server,
            None,
            json!({ "title": "Salary", "amount": 5000, "type": "credit" }),
        )
        .await;
        response.assert_status(StatusCode::CREATED);
        let cookie = response.cookie(COOKIE_SESSION_ID);

        assert_eq!(get_summary(&server, &cookie).await, 5000.0);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/does/not/exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "error": "Not found." }));
    }
}
