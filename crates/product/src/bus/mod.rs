use crate::handler::{ProductCommandHandler, ProductQueryHandler};
use serde_json::Value;
use shared::errors::ErrorBody;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

pub type BusReply = Result<Value, ErrorBody>;

/// One request/reply exchange as handed over by the bus transport.
pub struct BusRequest {
    pub subject: String,
    pub payload: Value,
    pub respond_to: oneshot::Sender<BusReply>,
}

/// Maps bus subjects onto the product handlers. The transport that feeds
/// it is an external collaborator; anything that can produce a subject
/// and a JSON payload can drive this.
#[derive(Clone)]
pub struct Router {
    query: ProductQueryHandler,
    command: ProductCommandHandler,
}

impl Router {
    pub fn new(query: ProductQueryHandler, command: ProductCommandHandler) -> Self {
        Self { query, command }
    }

    pub async fn dispatch(&self, subject: &str, payload: Value) -> BusReply {
        match subject {
            "create_product" => self.command.create(payload).await,
            "find_all_products" => self.query.find_all(payload).await,
            "find_one_product" => self.query.find_one(payload).await,
            "update_product" => self.command.update(payload).await,
            "remove_product" => self.command.remove(payload).await,
            "validate_products" => self.query.validate_products(payload).await,
            other => {
                warn!("Unknown subject on bus: {}", other);
                Err(ErrorBody::new(format!("Unknown subject: {other}"), 404))
            }
        }
    }
}

/// Caller-side handle: send a subject and payload, await the reply.
#[derive(Clone)]
pub struct BusHandle {
    sender: mpsc::Sender<BusRequest>,
}

impl BusHandle {
    pub async fn request(&self, subject: &str, payload: Value) -> BusReply {
        let (respond_to, response) = oneshot::channel();

        self.sender
            .send(BusRequest {
                subject: subject.to_string(),
                payload,
                respond_to,
            })
            .await
            .map_err(|_| ErrorBody::new("Bus connection closed", 500))?;

        response
            .await
            .map_err(|_| ErrorBody::new("Reply channel dropped", 500))?
    }
}

/// In-process request/reply loop. Runs until every handle is dropped,
/// which is the drain signal at shutdown.
pub struct BusServer {
    receiver: mpsc::Receiver<BusRequest>,
    router: Router,
}

impl BusServer {
    pub fn new(router: Router, capacity: usize) -> (BusHandle, BusServer) {
        let (sender, receiver) = mpsc::channel(capacity);
        (BusHandle { sender }, BusServer { receiver, router })
    }

    pub async fn run(mut self) {
        info!("📡 Bus server ready");

        while let Some(request) = self.receiver.recv().await {
            let router = self.router.clone();
            tokio::spawn(async move {
                let reply = router.dispatch(&request.subject, request.payload).await;
                if request.respond_to.send(reply).is_err() {
                    warn!("Caller went away before reply: {}", request.subject);
                }
            });
        }

        info!("📡 Bus server drained, stopping");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        handler::{ProductCommandHandler, ProductQueryHandler},
        service::{
            command::ProductCommandService, mocks::MemoryProductRepository,
            query::ProductQueryService,
        },
    };
    use serde_json::json;
    use std::sync::Arc;

    fn router_with(repo: &MemoryProductRepository) -> Router {
        let query_service = Arc::new(ProductQueryService::new(Arc::new(repo.clone())));
        let command_service = Arc::new(ProductCommandService::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
        ));
        Router::new(
            ProductQueryHandler::new(query_service),
            ProductCommandHandler::new(command_service),
        )
    }

    #[tokio::test]
    async fn dispatch_create_returns_success_envelope() {
        let repo = MemoryProductRepository::new();
        let router = router_with(&repo);

        let reply = router
            .dispatch("create_product", json!({"name": "Widget", "price": 9.99}))
            .await
            .unwrap();

        assert_eq!(reply["status"], "success");
        assert_eq!(reply["data"]["name"], "Widget");
        assert_eq!(reply["data"]["available"], true);
        assert!(reply["data"]["id"].as_i64().is_some());
    }

    #[tokio::test]
    async fn dispatch_find_all_reports_meta() {
        let repo = MemoryProductRepository::new();
        for i in 0..3 {
            repo.insert(&format!("p{i}"), 1.0, true);
        }
        let router = router_with(&repo);

        let reply = router
            .dispatch("find_all_products", json!({"page": 1, "limit": 2}))
            .await
            .unwrap();

        assert_eq!(reply["data"].as_array().unwrap().len(), 2);
        assert_eq!(reply["meta"]["page"], 1);
        assert_eq!(reply["meta"]["total"], 3);
        assert_eq!(reply["meta"]["lastPage"], 2);
    }

    #[tokio::test]
    async fn dispatch_find_one_missing_yields_status_400_body() {
        let repo = MemoryProductRepository::new();
        let router = router_with(&repo);

        let err = router
            .dispatch("find_one_product", json!({"id": 42}))
            .await
            .unwrap_err();

        assert_eq!(err.status, 400);
        assert_eq!(err.message, "Product with id #42 not found");
    }

    #[tokio::test]
    async fn dispatch_validate_products_takes_bare_id_array() {
        let repo = MemoryProductRepository::new();
        let a = repo.insert("a", 1.0, true);
        let router = router_with(&repo);

        let reply = router
            .dispatch("validate_products", json!([a, a]))
            .await
            .unwrap();
        assert_eq!(reply["data"].as_array().unwrap().len(), 1);

        let err = router
            .dispatch("validate_products", json!([a, 999]))
            .await
            .unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err.message.contains("999"));
    }

    #[tokio::test]
    async fn dispatch_unknown_subject_is_rejected() {
        let repo = MemoryProductRepository::new();
        let router = router_with(&repo);

        let err = router.dispatch("drop_table", json!({})).await.unwrap_err();
        assert_eq!(err.status, 404);
    }

    #[tokio::test]
    async fn dispatch_rejects_malformed_payload() {
        let repo = MemoryProductRepository::new();
        let router = router_with(&repo);

        let err = router
            .dispatch("create_product", json!({"name": "Widget"}))
            .await
            .unwrap_err();
        assert_eq!(err.status, 400);
    }

    #[tokio::test]
    async fn server_round_trip_and_drain() {
        let repo = MemoryProductRepository::new();
        let (handle, server) = BusServer::new(router_with(&repo), 8);
        let server_task = tokio::spawn(server.run());

        let reply = handle
            .request("create_product", json!({"name": "Widget", "price": 1.0}))
            .await
            .unwrap();
        let id = reply["data"]["id"].as_i64().unwrap();

        let fetched = handle
            .request("find_one_product", json!({"id": id}))
            .await
            .unwrap();
        assert_eq!(fetched["data"]["name"], "Widget");

        // dropping the last handle drains the server loop
        drop(handle);
        server_task.await.unwrap();
    }

    #[test]
    fn error_body_wire_shape() {
        let body = ErrorBody::new("Product with id #7 not found", 400);
        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(
            encoded,
            json!({"message": "Product with id #7 not found", "status": 400})
        );
    }
}
