use quotation_service::config::QuotationConfig;
use quotation_service::startup::Application;
use rust_decimal::Decimal;
use serde_json::Value;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let config = QuotationConfig::for_tests();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Money fields serialize as strings; compare them numerically.
pub fn money(value: &Value) -> Decimal {
    match value {
        Value::String(s) => s.parse().expect("money field is not a decimal string"),
        Value::Number(n) => n.to_string().parse().expect("money field is not a decimal"),
        other => panic!("unexpected money value: {other}"),
    }
}

pub fn dec(s: &str) -> Decimal {
    s.parse().expect("invalid decimal literal")
}
