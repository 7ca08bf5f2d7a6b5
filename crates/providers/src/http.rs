//! `reqwest`-backed implementation of the fetch port

use async_trait::async_trait;
use realty_ports::{FetchRequest, FetchResponse, HttpFetcher, HttpMethod, TransportFailure};
use reqwest::{Client, Method};

const USER_AGENT: &str = concat!("realty-gateway/", env!("CARGO_PKG_VERSION"));

/// HTTP client shared by every provider.
///
/// Per-call timeouts come from the request; the client itself has none.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(ReqwestFetcher { client })
    }

    pub fn with_client(client: Client) -> Self {
        ReqwestFetcher { client }
    }
}

fn classify(err: reqwest::Error) -> TransportFailure {
    if err.is_timeout() {
        TransportFailure::Timeout(err.to_string())
    } else if err.is_connect() {
        TransportFailure::Connect(err.to_string())
    } else {
        TransportFailure::Request(err.to_string())
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, TransportFailure> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        Ok(FetchResponse { status, body })
    }
}
