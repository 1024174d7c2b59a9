use anyhow::Context as _;
use bytes::Bytes;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};

use crate::errors::ApiError;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Clone)]
pub struct GithubClient {
    token: SecretString,
    client: Client,
    pub(crate) api_url: String,
}

impl GithubClient {
    pub fn new(token: SecretString, api_url: String) -> Self {
        GithubClient {
            client: Client::new(),
            token,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub(crate) async fn send_req(&self, req: RequestBuilder) -> anyhow::Result<(Bytes, String)> {
        let req = req.build().context("failed to build request")?;
        let req_dbg = format!("{} {}", req.method(), req.url());
        tracing::debug!("send_req {req_dbg}");

        let resp = self.client.execute(req).await?;
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .with_context(|| format!("failed to read response body {req_dbg}"))?;
        tracing::trace!("{req_dbg} -> {status}");
        if !status.is_success() {
            return Err(ApiError::from_response(status, &body).into());
        }

        Ok((body, req_dbg))
    }

    pub async fn json<T>(&self, req: RequestBuilder) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let (body, req_dbg) = self.send_req(req).await?;
        let mut deserializer = serde_json::Deserializer::from_slice(&body);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
            let ctx = format!("failed to decode response of {req_dbg} at {}", e.path());
            anyhow::Error::new(e.into_inner()).context(ctx)
        })
    }

    pub(crate) fn patch(&self, url: &str) -> RequestBuilder {
        tracing::trace!("patch {:?}", url);
        self.client.patch(url).configure(self)
    }

    pub(crate) fn post(&self, url: &str) -> RequestBuilder {
        tracing::trace!("post {:?}", url);
        self.client.post(url).configure(self)
    }
}

trait RequestSend: Sized {
    fn configure(self, g: &GithubClient) -> Self;
}

impl RequestSend for RequestBuilder {
    fn configure(self, g: &GithubClient) -> RequestBuilder {
        let auth = format!("token {}", g.token.expose_secret());
        let req = self
            .header(USER_AGENT, "close-issue")
            .header(ACCEPT, "application/vnd.github+json");
        match HeaderValue::from_str(&auth) {
            Ok(mut auth) => {
                auth.set_sensitive(true);
                req.header(AUTHORIZATION, auth)
            }
            // Surfaces as a builder error in `send_req`.
            Err(_) => req.header(AUTHORIZATION, auth),
        }
    }
}
