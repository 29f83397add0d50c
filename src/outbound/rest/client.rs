use crate::domain::session::Bearer;
use crate::outbound::rest::error::Error;
use crate::outbound::rest::models::{Envelope, ErrorBody};
use http::Method;
use http::header::ACCEPT;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct RestClient {
    http_client: reqwest::Client,
    base_url: Url,
}

pub struct NewRestClientParams {
    pub base_url: String,
    pub timeout: Duration,
}

impl RestClient {
    pub fn new(params: NewRestClientParams) -> Result<Self, Error> {
        let mut base_url = Url::parse(&params.base_url)?;
        // relative joins would otherwise replace the last path segment
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        tracing::debug!(base_url = base_url.as_str(), "creating backend client");
        let http_client = reqwest::ClientBuilder::new()
            .timeout(params.timeout)
            .user_agent(concat!("taskdeck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Endpoint whose last segment is arbitrary text, percent-encoded.
    pub(crate) fn endpoint_with(&self, path: &str, segment: &str) -> Result<Url, Error> {
        let mut url = self.endpoint(path)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(segment);

        Ok(url)
    }

    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&Bearer>,
    ) -> Result<RequestBuilder, Error> {
        let url = self.endpoint(path)?;

        Ok(self.request_url(method, url, bearer))
    }

    pub(crate) fn request_url(
        &self,
        method: Method,
        url: Url,
        bearer: Option<&Bearer>,
    ) -> RequestBuilder {
        tracing::debug!(%method, path = url.path(), "backend request");

        let request = self
            .http_client
            .request(method, url)
            .header(ACCEPT, "application/json");

        match bearer {
            Some(bearer) => request.bearer_auth(bearer.as_str()),
            None => request,
        }
    }

    /// Sends the request and decodes a (possibly `data`-wrapped) JSON body.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, Error> {
        let response = Self::check(request.send().await?).await?;
        let body = response.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body)?;

        Ok(envelope.into_inner())
    }

    /// Sends the request, ignoring whatever body comes back.
    pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<(), Error> {
        Self::check(request.send().await?).await?;

        Ok(())
    }

    async fn check(response: Response) -> Result<Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::into_message);
        tracing::debug!(
            status = status.as_u16(),
            reason = message.as_deref(),
            "backend refused request"
        );

        Err(Error::from_status(status.as_u16(), message))
    }
}
