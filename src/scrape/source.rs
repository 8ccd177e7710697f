use crate::error::HomepageError;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Where the csr listing page comes from.
pub trait ListingSource: Send + Sync {
    /// Address of the listing page; relative links resolve against it.
    fn page_url(&self) -> &Url;

    fn fetch_page(&self) -> impl Future<Output = Result<String, HomepageError>> + Send;
}

/// Fetches the listing over HTTP(S).
#[derive(Clone)]
pub struct HttpListingSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpListingSource {
    pub fn new(url: Url, proxy: Option<&Url>) -> Result<Self, HomepageError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("kpii-homepage/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15));
        if let Some(proxy_url) = proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }
        let client = builder.build()?;
        Ok(Self { client, url })
    }
}

impl ListingSource for HttpListingSource {
    fn page_url(&self) -> &Url {
        &self.url
    }

    async fn fetch_page(&self) -> Result<String, HomepageError> {
        info!(url = %self.url, "fetching csr listing");
        let body = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(bytes = body.len(), "csr listing fetched");
        Ok(body)
    }
}
