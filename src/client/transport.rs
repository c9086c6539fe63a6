use reqwest::blocking::Client;
use url::Url;

use super::{TransportError, ValidatorConfig};

/// Performs a blocking GET and hands back the raw response body.
///
/// The HTTP status is not interpreted: the provider reports failures inside
/// the JSON body.
pub trait HttpGet {
    fn get(&self, url: &Url) -> Result<Vec<u8>, TransportError>;
}

impl<T: HttpGet + ?Sized> HttpGet for &T {
    fn get(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        (**self).get(url)
    }
}

/// [`HttpGet`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ValidatorConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpGet for HttpTransport {
    fn get(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        let response = self.client.get(url.clone()).send()?;
        let body = response.bytes()?;
        Ok(body.to_vec())
    }
}
