use ureq::Agent;

use crate::{error::Error, util::default_ureq_agent};

/// Issues a single GET and returns the response body.
pub trait Transport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, Error> {
        (**self).get(url, query)
    }
}

pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(proxy_url: Option<&str>) -> Self {
        Self::with_agent(default_ureq_agent(proxy_url))
    }

    pub fn with_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, Error> {
        let mut request = self.agent.get(url);
        for (name, value) in query {
            request = request.query(*name, value);
        }
        let mut response = request
            .call()
            .map_err(|err| Error::NetworkError(err.to_string()))?;
        response
            .body_mut()
            .read_to_string()
            .map_err(|err| Error::NetworkError(err.to_string()))
    }
}
