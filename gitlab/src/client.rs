use crate::transport::{ReqwestTransport, Transport};
use crate::{Config, Result};
use std::fmt;
use std::sync::Arc;

/// Handle passed to every endpoint function.
///
/// Cloning is cheap: configuration and transport are shared.
#[derive(Clone)]
pub struct Client {
    config: Arc<Config>,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Creates a client that talks HTTP through `reqwest`.
    pub fn new(config: Config) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Client::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Client {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish()
    }
}
