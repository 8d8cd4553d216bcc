use crate::domain::passphrase::Passphrase;
use crate::error::{MailerError, Result};
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_PHOTOS: usize = 1000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Read-only settings the submission pipeline runs with.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub passphrase: Passphrase,
    /// Largest photo count a submission may declare.
    pub max_photos: usize,
}

impl PipelineConfig {
    /// Builds a config around `passphrase`, which must not be empty.
    pub fn new(passphrase: impl Into<String>) -> Result<Self> {
        let passphrase = Passphrase::new(passphrase);
        if passphrase.is_empty() {
            return Err(MailerError::Config(
                "passphrase must not be empty".to_string(),
            ));
        }
        Ok(Self {
            passphrase,
            max_photos: DEFAULT_MAX_PHOTOS,
        })
    }

    pub fn with_max_photos(mut self, max_photos: usize) -> Self {
        self.max_photos = max_photos;
        self
    }
}

/// Where and how the HTTP adapter listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
