//! Server configuration from command line and environment.

use clap::Parser;
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Clone, Parser)]
#[clap(author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[clap(long, env = "MIXER_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[clap(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Log filter used when RUST_LOG is not set
    #[clap(long, env = "MIXER_LOG", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Effective tracing filter directive.
    pub fn log_filter(&self) -> String {
        crate::env::get_env("RUST_LOG", &self.log_level)
    }
}
