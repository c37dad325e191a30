//! DNS TXT lookups over hickory-resolver.

use std::net::SocketAddr;

use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfig, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::proto::rr::rdata::TXT;
use hickory_resolver::proto::xfer::Protocol;
use hickory_resolver::{ResolveError, TokioResolver};

use crate::domain::probes::{ProbeError, TxtResolver};

/// TXT resolver backed by a shared hickory [`TokioResolver`].
pub struct HickoryTxtResolver {
    resolver: TokioResolver,
}

impl HickoryTxtResolver {
    /// Creates a resolver from the system DNS configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the system configuration cannot be read.
    pub fn from_system() -> Result<Self, ResolveError> {
        let resolver = TokioResolver::builder_tokio()?.build();
        Ok(Self { resolver })
    }

    /// Creates a resolver that queries a single nameserver over UDP.
    pub fn with_nameserver(addr: SocketAddr) -> Self {
        let mut config = ResolverConfig::new();
        config.add_name_server(NameServerConfig::new(addr, Protocol::Udp));

        let resolver =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default()).build();
        Self { resolver }
    }
}

fn classify(name: &str, e: ResolveError) -> ProbeError {
    if e.is_nx_domain() {
        ProbeError::NxDomain(name.to_string())
    } else if e.is_no_records_found() {
        ProbeError::NoRecords(name.to_string())
    } else {
        ProbeError::Dns(e.to_string())
    }
}

/// Values a TXT record can match on.
///
/// A record with several character-strings yields their concatenation
/// followed by each string on its own.
fn txt_values(txt: &TXT) -> Vec<String> {
    let chunks = txt
        .txt_data()
        .iter()
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>();

    if chunks.len() <= 1 {
        return chunks;
    }

    let mut values = Vec::with_capacity(chunks.len() + 1);
    values.push(chunks.concat());
    values.extend(chunks);
    values
}

#[async_trait]
impl TxtResolver for HickoryTxtResolver {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, ProbeError> {
        // Trailing dot keeps search domains from being appended.
        let fqdn = if name.ends_with('.') {
            name.to_string()
        } else {
            format!("{name}.")
        };

        let lookup = self
            .resolver
            .lookup(fqdn.as_str(), RecordType::TXT)
            .await
            .map_err(|e| classify(name, e))?;

        let records = lookup
            .records()
            .iter()
            .filter_map(|record| record.data().as_txt())
            .flat_map(txt_values)
            .collect::<Vec<_>>();

        tracing::debug!(name, count = records.len(), "TXT lookup completed");

        Ok(records)
    }
}
