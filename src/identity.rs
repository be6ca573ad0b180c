//! Client identity announced to the viewer after every connection.

use crate::codec::{EncodingError, LogMessage};

/// Source of the fields carried by the client-info message.
///
/// Queried once per successful connection; implementations need no caching.
pub trait IdentityProvider: Send {
    fn framework_version(&self) -> String;
    fn process_id(&self) -> u32;
    fn os_name(&self) -> String;
    fn os_arch(&self) -> String;
}

/// Identity of the running process and host.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemIdentity;

impl IdentityProvider for SystemIdentity {
    fn framework_version(&self) -> String {
        format!("femtoviewer {}", env!("CARGO_PKG_VERSION"))
    }

    fn process_id(&self) -> u32 {
        std::process::id()
    }

    fn os_name(&self) -> String {
        std::env::consts::OS.to_owned()
    }

    fn os_arch(&self) -> String {
        std::env::consts::ARCH.to_owned()
    }
}

/// Fixed identity, handy for tests and embedded hosts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticIdentity {
    pub framework_version: String,
    pub process_id: u32,
    pub os_name: String,
    pub os_arch: String,
}

impl IdentityProvider for StaticIdentity {
    fn framework_version(&self) -> String {
        self.framework_version.clone()
    }

    fn process_id(&self) -> u32 {
        self.process_id
    }

    fn os_name(&self) -> String {
        self.os_name.clone()
    }

    fn os_arch(&self) -> String {
        self.os_arch.clone()
    }
}

/// Build the client-info message for `provider` at `now_millis`.
///
/// ClientVersion carries the framework version, ClientName is `pid<id>` and
/// OSName is `<os>_<arch>`.
pub fn identity_message(
    provider: &dyn IdentityProvider,
    now_millis: u64,
) -> Result<LogMessage, EncodingError> {
    LogMessage::client_info(
        now_millis,
        &provider.framework_version(),
        &format!("pid{}", provider.process_id()),
        &format!("{}_{}", provider.os_name(), provider.os_arch()),
    )
}
