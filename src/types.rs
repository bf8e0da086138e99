use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by the object-safe traits in this crate.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Which plugin role an executable is configured for.
///
/// The authenticator and the installer hold independent option pairs, so
/// errors and log lines always say which one they are about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Authenticator,
    Installer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Authenticator => "authenticator",
            Role::Installer => "installer",
        }
    }

    /// CLI flag that sets the executable path for this role.
    pub fn exec_flag(self) -> &'static str {
        match self {
            Role::Authenticator => "--external-auth-exec",
            Role::Installer => "--external-install-exec",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
