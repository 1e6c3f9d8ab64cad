use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Ftp,
    Ftps,
    Sftp,
}

impl Protocol {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Protocol::Ftp => "FTP",
            Protocol::Ftps => "FTPS",
            Protocol::Sftp => "SFTP",
        }
    }

    #[must_use]
    pub fn default_port(&self) -> u16 {
        match self {
            Protocol::Ftp => 21,
            Protocol::Ftps => 990,
            Protocol::Sftp => 22,
        }
    }

    #[must_use]
    pub fn next(&self) -> Protocol {
        match self {
            Protocol::Ftp => Protocol::Ftps,
            Protocol::Ftps => Protocol::Sftp,
            Protocol::Sftp => Protocol::Ftp,
        }
    }
}

/// A saved connection profile. Credentials are handled by an external
/// store keyed off the profile id and never appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteProfile {
    pub id: String,
    pub name: String,
    pub protocol: Protocol,
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default = "default_remote_path")]
    pub default_remote_path: String,
    #[serde(default)]
    pub default_local_path: String,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

fn default_remote_path() -> String {
    "/".to_string()
}

impl SiteProfile {
    #[must_use]
    pub fn address(&self) -> String {
        format!(
            "{}://{}:{}",
            self.protocol.label().to_lowercase(),
            self.host,
            self.port
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ports_follow_protocol() {
        assert_eq!(Protocol::Ftp.default_port(), 21);
        assert_eq!(Protocol::Ftps.default_port(), 990);
        assert_eq!(Protocol::Sftp.default_port(), 22);
    }

    #[test]
    fn protocol_cycle_wraps() {
        assert_eq!(Protocol::Sftp.next(), Protocol::Ftp);
    }
}
