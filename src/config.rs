use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves settings through `lookup`, falling back to defaults for
    /// anything missing or unparsable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("APP_DATA_DIR")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let host = lookup("HOST")
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            data_dir,
            addr: SocketAddr::new(host, port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.addr, SocketAddr::from(([127, 0, 0, 1], 8080)));
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("APP_DATA_DIR", "/tmp/vitalife"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9001"),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/vitalife"));
        assert_eq!(config.addr, SocketAddr::from(([0, 0, 0, 0], 9001)));
    }

    #[test]
    fn ignores_unparsable_values() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "eighty"), ("HOST", "nowhere")]));
        assert_eq!(config.addr, SocketAddr::from(([127, 0, 0, 1], 8080)));
    }
}
