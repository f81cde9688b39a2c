use crate::model::{ProbeConfig, TargetSpec};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Send a raw TLS record edge case to host:443 and dump the first reply",
    long_about = None
)]
pub struct Cli {
    /// Target host, connected to on port 443
    #[arg(value_name = "HOST", default_value = "")]
    pub host: String,

    /// Payload selector (valid, 3B, empty, 1B, notClientHello, max, overflow)
    #[arg(value_name = "SELECTOR")]
    pub selector: Option<String>,
}

impl Cli {
    pub fn into_config(self) -> anyhow::Result<ProbeConfig> {
        let Some(selector) = self.selector else {
            anyhow::bail!("missing payload selector");
        };

        Ok(ProbeConfig {
            target: TargetSpec::tls(self.host),
            selector,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positionals() {
        let cli = Cli::try_parse_from(["clienthello-probe", "example.com", "max"]).unwrap();
        let cfg = cli.into_config().unwrap();
        assert_eq!(cfg.target.host, "example.com");
        assert_eq!(cfg.target.port, 443);
        assert_eq!(cfg.selector, "max");
    }

    #[test]
    fn missing_selector_is_usage_error() {
        let cli = Cli::try_parse_from(["clienthello-probe", "example.com"]).unwrap();
        assert!(cli.into_config().is_err());
    }

    #[test]
    fn host_defaults_to_empty() {
        let cli = Cli::try_parse_from(["clienthello-probe"]).unwrap();
        assert_eq!(cli.host, "");
        assert!(cli.selector.is_none());
    }

    #[test]
    fn unknown_selector_passes_parsing() {
        let cli = Cli::try_parse_from(["clienthello-probe", "h", "bogus"]).unwrap();
        assert_eq!(cli.into_config().unwrap().selector, "bogus");
    }
}
