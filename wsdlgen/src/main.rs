//! `wsdlgen` command-line interface.
//!
//! Prints the generated Rust code for a WSDL document to standard output.
//! Logs go to standard error and are controlled with `RUST_LOG`.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use wsdlgen::{Credentials, GeneratorConfig, generate, locate};

/// Generate Rust service interfaces from a WSDL document.
#[derive(Debug, Parser)]
#[command(name = "wsdlgen", version, about)]
struct Cli {
    /// Local path or URL of the WSDL document.
    source: Option<String>,

    /// User name for HTTP basic authentication.
    username: Option<String>,

    /// Password for HTTP basic authentication.
    password: Option<String>,

    /// Keep wrapper types of document/literal wrapped operations.
    #[arg(long)]
    keep_wrappers: bool,

    /// Additional namespace whose types are not generated (repeatable).
    #[arg(long = "standard-namespace", value_name = "NS")]
    standard_namespaces: Vec<String>,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        self.standard_namespaces.iter().fold(
            GeneratorConfig::default().with_remove_input_output_messages(!self.keep_wrappers),
            |config, namespace| config.with_standard_namespace(namespace.clone()),
        )
    }

    fn credentials(&self) -> Option<Credentials> {
        self.username
            .as_ref()
            .map(|username| Credentials::new(username.clone(), self.password.clone()))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(source) = cli.source.as_deref() else {
        println!("{}", Cli::command().render_usage());
        println!("The output will be printed to the console");
        return Ok(());
    };

    let url = locate(source).with_context(|| format!("Failed to locate {source}"))?;
    tracing::info!("Generating from {}", url);
    let code = generate(&url, cli.credentials().as_ref(), cli.config())
        .with_context(|| format!("Failed to generate code from {url}"))?;
    print!("{code}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_arguments() {
        let cli = Cli::try_parse_from(["wsdlgen"]).expect("parse");
        assert!(cli.source.is_none());
        assert!(cli.credentials().is_none());
        assert!(cli.config().remove_input_output_messages);
    }

    #[test]
    fn test_cli_positional_credentials() {
        let cli = Cli::try_parse_from(["wsdlgen", "https://example.com/s?wsdl", "alice", "secret"])
            .expect("parse");
        assert_eq!(cli.source.as_deref(), Some("https://example.com/s?wsdl"));
        assert_eq!(
            cli.credentials(),
            Some(Credentials::new("alice", Some("secret".to_string())))
        );
    }

    #[test]
    fn test_cli_username_without_password() {
        let cli = Cli::try_parse_from(["wsdlgen", "svc.wsdl", "bob"]).expect("parse");
        assert_eq!(cli.credentials(), Some(Credentials::new("bob", None)));
    }

    #[test]
    fn test_cli_flags_build_config() {
        let cli = Cli::try_parse_from([
            "wsdlgen",
            "svc.wsdl",
            "--keep-wrappers",
            "--standard-namespace",
            "urn:common",
            "--standard-namespace",
            "urn:shared",
        ])
        .expect("parse");

        let config = cli.config();
        assert!(!config.remove_input_output_messages);
        assert!(config.is_standard("urn:common"));
        assert!(config.is_standard("urn:shared"));
        assert!(config.is_standard("http://www.w3.org/2001/XMLSchema"));
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
