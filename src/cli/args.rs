// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the resolvent CLI structure and its render, resolve and sha256 subcommands

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resolvent")]
#[command(about = "Resolve Handlebars expressions in templates, documents and files")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template file to stdout
    Render {
        #[arg(help = "Path to the template file")]
        template: PathBuf,

        #[arg(long, help = "YAML or JSON file with context variables")]
        context: Option<PathBuf>,

        #[arg(
            short = 'V',
            long = "var",
            help = "Override template variables (key=value)"
        )]
        vars: Vec<String>,
    },

    /// Resolve every expression in a YAML or JSON document
    Resolve {
        #[arg(help = "Path to the YAML or JSON document")]
        input: PathBuf,

        #[arg(long, help = "YAML or JSON file with context variables")]
        context: Option<PathBuf>,

        #[arg(
            short = 'V',
            long = "var",
            help = "Override template variables (key=value)"
        )]
        vars: Vec<String>,

        #[arg(short, long, help = "Write the resolved document to this file")]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = DocumentFormat::Yaml)]
        format: DocumentFormat,
    },

    /// Print the SHA-256 digest of a file
    Sha256 {
        #[arg(help = "Path to the file to hash")]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from key=value format, in command line order
    pub fn parse_variables(vars: &[String]) -> anyhow::Result<Vec<(String, String)>> {
        vars.iter()
            .map(|var| {
                var.split_once('=')
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .ok_or_else(|| {
                        anyhow::anyhow!("Invalid variable format '{}'. Expected 'key=value'", var)
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variables() {
        let vars = vec![
            "env=production".to_string(),
            "query=a=b".to_string(),
            "empty=".to_string(),
        ];

        let parsed = Args::parse_variables(&vars).unwrap();

        assert_eq!(
            parsed,
            vec![
                ("env".to_string(), "production".to_string()),
                ("query".to_string(), "a=b".to_string()),
                ("empty".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_parse_variables_invalid() {
        let vars = vec!["invalid_format".to_string()];
        let err = Args::parse_variables(&vars).unwrap_err();
        assert!(err.to_string().contains("invalid_format"));
    }

    #[test]
    fn test_resolve_command_defaults_to_yaml() {
        let args = Args::try_parse_from(["resolvent", "resolve", "in.yaml"]).unwrap();
        match args.command {
            Commands::Resolve { format, output, .. } => {
                assert_eq!(format, DocumentFormat::Yaml);
                assert!(output.is_none());
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "resolvent", "render", "t.hbs", "-V", "a=1", "--var", "b=2", "--verbose",
        ])
        .unwrap();
        assert!(args.verbose);
        match args.command {
            Commands::Render { vars, .. } => assert_eq!(vars, vec!["a=1", "b=2"]),
            _ => panic!("expected render"),
        }
    }
}
