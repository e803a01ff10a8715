// ABOUTME: Main application orchestration for the resolvent CLI
// ABOUTME: Coordinates CLI arguments, configuration, logging and command execution

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use super::commands;
use super::{Args, Commands, Config};

pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initialize logging based on configuration. Logs go to stderr so
    /// rendered output on stdout stays clean.
    pub fn init_logging(&self, verbose: bool, no_color: bool) -> Result<()> {
        let log_level = if verbose {
            "debug"
        } else {
            &self.config.logging.level
        };

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(!no_color)
            .with_target(false);

        let installed = match self.config.logging.format.as_str() {
            "compact" => builder.compact().try_init(),
            _ => builder.try_init(),
        };
        installed.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

        debug!("Logging initialized with level: {}", log_level);
        Ok(())
    }

    /// Run the application with parsed arguments
    pub fn run(&self, args: Args) -> Result<()> {
        self.init_logging(args.verbose, args.no_color)?;

        info!("Starting resolvent v{}", crate::VERSION);
        debug!("Configuration loaded from: {:?}", args.config);

        match args.command {
            Commands::Render {
                template,
                context,
                vars,
            } => {
                let rendered =
                    commands::render_template(&template, context.as_deref(), &vars, &self.config)?;
                commands::emit(&rendered, None)
            }

            Commands::Resolve {
                input,
                context,
                vars,
                output,
                format,
            } => {
                let resolved = commands::resolve_document(
                    &input,
                    context.as_deref(),
                    &vars,
                    format,
                    &self.config,
                )?;
                commands::emit(&resolved, output.as_ref())
            }

            Commands::Sha256 { file } => {
                let digest = commands::sha256_file(&file)?;
                println!("{}", digest);
                Ok(())
            }
        }
    }

    /// Create application from the configuration named on the command line
    pub fn from_args(args: &Args) -> Result<Self> {
        let config = Config::load(args.config.clone())?;
        Ok(Self::new(config))
    }
}
