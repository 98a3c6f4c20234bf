use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "clinicweb")]
#[command(author, version, about = "Clinic site backend: contact-form intake and doctor roster", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Port to listen on (overrides WEB_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate configuration and print a summary, then exit
    CheckConfig,

    /// Print the public doctor roster as JSON
    Roster {
        /// Only doctors handling this subject tag
        #[arg(short, long)]
        subject: Option<u32>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["clinicweb"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_serve_port() {
        let cli = Cli::try_parse_from(["clinicweb", "serve", "--port", "8080"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Serve { port: Some(8080) }));
    }

    #[test]
    fn test_roster_subject() {
        let cli = Cli::try_parse_from(["clinicweb", "roster", "-s", "3"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Roster { subject: Some(3) }));
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["clinicweb", "serve", "--port", "http"]).is_err());
    }
}
