use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arkbind", version)]
#[command(about = "Mint, bind and validate ARKs through NOID", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml (defaults: ./config.yaml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// NOID program to run (overrides NOID.noid_path)
    #[arg(long, global = true, env = "ARKBIND_NOID_PATH")]
    pub noid_path: Option<String>,

    /// Minter database directory (overrides NOID.db_path)
    #[arg(long, global = true, env = "ARKBIND_DB_PATH")]
    pub db_path: Option<String>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mint new ARKs
    #[command(alias = "m")]
    Mint {
        /// How many identifiers to mint
        #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,
    },

    /// Bind a value to an element of an ARK
    #[command(alias = "b")]
    Bind {
        /// Identifier (ark:/ prefix is accepted)
        identifier: String,

        /// Element name, or ':' / ':-' to read the binding from stdin
        element: String,

        /// Value to bind (omit only with a stdin marker)
        value: Option<String>,

        /// Bind mode: set, let, add, insert, new, replace, append, prepend, delete, purge
        #[arg(long, default_value = "set")]
        how: String,
    },

    /// Bind several ELEMENT=VALUE pairs to one ARK, in the order given
    BindMany {
        identifier: String,

        #[arg(required = true, num_args = 1..)]
        pairs: Vec<String>,

        #[arg(long, default_value = "set")]
        how: String,
    },

    /// Print bound values (terse)
    Get {
        identifier: String,

        /// Restrict to these elements
        elements: Vec<String>,
    },

    /// Print bound values (verbose)
    Fetch {
        identifier: String,

        /// Restrict to these elements
        elements: Vec<String>,
    },

    /// Check identifiers against the minter
    #[command(alias = "v")]
    Validate {
        #[arg(required = true, num_args = 1..)]
        identifiers: Vec<String>,
    },

    /// Bind metadata from every JSON record under a directory
    BindDir {
        /// Root directory, searched recursively
        dir: PathBuf,

        /// File extensions to treat as records (repeatable; defaults to Batch.extensions)
        #[arg(long = "ext")]
        extensions: Vec<String>,
    },

    /// Print the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bind_value_is_optional() {
        let cli = Cli::try_parse_from(["arkbind", "bind", "1/x", ":"]).unwrap();
        match cli.command {
            Commands::Bind { element, value, how, .. } => {
                assert_eq!(element, ":");
                assert_eq!(value, None);
                assert_eq!(how, "set");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_mint_rejects_zero() {
        assert!(Cli::try_parse_from(["arkbind", "mint", "0"]).is_err());
        let cli = Cli::try_parse_from(["arkbind", "mint"]).unwrap();
        assert!(matches!(cli.command, Commands::Mint { count: 1 }));
    }

    #[test]
    fn test_bind_dir_extensions() {
        let cli =
            Cli::try_parse_from(["arkbind", "bind-dir", "meta", "--ext", ".json", "--ext", "geojson"])
                .unwrap();
        match cli.command {
            Commands::BindDir { dir, extensions } => {
                assert_eq!(dir, PathBuf::from("meta"));
                assert_eq!(extensions, vec![".json", "geojson"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
