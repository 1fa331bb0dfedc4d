use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Product recommendation backend.
#[derive(Debug, Parser)]
#[command(name = "shop-assistant", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP API (default).
    Serve,
    /// Embed the prepared catalog JSONL and upsert it into Qdrant.
    Ingest {
        /// Catalog file; defaults to `DATA_PATH`.
        path: Option<PathBuf>,
        /// Drop and recreate the collection first.
        #[arg(long)]
        fresh: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let args = Args::parse_from(["shop-assistant"]);
        assert!(args.command.is_none());
    }

    #[test]
    fn ingest_with_path_and_fresh() {
        let args = Args::parse_from(["shop-assistant", "ingest", "data/x.jsonl", "--fresh"]);
        match args.command {
            Some(Command::Ingest { path, fresh }) => {
                assert_eq!(path, Some(PathBuf::from("data/x.jsonl")));
                assert!(fresh);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
