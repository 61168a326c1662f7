use crate::commands::{build_vocab::BuildVocabArgs, train::TrainArgs, vectorize::VectorizeArgs};

pub mod build_vocab;
pub mod train;
pub mod vectorize;

/// Subcommands for wordtally
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Train and persist a count vectorizer.
    Train(TrainArgs),

    /// Vectorize text with a trained model; one JSON row per line.
    Vectorize(VectorizeArgs),

    /// Build a normalized vocabulary from a corpus.
    BuildVocab(BuildVocabArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Train(cmd) => cmd.run(),
            Commands::Vectorize(cmd) => cmd.run(),
            Commands::BuildVocab(cmd) => cmd.run(),
        }
    }
}
