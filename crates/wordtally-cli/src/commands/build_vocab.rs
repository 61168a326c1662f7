use std::io::Write;

use wordtally::{
    corpus::{CorpusSource, TextUnit},
    normalize::NormalizationOptions,
    vocab::{DEFAULT_UNKNOWN_TOKEN, Vocabulary, VocabularyOptions, io::write_term_map_json},
};

use crate::{
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
};

/// Args for the build-vocab command.
#[derive(clap::Args, Debug)]
pub struct BuildVocabArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Index whole lines instead of whitespace tokens.
    #[arg(long)]
    sentences: bool,

    /// Lowercase every unit.
    #[arg(long)]
    lowercase: bool,

    /// Strip diacritics from every unit.
    #[arg(long)]
    strip_diacritics: bool,

    /// Strip punctuation from every unit.
    #[arg(long)]
    strip_punctuation: bool,

    /// The unknown token literal.
    #[arg(long, default_value = DEFAULT_UNKNOWN_TOKEN)]
    unknown_token: String,

    /// Do not reserve an unknown token.
    #[arg(long)]
    no_unknown: bool,
}

impl BuildVocabArgs {
    fn vocabulary_options(&self) -> VocabularyOptions {
        let options = VocabularyOptions::default()
            .with_unit(if self.sentences {
                TextUnit::Sentence
            } else {
                TextUnit::Token
            })
            .with_normalization(
                NormalizationOptions::none()
                    .with_lowercase(self.lowercase)
                    .with_strip_diacritics(self.strip_diacritics)
                    .with_strip_punctuation(self.strip_punctuation),
            );

        if self.no_unknown {
            options
                .with_unknown_token(None::<String>)
                .with_add_unknown(false)
        } else {
            options.with_unknown_token(Some(self.unknown_token.clone()))
        }
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let source = match self.input.input.as_deref() {
            Some(path) if path != "-" => CorpusSource::from_path(path),
            _ => CorpusSource::from_texts(self.input.read_texts()?),
        };

        let vocab = Vocabulary::from_corpus(&source, self.vocabulary_options())?;
        log::info!("Vocabulary Size: {}", vocab.len());

        let mut writer = self.output.open_writer()?;
        write_term_map_json(vocab.term_map(), &mut writer)?;
        writer.flush()?;

        Ok(())
    }
}
