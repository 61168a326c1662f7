use wordtally::orchestrator::{VectorizerOptions, VectorizerOrchestrator};

use crate::{input_output::InputArgs, logging::LogArgs};

/// Args for the train command.
#[derive(clap::Args, Debug)]
pub struct TrainArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    input: InputArgs,

    /// JSON options file; flags below override it.
    #[arg(long)]
    config: Option<String>,

    /// Max vocabulary size.
    #[arg(long)]
    max_features: Option<usize>,

    /// Smallest n-gram size.
    #[arg(long)]
    min_ngram: Option<usize>,

    /// Largest n-gram size.
    #[arg(long)]
    max_ngram: Option<usize>,

    /// Drop English stop words.
    #[arg(long)]
    remove_stop_words: bool,

    /// Previously trained model to load.
    #[arg(long)]
    trained_model: Option<String>,

    /// Stored vocabulary; line-delimited or JSON.
    #[arg(long)]
    stored_vocabulary: Option<String>,

    /// Merge the corpus terms into the stored vocabulary.
    #[arg(long)]
    update_vocabulary: bool,

    /// Build a vocabulary first, and seed the vectorizer with it.
    #[arg(long)]
    build_vocabulary: bool,

    /// Directory for the trained model.
    #[arg(long)]
    save_model: Option<String>,

    /// Directory for the merged vocabulary.
    #[arg(long)]
    save_vocabulary: Option<String>,
}

impl TrainArgs {
    fn options(&self) -> Result<VectorizerOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => VectorizerOptions::load_json_path(path)?,
            None => VectorizerOptions::default(),
        };

        if self.max_features.is_some() {
            options = options.with_max_features(self.max_features);
        }
        let min_ngram = self.min_ngram.unwrap_or(options.min_ngram);
        let max_ngram = self.max_ngram.unwrap_or(options.max_ngram);
        options = options.with_ngram_range(min_ngram, max_ngram);

        if self.remove_stop_words {
            options = options.with_remove_stop_words(true);
        }
        if self.update_vocabulary {
            options = options.with_update_stored_vocabulary(true);
        }
        if self.build_vocabulary {
            options = options.with_use_own_vocabulary_creator(false);
        }
        if self.trained_model.is_some() {
            options = options.with_path_to_trained_model(self.trained_model.as_ref());
        }
        if self.stored_vocabulary.is_some() {
            options = options.with_path_to_stored_vocabulary(self.stored_vocabulary.as_ref());
        }
        if self.save_model.is_some() {
            options = options.with_path_to_save_model(self.save_model.as_ref());
        }
        if self.save_vocabulary.is_some() {
            options = options.with_path_to_save_vocabulary(self.save_vocabulary.as_ref());
        }

        Ok(options)
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let mut orchestrator = VectorizerOrchestrator::new(self.options()?)?;

        log::info!("Reading corpus...");
        let texts = self.input.read_texts()?;
        log::info!("Corpus Size: {}", texts.len());

        orchestrator.train(&texts)?;

        if let Some(vectorizer) = orchestrator.vectorizer() {
            log::info!("Features: {}", vectorizer.feature_names()?.len());
        }
        Ok(())
    }
}
