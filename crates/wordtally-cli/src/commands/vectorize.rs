use std::io::Write;

use wordtally::{
    counting::CountVectorizer,
    orchestrator::{VectorizerOptions, VectorizerOrchestrator},
    pipeline::Batch,
};

use crate::{
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
};

/// Args for the vectorize command.
#[derive(clap::Args, Debug)]
pub struct VectorizeArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Trained model file.
    #[arg(long)]
    model: String,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl VectorizeArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let vectorizer = CountVectorizer::load_path(&self.model)?;
        let orchestrator =
            VectorizerOrchestrator::with_vectorizer(VectorizerOptions::default(), vectorizer)?;

        let texts = self.input.read_texts()?;
        let mut writer = self.output.open_writer()?;

        match orchestrator.process(&texts)? {
            Batch::Vectors(rows) => {
                for row in rows {
                    serde_json::to_writer(&mut writer, &row)?;
                    writeln!(writer)?;
                }
            }
            Batch::Texts(texts) => {
                for text in texts {
                    serde_json::to_writer(&mut writer, &text)?;
                    writeln!(writer)?;
                }
            }
        }
        writer.flush()?;

        Ok(())
    }
}
