//! Chunk command - one-shot processing of a local file

use std::path::PathBuf;

use clap::Args;

use crate::config::AppConfig;
use crate::domain::chunking::Document;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::services::IntelligentChunker;

#[derive(Args)]
pub struct ChunkArgs {
    /// File to classify and chunk
    pub file: PathBuf,

    /// Override the generated document id
    #[arg(long)]
    pub document_id: Option<String>,
}

/// Process one file and print the result as pretty JSON on stdout
pub async fn run(args: ChunkArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    // Keep stdout clean for the JSON result
    init_logging("warn", config.logging.format);

    let content = std::fs::read_to_string(&args.file)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", args.file.display(), e))?;

    let chunker = IntelligentChunker::new(config.chunking.clone())
        .map_err(|e| anyhow::anyhow!("Invalid chunking configuration: {}", e))?;

    let mut document = Document::new(content);

    if let Some(name) = args.file.file_name().and_then(|n| n.to_str()) {
        document = document.with_filename(name);
    }

    if let Some(id) = args.document_id {
        document = document.with_id(id);
    }

    let result = chunker.process(&document);

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
