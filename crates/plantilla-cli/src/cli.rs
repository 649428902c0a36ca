use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Reconstruct editable HTML templates from scanned-document text layers.
#[derive(Debug, Parser)]
#[command(name = "plantilla", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the deterministic HTML skeleton for a document
    Skeleton {
        /// Path to the document JSON file (pages + fields)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the result to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = TemplateFormat::Html)]
        format: TemplateFormat,
    },

    /// Dump clustered lines with alignment and inferred margins
    Lines {
        /// Path to the document JSON file (pages + fields)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only this page number. Default: all pages
        #[arg(long)]
        page: Option<u32>,

        /// Output format
        #[arg(long, value_enum, default_value_t = DumpFormat::Text)]
        format: DumpFormat,
    },

    /// List placeholder mappings derived from the document's fields
    Fields {
        /// Path to the document JSON file (pages + fields)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = DumpFormat::Text)]
        format: DumpFormat,
    },

    /// Generate a template refined against the page image via a local Ollama server
    #[cfg(feature = "ollama")]
    Generate {
        /// Path to the document JSON file (pages + fields)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Raster image of the scanned page
        #[arg(long, value_name = "IMG")]
        image: PathBuf,

        /// MIME type of the image
        #[arg(long, default_value = "image/png")]
        mime: String,

        /// File with accumulated layout notes to include in the instruction
        #[arg(long, value_name = "FILE")]
        memory: Option<PathBuf>,

        /// Model to run
        #[arg(long, default_value = "llama3.2-vision")]
        model: String,

        /// Ollama server base URL
        #[arg(long, default_value = "http://localhost:11434")]
        ollama_url: String,

        /// Write the result to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = TemplateFormat::Html)]
        format: TemplateFormat,
    },
}

/// Output format for template-producing subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum TemplateFormat {
    /// Raw HTML template
    Html,
    /// JSON envelope with html, variables, confidence, page count
    Json,
}

/// Output format for the lines/fields debug dumps.
#[derive(Debug, Clone, ValueEnum)]
pub enum DumpFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}
