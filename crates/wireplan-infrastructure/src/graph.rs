//! Wiring graph documents
//!
//! A front-end serializes the modules of a compilation unit into a JSON or
//! TOML document; the loader turns it back into a [`WiringGraph`].

use crate::error_ext::ErrorContext;
use crate::logging::log_graph_loaded;
use std::path::Path;
use wireplan_domain::WiringGraph;
use wireplan_domain::error::Result;

/// Serialization format of a graph document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GraphFormat {
    #[default]
    Json,
    Toml,
}

impl GraphFormat {
    /// Format implied by the file extension; JSON when unknown
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Reads wiring graph documents
pub struct GraphLoader;

impl GraphLoader {
    /// Read and parse the document at `path`
    pub fn load(path: &Path) -> Result<WiringGraph> {
        let content = std::fs::read_to_string(path)
            .io_context(format!("Failed to read wiring graph {}", path.display()))?;
        let graph = Self::parse(&content, GraphFormat::from_path(path))
            .with_context(|| format!("Invalid wiring graph {}", path.display()))?;
        log_graph_loaded(path, graph.modules.len(), graph.types.len());
        Ok(graph)
    }

    /// Parse a document held in memory
    pub fn parse(content: &str, format: GraphFormat) -> Result<WiringGraph> {
        match format {
            GraphFormat::Json => WiringGraph::from_json(content),
            GraphFormat::Toml => toml::from_str(content).context("Failed to parse TOML graph"),
        }
    }
}
