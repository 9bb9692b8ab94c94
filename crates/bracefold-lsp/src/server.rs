//! Language server backend
//!
//! Holds open documents and the active settings. Every request takes a
//! snapshot of one document and scans it from scratch, so handlers never
//! share scan state.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use bracefold_core::Scanner;
use serde_json::Value;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    DidChangeConfigurationParams, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, DocumentSymbolParams, DocumentSymbolResponse,
    ExecuteCommandOptions, ExecuteCommandParams, FoldingRange, FoldingRangeParams,
    FoldingRangeProviderCapability, Hover, HoverParams, HoverProviderCapability,
    InitializeParams, InitializeResult, InitializedParams, MessageType, OneOf,
    ServerCapabilities, ServerInfo, TextDocumentSyncCapability, TextDocumentSyncKind, Url,
    WorkDoneProgressOptions,
};
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, info, warn};

use crate::commands::{self, Command, CommandError};
use crate::config::{ConfigError, Settings};
use crate::document::{from_lsp_position, OpenDocument};
use crate::intelligence::HoverAnalyzer;
use crate::structural::{FoldingAnalyzer, SymbolAnalyzer};

/// Settings together with the scanner built from them
#[derive(Debug, Clone)]
struct ServerState {
    settings: Settings,
    scanner: Arc<Scanner>,
}

impl ServerState {
    fn new(settings: Settings) -> std::result::Result<Self, ConfigError> {
        let scanner = Arc::new(settings.scanner.build()?);
        Ok(Self { settings, scanner })
    }
}

impl Default for ServerState {
    fn default() -> Self {
        let settings = Settings::default();
        let scanner = Arc::new(Scanner::default());
        Self { settings, scanner }
    }
}

/// LSP Backend state
pub struct Backend {
    /// LSP client for sending notifications
    client: Client,
    /// Document store for open documents
    documents: Arc<RwLock<HashMap<Url, Arc<OpenDocument>>>>,
    /// Active settings and scanner
    state: Arc<RwLock<ServerState>>,
}

impl Backend {
    /// Create a new backend instance
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(RwLock::new(HashMap::new())),
            state: Arc::new(RwLock::new(ServerState::default())),
        }
    }

    /// Get a document snapshot by URI
    async fn get_document(&self, uri: &Url) -> Option<Arc<OpenDocument>> {
        self.documents.read().await.get(uri).cloned()
    }

    /// Store a document
    async fn store_document(&self, uri: Url, text: String, version: i32) {
        let document = Arc::new(OpenDocument::new(text, version));
        self.documents.write().await.insert(uri, document);
    }

    /// Remove a document
    async fn remove_document(&self, uri: &Url) {
        self.documents.write().await.remove(uri);
    }

    /// Current settings and scanner
    async fn state(&self) -> ServerState {
        self.state.read().await.clone()
    }

    /// Replace the active settings, keeping the previous ones on error
    async fn apply_settings(&self, settings: Settings) {
        match ServerState::new(settings) {
            Ok(state) => {
                info!(
                    keyword = state.scanner.keyword(),
                    ignore_comments = state.scanner.options().ignore_keyword_in_comments,
                    "Settings applied"
                );
                *self.state.write().await = state;
            }
            Err(e) => warn!("Keeping previous settings: {}", e),
        }
    }

    /// Apply a JSON settings payload from the client
    async fn apply_json_settings(&self, value: Value) {
        match Settings::from_json(value) {
            Ok(settings) => self.apply_settings(settings).await,
            Err(e) => warn!("Ignoring settings payload: {}", e),
        }
    }
}

/// Workspace root named by the initialize request
fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    if let Some(folder) = params.workspace_folders.as_ref().and_then(|f| f.first()) {
        return folder.uri.to_file_path().ok();
    }

    #[allow(deprecated)]
    let root_uri = params.root_uri.as_ref();
    root_uri.and_then(|uri| uri.to_file_path().ok())
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("bracefold LSP server initializing");

        if let Some(root) = workspace_root(&params) {
            match Settings::load(&root) {
                Ok(Some(settings)) => {
                    debug!("Loaded {} from {}", Settings::FILE_NAME, root.display());
                    self.apply_settings(settings).await;
                }
                Ok(None) => debug!("No {} in {}", Settings::FILE_NAME, root.display()),
                Err(e) => warn!("Failed to load {}: {}", Settings::FILE_NAME, e),
            }
        }

        if let Some(options) = params.initialization_options {
            self.apply_json_settings(options).await;
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                folding_range_provider: Some(FoldingRangeProviderCapability::Simple(true)),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                document_symbol_provider: Some(OneOf::Left(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: commands::all(),
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "bracefold-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("bracefold LSP server initialized");
        self.client
            .log_message(MessageType::INFO, "bracefold language server ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("bracefold LSP server shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        debug!("Document opened: {}", params.text_document.uri);
        let document = params.text_document;
        self.store_document(document.uri, document.text, document.version)
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        debug!("Document changed: {}", params.text_document.uri);
        // Since we use FULL sync, the entire content is in the last change
        if let Some(change) = params.content_changes.into_iter().last() {
            let document = params.text_document;
            self.store_document(document.uri, change.text, document.version)
                .await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        debug!("Document closed: {}", params.text_document.uri);
        self.remove_document(&params.text_document.uri).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        debug!("Configuration changed");
        self.apply_json_settings(params.settings).await;
    }

    async fn folding_range(&self, params: FoldingRangeParams) -> Result<Option<Vec<FoldingRange>>> {
        let uri = params.text_document.uri;
        debug!("Folding range request for: {}", uri);

        let Some(document) = self.get_document(&uri).await else {
            warn!("Document not found for folding: {}", uri);
            return Ok(None);
        };
        let state = self.state().await;

        let ranges = FoldingAnalyzer::generate_ranges(
            document.as_ref(),
            &state.scanner,
            state.settings.folding.collapsed_text.as_deref(),
        );
        debug!("Generated {} folding ranges for {}", ranges.len(), uri);

        Ok(Some(ranges))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let position = params.text_document_position_params;
        let uri = position.text_document.uri;
        debug!("Hover request for: {} at {:?}", uri, position.position);

        let Some(document) = self.get_document(&uri).await else {
            warn!("Document not found for hover: {}", uri);
            return Ok(None);
        };
        let state = self.state().await;

        Ok(HoverAnalyzer::hover_at(
            document.as_ref(),
            &state.scanner,
            from_lsp_position(position.position),
            &state.settings.hover.language,
        ))
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;
        debug!("Document symbol request for: {}", uri);

        let Some(document) = self.get_document(&uri).await else {
            warn!("Document not found for symbols: {}", uri);
            return Ok(None);
        };
        let state = self.state().await;

        let symbols = SymbolAnalyzer::extract_symbols(document.as_ref(), &state.scanner);
        debug!("Found {} symbols in {}", symbols.len(), uri);

        Ok(Some(DocumentSymbolResponse::Nested(symbols)))
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        debug!("Execute command: {}", params.command);

        let command = Command::parse(&params.command, params.arguments)?;
        let Some(document) = self.get_document(command.uri()).await else {
            return Err(CommandError::DocumentNotFound(command.uri().clone()).into());
        };
        let state = self.state().await;

        Ok(Some(command.run(
            document.as_ref(),
            &state.scanner,
            &state.settings,
        )))
    }
}

/// Run the language server over stdio
pub async fn run_server() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting bracefold Language Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}

#[cfg(test)]
mod tests;
