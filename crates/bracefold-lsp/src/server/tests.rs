//! Request handling tests against an in-process backend

use super::*;
use serde_json::json;
use tower_lsp::lsp_types::{
    FoldingRangeParams, HoverContents, PartialResultParams, Position, TextDocumentIdentifier,
    TextDocumentItem, TextDocumentPositionParams, VersionedTextDocumentIdentifier,
    TextDocumentContentChangeEvent, WorkDoneProgressParams, WorkspaceFolder,
};

const DOC: &str = "\
<Box sx={{ p: 1 }} />
<Stack
  sx={{
    gap: 2,
  }}
/>";

fn uri() -> Url {
    Url::parse("file:///tmp/app.tsx").unwrap()
}

fn backend() -> LspService<Backend> {
    LspService::new(Backend::new).0
}

async fn open(backend: &Backend, text: &str) {
    backend
        .did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem::new(uri(), "typescriptreact".into(), 1, text.into()),
        })
        .await;
}

async fn folds(backend: &Backend) -> Option<Vec<FoldingRange>> {
    backend
        .folding_range(FoldingRangeParams {
            text_document: TextDocumentIdentifier::new(uri()),
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
        })
        .await
        .unwrap()
}

async fn hover(backend: &Backend, line: u32, character: u32) -> Option<Hover> {
    backend
        .hover(HoverParams {
            text_document_position_params: TextDocumentPositionParams::new(
                TextDocumentIdentifier::new(uri()),
                Position::new(line, character),
            ),
            work_done_progress_params: WorkDoneProgressParams::default(),
        })
        .await
        .unwrap()
}

async fn execute(backend: &Backend, command: &str, arguments: Vec<Value>) -> Result<Option<Value>> {
    backend
        .execute_command(ExecuteCommandParams {
            command: command.into(),
            arguments,
            work_done_progress_params: WorkDoneProgressParams::default(),
        })
        .await
}

// ==================== LIFECYCLE TESTS ====================

#[tokio::test]
async fn test_initialize_capabilities() {
    let service = backend();
    let result = service
        .inner()
        .initialize(InitializeParams::default())
        .await
        .unwrap();

    let capabilities = result.capabilities;
    assert!(capabilities.folding_range_provider.is_some());
    assert!(capabilities.hover_provider.is_some());
    assert!(capabilities.document_symbol_provider.is_some());
    assert_eq!(
        capabilities.execute_command_provider.unwrap().commands,
        commands::all()
    );
    assert_eq!(result.server_info.unwrap().name, "bracefold-lsp");
}

#[tokio::test]
async fn test_initialize_loads_workspace_settings() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(Settings::FILE_NAME),
        "[scanner]\nkeyword = \"css\"\n",
    )
    .unwrap();

    let service = backend();
    let backend = service.inner();
    backend
        .initialize(InitializeParams {
            workspace_folders: Some(vec![WorkspaceFolder {
                uri: Url::from_directory_path(dir.path()).unwrap(),
                name: "app".into(),
            }]),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(backend.state().await.scanner.keyword(), "css");
}

#[tokio::test]
async fn test_initialization_options_override() {
    let service = backend();
    let backend = service.inner();
    backend
        .initialize(InitializeParams {
            initialization_options: Some(json!({ "scanner": { "keyword": "style" } })),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(backend.state().await.scanner.keyword(), "style");
}

#[tokio::test]
async fn test_shutdown() {
    let service = backend();
    assert!(service.inner().shutdown().await.is_ok());
}

// ==================== DOCUMENT TESTS ====================

#[tokio::test]
async fn test_folding_for_open_document() {
    let service = backend();
    let backend = service.inner();
    open(backend, DOC).await;

    let ranges = folds(backend).await.unwrap();
    assert_eq!(ranges.len(), 1);
    assert_eq!((ranges[0].start_line, ranges[0].end_line), (2, 3));
    assert_eq!(ranges[0].collapsed_text.as_deref(), Some("{...}"));
}

#[tokio::test]
async fn test_unknown_document_has_no_folds() {
    let service = backend();
    assert!(folds(service.inner()).await.is_none());
}

#[tokio::test]
async fn test_change_replaces_text() {
    let service = backend();
    let backend = service.inner();
    open(backend, DOC).await;

    backend
        .did_change(DidChangeTextDocumentParams {
            text_document: VersionedTextDocumentIdentifier::new(uri(), 2),
            content_changes: vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: "const a = 1;".into(),
            }],
        })
        .await;

    assert!(folds(backend).await.unwrap().is_empty());
    assert_eq!(backend.get_document(&uri()).await.unwrap().version(), 2);
}

#[tokio::test]
async fn test_close_forgets_document() {
    let service = backend();
    let backend = service.inner();
    open(backend, DOC).await;

    backend
        .did_close(DidCloseTextDocumentParams {
            text_document: TextDocumentIdentifier::new(uri()),
        })
        .await;

    assert!(folds(backend).await.is_none());
}

#[tokio::test]
async fn test_hover_on_keyword() {
    let service = backend();
    let backend = service.inner();
    open(backend, DOC).await;

    let result = hover(backend, 0, 6).await.unwrap();
    match result.contents {
        HoverContents::Markup(markup) => assert_eq!(markup.value, "```tsx\n{{ p: 1 }}\n```"),
        other => panic!("unexpected hover contents: {other:?}"),
    }
    assert!(hover(backend, 3, 4).await.is_none());
}

#[tokio::test]
async fn test_document_symbols() {
    let service = backend();
    let backend = service.inner();
    open(backend, DOC).await;

    let response = backend
        .document_symbol(DocumentSymbolParams {
            text_document: TextDocumentIdentifier::new(uri()),
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
        })
        .await
        .unwrap();

    match response {
        Some(DocumentSymbolResponse::Nested(symbols)) => assert_eq!(symbols.len(), 2),
        other => panic!("unexpected symbols: {other:?}"),
    }
}

// ==================== CONFIGURATION TESTS ====================

#[tokio::test]
async fn test_configuration_change_applies() {
    let service = backend();
    let backend = service.inner();
    open(backend, "<Box css={{\n  a: 1,\n}} />").await;
    assert!(folds(backend).await.unwrap().is_empty());

    backend
        .did_change_configuration(DidChangeConfigurationParams {
            settings: json!({ "bracefold": { "scanner": { "keyword": "css" } } }),
        })
        .await;

    assert_eq!(folds(backend).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_configuration_keeps_previous() {
    let service = backend();
    let backend = service.inner();

    backend
        .did_change_configuration(DidChangeConfigurationParams {
            settings: json!({ "scanner": { "keyword": "" } }),
        })
        .await;

    assert_eq!(backend.state().await.scanner.keyword(), "sx");
}

// ==================== COMMAND TESTS ====================

#[tokio::test]
async fn test_toggle_fold_command() {
    let service = backend();
    let backend = service.inner();
    open(backend, DOC).await;

    let result = execute(backend, commands::TOGGLE_FOLD, vec![json!(uri()), json!(true)])
        .await
        .unwrap()
        .unwrap();

    assert_eq!(result["folded"], json!(false));
    assert_eq!(result["ranges"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_command_errors_are_invalid_params() {
    let service = backend();
    let backend = service.inner();

    let unknown = execute(backend, "bracefold.unknown", vec![]).await.unwrap_err();
    assert_eq!(unknown.code, tower_lsp::jsonrpc::ErrorCode::InvalidParams);

    let malformed = execute(backend, commands::PREVIEW, vec![json!(7)]).await.unwrap_err();
    assert_eq!(malformed.code, tower_lsp::jsonrpc::ErrorCode::InvalidParams);

    let closed = execute(backend, commands::PREVIEW, vec![json!(uri())]).await.unwrap_err();
    assert_eq!(closed.code, tower_lsp::jsonrpc::ErrorCode::InvalidParams);
}
