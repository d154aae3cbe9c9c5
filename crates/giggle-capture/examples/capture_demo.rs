//! Runs the capture workflow end to end against the in-memory stack.
//!
//! Set `GIGGLE_SUMMARY_API_KEY` (and optionally `GIGGLE_SUMMARY_URL` /
//! `GIGGLE_SUMMARY_MODEL`) to exercise the real summarization endpoint;
//! without a key the plain save path runs.

use std::sync::Arc;

use giggle_capture::{
    CaptureHandler, CaptureOutcome, ChatSummarizer, LogNotifier, MenuAction, Selection,
};
use giggle_core::{FolderRepository, Identity};
use giggle_store::{Gateways, MemoryIdentity};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let gateways = Gateways::in_memory();
    let identity = Arc::new(MemoryIdentity::new());
    identity.sign_up("demo@example.com", "demo-pass").await?;
    let user = identity.current_user().expect("just signed up");
    gateways.folders.create_defaults(&user.id).await?;

    let mut handler = CaptureHandler::new(
        Arc::new(gateways.folders.clone()),
        Arc::new(gateways.notes.clone()),
        identity,
        Arc::new(LogNotifier),
    );

    let summarize = std::env::var(giggle_capture::summarize::ENV_SUMMARY_API_KEY).is_ok();
    if summarize {
        handler = handler.with_summarizer(Arc::new(ChatSummarizer::from_env()?));
    }

    for item in handler.menu_items() {
        println!("menu entry: {} ({})", item.title, item.id);
    }

    let action = if summarize {
        MenuAction::SummarizeToDefault
    } else {
        MenuAction::SaveToDefault
    };
    let selection = Selection::new(
        "Rust is a multi-paradigm, general-purpose programming language that \
         emphasizes performance, type safety, and concurrency.",
    )
    .with_page("Rust (programming language)", "https://en.wikipedia.org/wiki/Rust");

    match handler.handle(action, selection).await {
        CaptureOutcome::Saved { note, summarized } => {
            println!("saved note {} (summarized: {})", note.id, summarized);
            println!("title:   {}", note.title);
            println!("content: {}", note.content);
        }
        other => println!("capture did not save a note: {:?}", other),
    }

    Ok(())
}
