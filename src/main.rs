//! `SlidePilot` command-line front end.
//!
//! Usage:
//!   `slidepilot <file.pptx|file.odp> [--json] [--viewport WIDTHxHEIGHT]`
//!
//! Imports the file, prints a summary (or the presentation as JSON), then
//! reads assistant requests from stdin. `undo`, `redo` and `quit` are built in.

use anyhow::Result;
use std::env;
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use slidepilot::assistant::{acknowledge, AssistantBridge, Context, DelayPolicy, MessageKind, Transcript};
use slidepilot::command::{ApplyResult, Command, CommandEngine, EngineHandle};
use slidepilot::config::{Config, Viewport, LOG_VAR};
use slidepilot::error::Error;
use slidepilot::import::ImportPipeline;
use slidepilot::model::{validate, Presentation, Slide};
use slidepilot::render::{extract_text, project, PrimitiveKind};
use slidepilot::source::{FileSource, FsSource};

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let config = Config::load()?;

    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1).filter(|a| !a.starts_with("--")) else {
        eprintln!("Usage: {} <file.pptx|file.odp> [--json] [--viewport WIDTHxHEIGHT]", args[0]);
        std::process::exit(1);
    };
    let json = args.contains(&"--json".to_string());
    let viewport = match args.iter().position(|a| a == "--viewport") {
        Some(i) => Viewport::parse(args.get(i + 1).map_or("", String::as_str))?,
        None => config.viewport,
    };

    let source = FsSource.load(Path::new(path))?;
    let presentation = ImportPipeline::default()
        .spawn_import(source.bytes, source.name.clone())
        .join()
        .await
        .map_err(|e| Error::import(&source.name, e))?;

    for violation in validate(&presentation) {
        tracing::warn!("{violation}");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&presentation)?);
        return Ok(());
    }

    print_summary(&presentation);
    run_assistant(presentation, &config, viewport).await
}

fn print_summary(presentation: &Presentation) {
    println!("{} ({} slides)", presentation.title, presentation.slide_count());
    if let Some(author) = &presentation.metadata.author {
        println!("by {author}");
    }
    for (index, slide) in presentation.slides.iter().enumerate() {
        let text = extract_text(slide);
        let preview = text.lines().skip(1).find(|l| !l.trim().is_empty()).unwrap_or_default();
        println!("  {:>3}. {:<40} {preview}", index + 1, slide.title.as_deref().unwrap_or("Untitled"));
    }
}

fn print_slide(slide: &Slide, index: usize, viewport: Viewport) {
    println!("── Slide {} ──", index + 1);
    for primitive in project(slide, viewport.width, viewport.height) {
        let f = primitive.frame;
        let what = match &primitive.kind {
            PrimitiveKind::Text { content, .. } => format!("text {:?}", content.lines().next().unwrap_or_default()),
            PrimitiveKind::Image { .. } => "image".to_string(),
            PrimitiveKind::Shape { fill } => format!("shape {fill}"),
            PrimitiveKind::Placeholder { label, .. } => format!("[{label}]"),
        };
        println!("  {what} at ({:.0}, {:.0}) {:.0}x{:.0}", f.x, f.y, f.width, f.height);
    }
    if let Some(notes) = slide.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        println!("  notes: {notes}");
    }
}

async fn run_assistant(presentation: Presentation, config: &Config, viewport: Viewport) -> Result<()> {
    let handle = EngineHandle::spawn(CommandEngine::with_depth(presentation, config.undo_depth));
    let bridge = AssistantBridge::default().with_delay(DelayPolicy::from_duration(config.response_delay));
    let mut transcript = Transcript::with_welcome();
    for message in transcript.messages() {
        println!("{}", message.content);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        transcript.push_user(line);

        let (reply, kind, redraw) = match line {
            "quit" | "exit" => break,
            "undo" => match handle.undo().await? {
                Ok(_) => ("Undone.".to_string(), MessageKind::System, true),
                Err(e) => (format!("There is {e}."), MessageKind::System, false),
            },
            "redo" => match handle.redo().await? {
                Ok(_) => ("Redone.".to_string(), MessageKind::System, true),
                Err(_) => ("There is nothing to redo.".to_string(), MessageKind::System, false),
            },
            _ => {
                let (deck, current) = handle.snapshot().await?;
                let context = Context {
                    current_slide_index: current,
                    total_slides: deck.slide_count(),
                    has_presentation: true,
                };
                let command = bridge.resolve(line, &context).await;
                let result = handle.apply(command.clone()).await?;
                let kind = match (&command, &result) {
                    (Command::Unrecognized { .. }, _) => MessageKind::Text,
                    (_, ApplyResult::Rejected(_)) => MessageKind::Error,
                    _ => MessageKind::Command,
                };
                let redraw = result.is_applied() && command.changes_view();
                (acknowledge(&command, &result), kind, redraw)
            }
        };

        println!("{}", transcript.push_assistant(kind, reply).content);
        if redraw {
            let (deck, current) = handle.snapshot().await?;
            if let Some(slide) = deck.slide(current) {
                print_slide(slide, current, viewport);
            }
        }
    }

    Ok(())
}
