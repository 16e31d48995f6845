//! Interactive session.
//!
//! Plain lines are appended to the text; lines starting with `/` are
//! commands. `//` escapes a literal leading slash.

use std::path::PathBuf;

use anyhow::{Context, Result};
use inputbar_core::SessionEvent;
use inputbar_core::config::Config;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::Surface;
use crate::collaborators::file_ref_from_path;

const HELP: &str = "\
Type text to compose. Commands:
  /send             submit the current input
  /file <path>      attach a file
  /drop <paths...>  drop files (only the first is used)
  /capture <url>    capture a page as the attachment
  /remove           remove the attachment
  /status           print the widget state as JSON
  /clear            clear the text
  /quit             exit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Text(String),
    Send,
    File(PathBuf),
    Drop(Vec<PathBuf>),
    Capture(String),
    Remove,
    Status,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    if let Some(literal) = line.strip_prefix("//") {
        return Command::Text(format!("/{literal}"));
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Text(line.to_string());
    };

    let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let args = args.trim();
    match (name, args.is_empty()) {
        ("send", true) => Command::Send,
        ("file", false) => Command::File(PathBuf::from(args)),
        ("drop", false) => Command::Drop(args.split_whitespace().map(PathBuf::from).collect()),
        ("capture", false) => Command::Capture(args.to_string()),
        ("remove", true) => Command::Remove,
        ("status", true) => Command::Status,
        ("clear", true) => Command::Clear,
        ("help", true) => Command::Help,
        ("quit" | "exit", true) => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

pub async fn run(config: &Config) -> Result<()> {
    let mut surface = Surface::new(config)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprintln!("inputbar: type text, /send to submit, /help for commands");

    while let Some(line) = lines.next_line().await.context("read stdin")? {
        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => eprintln!("{HELP}"),
            Command::Unknown(line) => eprintln!("unknown command: {line} (try /help)"),
            Command::Text(line) => append_line(&mut surface, &line),
            Command::Clear => surface
                .runtime
                .dispatch(SessionEvent::TextChanged(String::new())),
            Command::Send => {
                surface.runtime.dispatch(SessionEvent::SubmitRequested);
                surface.runtime.settle().await;
            }
            Command::File(path) => match file_ref_from_path(&path) {
                Ok(file) => surface.runtime.dispatch(SessionEvent::FileSelected(file)),
                Err(err) => eprintln!("error: {err:#}"),
            },
            Command::Drop(paths) => {
                let mut files = Vec::with_capacity(paths.len());
                for path in &paths {
                    match file_ref_from_path(path) {
                        Ok(file) => files.push(file),
                        Err(err) => eprintln!("error: {err:#}"),
                    }
                }
                if !files.is_empty() {
                    surface.runtime.dispatch(SessionEvent::FilesDropped(files));
                }
            }
            Command::Capture(url) => {
                surface.active_tab.set(url);
                surface.runtime.dispatch(SessionEvent::CaptureRequested);
                surface.runtime.settle().await;
            }
            Command::Remove => {
                surface.runtime.dispatch(SessionEvent::FileRemoved);
                surface.runtime.dispatch(SessionEvent::PageRemoved);
            }
            Command::Status => {
                let view = surface.runtime.view();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&view).context("encode status")?
                );
            }
        }
        for rejection in surface.observer.take_rejections() {
            eprintln!("error: {}", rejection.message);
        }
    }

    surface.runtime.settle().await;
    Ok(())
}

fn append_line(surface: &mut Surface, line: &str) {
    let session = surface.runtime.session();
    if session.is_input_disabled() {
        eprintln!("input is locked while an attachment is present (use /remove)");
        return;
    }
    let text = if session.text.is_empty() {
        line.to_string()
    } else {
        format!("{}\n{line}", session.text)
    };
    surface.runtime.dispatch(SessionEvent::TextChanged(text));
}
