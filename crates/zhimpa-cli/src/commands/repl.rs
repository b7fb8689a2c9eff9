use std::borrow::Cow;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use zhimpa_application::Command;
use zhimpa_core::config::SiteConfig;
use zhimpa_core::page::Page;

use super::{Site, print_activation, print_outcome};

const SLASH_COMMANDS: [&str; 4] = ["/open", "/view", "/session", "/quit"];
const OPEN_PREFIX: &str = "/open ";
const ACTION_KEY: &str = r#""action""#;

/// Completion target under the cursor: where it starts and what it may become.
#[derive(Debug, PartialEq)]
struct Completion {
    start: usize,
    candidates: Vec<String>,
}

impl Completion {
    fn matching<'a>(start: usize, typed: &str, options: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            start,
            candidates: options
                .into_iter()
                .filter(|option| option.starts_with(typed))
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Resolves what the text before the cursor can complete to.
///
/// - `/open <partial>` completes page file names
/// - a bare `/partial` completes slash commands
/// - an open string after `"action":` completes action names
fn complete_line(line: &str) -> Option<Completion> {
    if let Some(typed) = line.strip_prefix(OPEN_PREFIX) {
        let typed = typed.trim_start();
        let known = Page::KNOWN;
        let pages = known.iter().map(Page::file_name);
        return Some(Completion::matching(line.len() - typed.len(), typed, pages));
    }
    if line.starts_with('/') && !line.contains(' ') {
        return Some(Completion::matching(0, line, SLASH_COMMANDS));
    }

    let after_key = line.rfind(ACTION_KEY)? + ACTION_KEY.len();
    let rest = line[after_key..].trim_start().strip_prefix(':')?.trim_start();
    let typed = rest.strip_prefix('"')?;
    if typed.contains('"') {
        return None;
    }
    Some(Completion::matching(
        line.len() - typed.len(),
        typed,
        Command::ACTIONS,
    ))
}

/// Slash command, page and action completion for the REPL.
struct ReplHelper;

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let Some(completion) = complete_line(&line[..pos]) else {
            return Ok((pos, vec![]));
        };
        let pairs = completion
            .candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((completion.start, pairs))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    /// Hints the rest of the only candidate, if there is exactly one.
    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let completion = complete_line(line)?;
        match completion.candidates.as_slice() {
            [only] => {
                let typed = line.len() - completion.start;
                (only.len() > typed).then(|| only[typed..].to_string())
            }
            _ => None,
        }
    }
}

impl Highlighter for ReplHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.bright_black().to_string())
    }
}

impl Validator for ReplHelper {}

enum Flow {
    Continue,
    Quit,
}

pub fn start(config: SiteConfig, page: &str) -> Result<()> {
    let mut site = Site::open(config)?;

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ReplHelper));

    println!("{}", "=== Zhimpa ===".bright_magenta().bold());
    println!(
        "{}",
        "Enter a JSON command, or /open <page>, /view, /session, /quit.".bright_black()
    );
    println!();

    let activation = site.dispatcher.load(Page::from_path(page))?;
    print_activation(&site.dispatcher, &activation);
    site.settle()?;

    loop {
        let prompt = format!("{}> ", site.dispatcher.view().page);
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let flow = if trimmed.starts_with('/') {
                    slash_command(&mut site, trimmed)?
                } else {
                    json_command(&mut site, trimmed)?;
                    Flow::Continue
                };
                if let Flow::Quit = flow {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

fn slash_command(site: &mut Site, input: &str) -> Result<Flow> {
    let (name, argument) = match input.split_once(' ') {
        Some((name, argument)) => (name, argument.trim()),
        None => (input, ""),
    };

    match name {
        "/quit" | "/exit" => return Ok(Flow::Quit),
        "/open" => {
            if argument.is_empty() {
                println!("{}", "Usage: /open <page>".yellow());
            } else {
                let activation = site.dispatcher.load(Page::from_path(argument))?;
                print_activation(&site.dispatcher, &activation);
                site.settle()?;
            }
        }
        "/view" => {
            println!("{}", serde_json::to_string_pretty(site.dispatcher.view())?);
        }
        "/session" => {
            let gate = site.dispatcher.gate();
            if gate.is_authenticated() {
                let user = gate.current_user();
                println!("{}", format!("signed in as {} <{}>", user.name, user.email).bright_blue());
            } else {
                println!("{}", "anonymous".bright_blue());
            }
        }
        _ => println!("{}", format!("Unknown command: {}", name).bright_black()),
    }

    Ok(Flow::Continue)
}

fn json_command(site: &mut Site, input: &str) -> Result<()> {
    let command: Command = match serde_json::from_str(input) {
        Ok(command) => command,
        Err(e) => {
            println!("{}", format!("Invalid command: {}", e).red());
            return Ok(());
        }
    };

    let outcome = site.dispatcher.dispatch(command);
    print_outcome(&outcome);
    site.settle()
}
