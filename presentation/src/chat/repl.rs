//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::output::formatter::OutputFormatter;
use crate::progress::reporter::stage_reporter;
use colored::Colorize;
use medguard_application::RunPipelineUseCase;
use medguard_domain::{OutputFormat, PipelineState};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;

/// A slash command typed at the chat prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    History,
    Reset,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with '/'. Returns `None` for anything else.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }

        Some(match line {
            "/quit" | "/exit" | "/q" => Self::Quit,
            "/help" | "/h" | "/?" => Self::Help,
            "/history" => Self::History,
            "/reset" | "/clear" => Self::Reset,
            other => Self::Unknown(other.to_string()),
        })
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: Arc<RunPipelineUseCase>,
    format: OutputFormat,
    show_progress: bool,
    history_file: Option<PathBuf>,
    previous: Option<PipelineState>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(use_case: Arc<RunPipelineUseCase>) -> Self {
        Self {
            use_case,
            format: OutputFormat::Answer,
            show_progress: true,
            history_file: dirs::data_dir().map(|p| p.join("medguard").join("history.txt")),
            previous: None,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Set the per-turn output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Override where readline history is kept
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.history_file = path;
        }
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline("medguard> ") {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if let Some(command) = ReplCommand::parse(line) {
                        if self.handle_command(command) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        let params = self.use_case.params();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            MedGuard - Chat Mode             │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Retrieving {} records, keeping top {}, markers: {}",
            params.retrieval_k, params.rerank_top_k, params.speculation_markers
        );
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /history          - Show the conversation so far");
        println!("  /reset            - Forget the conversation");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                true
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
                false
            }
            ReplCommand::History => {
                println!();
                match &self.previous {
                    Some(state) => print!("{}", ConsoleFormatter::format_history(state.history())),
                    None => println!("  {}", "(no turns yet)".dimmed()),
                }
                println!();
                false
            }
            ReplCommand::Reset => {
                self.previous = None;
                println!("Conversation cleared.");
                false
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_question(&mut self, question: &str) {
        println!();

        let result = if self.show_progress {
            let progress = stage_reporter();
            self.use_case
                .execute_with_progress(question, self.previous.as_ref(), progress.as_ref())
                .await
        } else {
            self.use_case.execute(question, self.previous.as_ref()).await
        };

        match result {
            Ok(state) => {
                println!("{}", ConsoleFormatter.render(&state, self.format));
                self.previous = Some(state);
            }
            // A failed turn leaves the conversation as it was.
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
            }
        }
        println!();
    }
}
