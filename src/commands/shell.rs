use super::{
    CalendarCommand, ExecutableCommand, ExportCommand, GenerateCommand, ImportCommand,
    ListCommand, SettingsCommands, ToggleCommand, print_balance, print_status,
};
use crate::{Confirmation, KeyValueStore, Planner, Result};
use clap::Parser;
use std::io::{BufRead, Write};

const PROMPT: &str = "> ";
const SAVE_QUESTION: &str = "Would you save this preset locally? [s]ave / [n]o / anything else to close: ";

/// Commands understood inside the interactive shell.
#[derive(Debug, Parser)]
#[command(no_binary_name = true, rename_all = "kebab", disable_version_flag = true)]
pub enum ShellCommand {
    /// Mark or unmark day(s).
    #[command(aliases = ["t", "click"])]
    Toggle(ToggleCommand),
    /// Show or change the settings.
    #[command(subcommand)]
    Settings(SettingsCommands),
    /// Show the settings and what is left of the allowance.
    Status,
    /// Show what is left of the allowance.
    Balance,
    /// List the days taken.
    #[command(alias = "ls")]
    List(ListCommand),
    /// Draw the calendar.
    #[command(alias = "cal")]
    Calendar(CalendarCommand),
    /// Unmark every day.
    Reset,
    /// Optionally save locally, then export the plan to a file.
    Generate(GenerateCommand),
    /// Replace the plan with one from a file.
    Import(ImportCommand),
    /// Export the plan to a file without saving it locally.
    Export(ExportCommand),
    /// Leave the shell. Anything not saved is lost.
    #[command(aliases = ["exit", "q"])]
    Quit,
}

/// Splits a command line into words. Single or double quotes group words together.
pub(crate) fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote = None;
    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

/// A read-eval loop over the planner. Every line is handled to completion before the next is
/// read.
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }

    /// Asks whether to save locally. Running out of input counts as closing the question.
    fn ask_to_save(&mut self) -> Result<Confirmation> {
        write!(self.output, "{SAVE_QUESTION}")?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        Ok(match answer.trim().to_ascii_lowercase().as_str() {
            "s" | "save" | "y" | "yes" => Confirmation::Save,
            "n" | "no" => Confirmation::Decline,
            _ => Confirmation::Dismiss,
        })
    }

    fn dispatch<S: KeyValueStore>(
        &mut self,
        command: ShellCommand,
        planner: &mut Planner<S>,
    ) -> Result<()> {
        let out: &mut dyn Write = &mut self.output;
        match command {
            ShellCommand::Toggle(cmd) => cmd.execute(planner, out),
            ShellCommand::Settings(cmd) => cmd.execute(planner, out),
            ShellCommand::Status => print_status(planner, out),
            ShellCommand::Balance => print_balance(planner, out),
            ShellCommand::List(cmd) => cmd.execute(planner, out),
            ShellCommand::Calendar(cmd) => cmd.execute(planner, out),
            ShellCommand::Reset => {
                planner.reset();
                print_balance(planner, out)
            }
            ShellCommand::Generate(cmd) => {
                if let Err(e) = planner.settings().validate() {
                    writeln!(out, "Cannot generate yet: {e}.")?;
                    return Ok(());
                }
                let confirmation = match cmd.confirmation() {
                    Some(confirmation) => confirmation,
                    None => self.ask_to_save()?,
                };
                cmd.run(planner, confirmation, &mut self.output)
            }
            ShellCommand::Import(cmd) => cmd.execute(planner, out),
            ShellCommand::Export(cmd) => cmd.execute(planner, out),
            ShellCommand::Quit => Ok(()),
        }
    }

    pub fn run<S: KeyValueStore>(&mut self, planner: &mut Planner<S>) -> Result<()> {
        writeln!(
            self.output,
            "Type `help` for the list of commands and `quit` to leave."
        )?;
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };
            let words = split_words(&line);
            if words.is_empty() {
                continue;
            }
            match ShellCommand::try_parse_from(words) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => {
                    if let Err(e) = self.dispatch(command, planner) {
                        warn!("Command failed: {e}");
                        debug!("{:?}", e.backtrace());
                        writeln!(self.output, "error: {e}")?;
                    }
                }
                Err(e) => writeln!(self.output, "{}", e.render())?,
            }
        }
        Ok(())
    }
}
