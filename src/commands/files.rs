use super::ExecutableCommand;
use crate::{Confirmation, ImportOutcome, KeyValueStore, Planner, Result, util::today};
use camino::Utf8PathBuf;
use clap::Args;
use clap_complete::{ArgValueCompleter, PathCompleter};
use std::io::Write;

fn export_dir<S: KeyValueStore>(planner: &Planner<S>, out: &Option<Utf8PathBuf>) -> Utf8PathBuf {
    out.clone()
        .unwrap_or_else(|| planner.config().export_dir().clone())
}

#[derive(Debug, Args)]
pub struct ExportCommand {
    #[arg(short, long, add = ArgValueCompleter::new(PathCompleter::dir()))]
    /// The directory to write the file to (defaults to the configured export directory).
    pub out: Option<Utf8PathBuf>,
}

impl ExecutableCommand for ExportCommand {
    fn execute<S: KeyValueStore>(self, planner: &mut Planner<S>, out: &mut dyn Write) -> Result<()> {
        let path = planner.export(&export_dir(planner, &self.out), today())?;
        writeln!(out, "Exported to {path}.")?;
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct ImportCommand {
    #[arg(short, long)]
    /// Also save the imported plan locally.
    pub save: bool,
    #[arg(add = ArgValueCompleter::new(PathCompleter::file()))]
    /// The exported JSON file to read.
    pub file: Utf8PathBuf,
}

impl ExecutableCommand for ImportCommand {
    fn execute<S: KeyValueStore>(self, planner: &mut Planner<S>, out: &mut dyn Write) -> Result<()> {
        match planner.import_file(&self.file) {
            ImportOutcome::Applied { holidays } => {
                writeln!(out, "Imported {holidays} holiday(s) from {}.", self.file)?;
                if self.save {
                    planner.save_locally()?;
                    writeln!(out, "Saved locally.")?;
                }
            }
            // Already logged; the plan is left as it was.
            ImportOutcome::Rejected { .. } => {}
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[arg(short, long, conflicts_with = "no_save")]
    /// Save locally without asking.
    pub save: bool,
    #[arg(short = 'n', long)]
    /// Don't save locally and don't ask.
    pub no_save: bool,
    #[arg(short, long, add = ArgValueCompleter::new(PathCompleter::dir()))]
    /// The directory to write the file to (defaults to the configured export directory).
    pub out: Option<Utf8PathBuf>,
}

impl GenerateCommand {
    /// The answer given on the command line, if any.
    pub fn confirmation(&self) -> Option<Confirmation> {
        if self.save {
            Some(Confirmation::Save)
        } else if self.no_save {
            Some(Confirmation::Decline)
        } else {
            None
        }
    }

    pub fn run<S: KeyValueStore>(
        self,
        planner: &mut Planner<S>,
        confirmation: Confirmation,
        out: &mut dyn Write,
    ) -> Result<()> {
        let dir = export_dir(planner, &self.out);
        let path = planner.generate(confirmation, &dir, today())?;
        if confirmation.is_save() {
            writeln!(out, "Saved locally.")?;
        }
        writeln!(out, "Exported to {path}.")?;
        Ok(())
    }
}

impl ExecutableCommand for GenerateCommand {
    /// Without `--save` or `--no-save` this behaves like a dismissed question.
    fn execute<S: KeyValueStore>(self, planner: &mut Planner<S>, out: &mut dyn Write) -> Result<()> {
        let confirmation = self.confirmation().unwrap_or(Confirmation::Dismiss);
        self.run(planner, confirmation, out)
    }
}
