use super::{ExecutableCommand, print_settings};
use crate::{KeyValueStore, Planner, Result, SettingsBuilder};
use clap::{Args, Subcommand, ValueEnum};
use std::io::Write;

#[derive(Debug, Subcommand)]
#[command(rename_all = "kebab")]
pub enum SettingsCommands {
    /// Print the current settings.
    #[command(alias = "get")]
    Show,
    /// Change one or more settings.
    Set(SetSettingsCommand),
}

impl ExecutableCommand for SettingsCommands {
    fn execute<S: KeyValueStore>(self, planner: &mut Planner<S>, out: &mut dyn Write) -> Result<()> {
        match self {
            Self::Show => print_settings(planner, out),
            Self::Set(cmd) => cmd.execute(planner, out),
        }
    }
}

#[derive(Debug, Args, Default)]
pub struct SetSettingsCommand {
    #[arg(short, long)]
    /// Your name.
    pub name: Option<String>,
    #[arg(short = 'a', long)]
    /// Holiday days granted this year.
    pub allowance: Option<u32>,
    #[arg(short = 'p', long)]
    /// Days carried over from last year.
    pub carried_over: Option<u32>,
    #[arg(short = 'r', long)]
    /// Leftover hours, counted as whole days per full working day.
    pub leftover_hours: Option<u32>,
    #[arg(short, long)]
    /// Whether the calendar shows Saturdays and Sundays.
    pub weekends: Option<bool>,
    #[arg(long, value_enum)]
    /// Empty a field again. Applied after the values above.
    pub clear: Vec<ClearableField>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClearableField {
    Name,
    Allowance,
    CarriedOver,
    LeftoverHours,
    /// Back to unset, which hides weekends.
    Weekends,
}

impl ClearableField {
    fn clear(self, builder: &mut SettingsBuilder) {
        match self {
            Self::Name => builder.name(""),
            Self::Allowance => builder.holiday_allowance(None::<u32>),
            Self::CarriedOver => builder.previous_holiday_allowance(None::<u32>),
            Self::LeftoverHours => builder.leftover_hours_budget(None::<u32>),
            Self::Weekends => builder.show_weekends(None::<bool>),
        };
    }
}

macro_rules! impl_into_settings_builder {
    ($type:ident { $($arg:ident => $field:ident),* $(,)? }) => {
        impl From<$type> for SettingsBuilder {
            fn from(value: $type) -> Self {
                let mut builder = SettingsBuilder::default();
                $(
                    if let Some(attr) = value.$arg {
                        builder.$field(attr);
                    }
                )*
                builder
            }
        }
    };
}

impl_into_settings_builder! {
    SetSettingsCommand {
        name => name,
        allowance => holiday_allowance,
        carried_over => previous_holiday_allowance,
        leftover_hours => leftover_hours_budget,
        weekends => show_weekends,
    }
}

impl SetSettingsCommand {
    fn into_builder(mut self) -> SettingsBuilder {
        let clear = std::mem::take(&mut self.clear);
        let mut builder = SettingsBuilder::from(self);
        for field in clear {
            field.clear(&mut builder);
        }
        builder
    }
}

impl ExecutableCommand for SetSettingsCommand {
    fn execute<S: KeyValueStore>(self, planner: &mut Planner<S>, out: &mut dyn Write) -> Result<()> {
        planner.update_settings(self.into_builder());
        print_settings(planner, out)
    }
}
