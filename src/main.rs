use clap::CommandFactory;
use clap_complete::CompleteEnv;
use holiday_planner::{Cli, Result};

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    CompleteEnv::with_factory(Cli::command).complete();
    pretty_env_logger::init();
    color_backtrace::install();
    let cli = Cli::default();
    cli.execute()
}
