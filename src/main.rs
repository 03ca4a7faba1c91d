use anyhow::Result;
use context_select::{Session, batch, config::Config, structure, tree::TreeBuilder, ui};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::from_cli()?;
    // Logging to stderr would tear the TUI, keep it quiet there unless asked.
    init_tracing(if config.is_batch() { "warn" } else { "off" });

    let mut session = Session::new(TreeBuilder::default(), &config.output_root);
    session.open(&config.base)?;

    if config.print_tree {
        print!("{}", structure::render(session.tree()));
        return Ok(());
    }
    if config.is_batch() {
        batch::run(&mut session, &config)?;
    } else {
        ui::browse_tui(session)?;
    }
    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
