use clap::Parser;
use log::info;

use memostash::{App, Cli, Config, FileStore, NoteStore, Result};

pub fn initialize_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::resolve(cli.data_dir)?;
    if cli.editor.is_some() {
        config.editor_command = cli.editor;
    }

    let kv = FileStore::open(config.data_dir.clone())?;
    let store = NoteStore::open(kv);

    let mut app = App::new(store, config);
    app.run(cli.command)
}

fn main() {
    initialize_logger();

    let cli = Cli::parse();
    info!("memostash starting up");

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
