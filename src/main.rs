use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use furnstock::{
    persist::{PersistResult, SnapshotStore, sqlite::SqliteSnapshotStore, text::SeedFile},
    service::{Inventory, InventoryConfig},
    shell::{self, Command, Outcome},
};

fn main() -> ExitCode {
    init_tracing();

    let backing_path = std::env::args_os().nth(1).map(PathBuf::from);
    match run(backing_path.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("furnstock: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so they never interleave with command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(backing_path: Option<&Path>) -> PersistResult<()> {
    let config = InventoryConfig::default();
    let mut backing = backing_path.map(open_backing).transpose()?;

    let mut inventory = match &backing {
        Some(store) => store.load(&config)?.0,
        None => Inventory::with_config(&config),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    write!(stdout, "> ")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match Command::parse(&line).and_then(|cmd| shell::execute(&mut inventory, cmd)) {
                Ok(Outcome::Lines(lines)) => {
                    for out in lines {
                        writeln!(stdout, "{out}")?;
                    }
                }
                Ok(Outcome::Quit) => break,
                Err(err) => writeln!(stdout, "error: {err}")?,
            }
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
    }
    writeln!(stdout)?;

    if let Some(store) = backing.as_mut() {
        store.save(&inventory)?;
    }
    Ok(())
}

fn open_backing(path: &Path) -> PersistResult<Box<dyn SnapshotStore>> {
    let is_sqlite = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "db" | "sqlite" | "sqlite3"));

    if is_sqlite {
        Ok(Box::new(SqliteSnapshotStore::open(path)?))
    } else {
        Ok(Box::new(SeedFile::new(path)))
    }
}
