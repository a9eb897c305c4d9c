use anyhow::Result;
use std::env;
use std::io;

use ledgerly::accounting::ledger::Ledger;
use ledgerly::shell::Shell;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() > 2 {
        eprintln!("Usage: cargo run -- [ledger_file]");
        std::process::exit(1);
    }

    let mut ledger = Ledger::new();
    let mut shell = Shell::new(io::stdin().lock(), io::stdout());
    if let Some(path) = args.get(1) {
        shell.load_path(&mut ledger, path)?;
    }
    shell.run(&mut ledger)?;

    Ok(())
}
