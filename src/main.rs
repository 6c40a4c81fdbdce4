use bug_origin_miner::config::Config;
use bug_origin_miner::{ingest, report, resolve, store::Store};

fn main() {
    if let Err(err) = run() {
        log::error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::from_args()?;

    env_logger::Builder::new().filter_level(config.log_level).init();

    let mut db = Store::open(&config.database)?;

    if config.build {
        let repo = ingest::open_repository(config.repo_path())?;
        ingest::ingest(&repo, &mut db, ingest::DEFAULT_EXTENSIONS)?;
    }

    let bugs = resolve::resolve_all(&db.conn, config.from, config.to)?;
    report::print_report(&bugs);

    Ok(())
}
