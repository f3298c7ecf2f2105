//! Demonstration driver for `clientbook_core`.
//!
//! # Responsibility
//! - Own the connection and every unit of work; the core only issues
//!   statements.
//! - Replay a fixed sample session and print two searches.

use clap::Parser;
use clientbook_core::{
    create_schema, default_log_level, drop_schema_if_exists, init_logging, open_db,
    open_db_in_memory, with_unit_of_work, ClientPhoneRow, ClientQuery, ClientService, RepoError,
};
use log::{error, info};
use rusqlite::Connection;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "clientbook", version, about = "Client book sample session")]
struct Args {
    /// SQLite database file; an in-memory database is used when omitted.
    #[arg(long, env = "CLIENTBOOK_DB")]
    db: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "CLIENTBOOK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; stderr when omitted.
    #[arg(long, env = "CLIENTBOOK_LOG_DIR")]
    log_dir: Option<String>,

    /// Print search results as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, args.log_dir.as_deref()) {
        eprintln!("clientbook: {err}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=session module=cli status=error error={err}");
            eprintln!("clientbook: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = match args.db.as_ref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };

    reset_schema(&mut conn)?;
    seed_sample_clients(&mut conn)?;
    edit_sample_clients(&mut conn)?;

    let service = ClientService::sqlite(&conn);
    let by_last_name = service.find_clients(&ClientQuery::default().last_name("Sanyich"))?;
    let by_phone = service.find_clients(&ClientQuery::by_phone(79_999_999_998))?;

    print_rows("last_name = Sanyich", &by_last_name, args.json)?;
    print_rows("phone = 79999999998", &by_phone, args.json)?;

    info!(
        "event=session module=cli status=ok rows_by_last_name={} rows_by_phone={}",
        by_last_name.len(),
        by_phone.len()
    );
    Ok(())
}

fn reset_schema(conn: &mut Connection) -> Result<(), RepoError> {
    with_unit_of_work(conn, |tx| -> Result<(), RepoError> {
        drop_schema_if_exists(tx)?;
        create_schema(tx)?;
        Ok(())
    })
}

fn seed_sample_clients(conn: &mut Connection) -> Result<(), RepoError> {
    with_unit_of_work(conn, |tx| -> Result<(), RepoError> {
        let service = ClientService::sqlite(tx);
        service.create_client("Ruslan", "Akhmarov", "ari@gmail.com", &[])?;
        service.create_client("Ruslan", "Imposter", "arimp@gmail.com", &[])?;
        service.create_client("Vasya", "Pupkin", "vasyap@ya.ru", &[79_999_999_999])?;
        service.create_client(
            "Sanya",
            "Sanyich",
            "sasanya@mail.ru",
            &[79_999_999_997, 79_999_999_998],
        )?;
        Ok(())
    })
}

fn edit_sample_clients(conn: &mut Connection) -> Result<(), RepoError> {
    with_unit_of_work(conn, |tx| -> Result<(), RepoError> {
        let service = ClientService::sqlite(tx);
        service.add_phone(79_999_999_991, 1)?;
        service.update_client(3, "Vanya", "Dupkin", "vanyad@ya.ru", None)?;
        service.delete_phone(79_999_999_999)?;
        service.delete_client(2)?;
        Ok(())
    })
}

fn print_rows(
    title: &str,
    rows: &[ClientPhoneRow],
    json: bool,
) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(rows)?);
        return Ok(());
    }

    println!("# {title}");
    if rows.is_empty() {
        println!("(no rows)");
    }
    for row in rows {
        println!("{row}");
    }
    Ok(())
}
