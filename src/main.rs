use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tokio::net::TcpListener;

use pilot_pay_engine::api::{AnnualRequest, AppState, OvertimeRequest, create_router};
use pilot_pay_engine::calculation::{calculate_annual, calculate_overtime};
use pilot_pay_engine::config::ConfigLoader;
use pilot_pay_engine::error::EngineError;
use pilot_pay_engine::models::{Aircraft, Seat};

#[derive(Parser, Debug)]
#[command(
    name = "pilot-pay",
    version,
    about = "Pilot compensation engine: annual pay, deductions and overtime under a collective agreement"
)]
struct Cli {
    /// Contract configuration directory.
    #[arg(long, global = true, default_value = "./config/contract")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API.
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Calculate annual compensation and print it as JSON.
    Annual {
        #[command(flatten)]
        position: PositionArgs,
        /// Average credited hours per month (0-744).
        #[arg(long)]
        hours: Decimal,
        /// Profit-share election as a fraction of gross (0.05 = 5%).
        #[arg(long, default_value_t = Decimal::ZERO)]
        profit_share: Decimal,
    },
    /// Value an overtime credit and print it as JSON.
    Overtime {
        #[command(flatten)]
        position: PositionArgs,
        /// Whole credit hours.
        #[arg(long)]
        credit_hours: u32,
        /// Credit minutes (0-59).
        #[arg(long, default_value_t = 0)]
        credit_minutes: u32,
    },
    /// Print the resolved pay table for a year.
    Rates {
        #[arg(long)]
        year: i32,
    },
}

#[derive(Args, Debug)]
struct PositionArgs {
    /// Seat: captain, first_officer or relief_pilot (CA/FO/RP).
    #[arg(long)]
    seat: Seat,
    /// Aircraft code, e.g. b777.
    #[arg(long)]
    aircraft: Aircraft,
    #[arg(long)]
    year: i32,
    /// Step held on January 1.
    #[arg(long, required_unless_present = "tie_step")]
    step: Option<u8>,
    /// Derive the step from the year instead.
    #[arg(long)]
    tie_step: bool,
    /// Apply the special per-hour premium.
    #[arg(long)]
    special_rate: bool,
    /// Region code, e.g. ON.
    #[arg(long, default_value = "ON")]
    region: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let loader = match ConfigLoader::load(&cli.config) {
        Ok(loader) => loader,
        Err(err) => {
            eprintln!("Failed to load {}: {}", cli.config.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let outcome = match cli.command {
        Command::Serve { port } => serve(loader, port).await,
        Command::Annual {
            position,
            hours,
            profit_share,
        } => AnnualRequest {
            seat: position.seat,
            aircraft: position.aircraft,
            year: position.year,
            step: position.step,
            tie_step_to_year: position.tie_step,
            special_rate: position.special_rate,
            avg_monthly_hours: hours,
            region: position.region,
            profit_share_percent: profit_share,
            hire_date: None,
        }
        .validate()
        .and_then(|input| calculate_annual(&input, loader.config()))
        .map_err(|err| err.to_string())
        .and_then(|result| print_json(&result)),
        Command::Overtime {
            position,
            credit_hours,
            credit_minutes,
        } => OvertimeRequest {
            seat: position.seat,
            aircraft: position.aircraft,
            year: position.year,
            step: position.step,
            tie_step_to_year: position.tie_step,
            special_rate: position.special_rate,
            region: position.region,
            credit_hours,
            credit_minutes,
        }
        .validate()
        .and_then(|input| calculate_overtime(&input, loader.config()))
        .map_err(|err| err.to_string())
        .and_then(|result| print_json(&result)),
        Command::Rates { year } => loader
            .registry()
            .table(year)
            .map_err(|err: EngineError| err.to_string())
            .and_then(print_json),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(loader: ConfigLoader, port: u16) -> Result<(), String> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = create_router(AppState::new(loader));

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| format!("cannot bind {addr}: {err}"))?;
    println!("Pilot pay API listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {err}"))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|err| err.to_string())?;
    println!("{json}");
    Ok(())
}
