use quantum_sentinel::simulator::driver::{log_event, run_session};
use quantum_sentinel::simulator::{ScanSimulator, SystemClock};
use quantum_sentinel::{server, Config, Result, SentinelError};

const USAGE: &str = "usage: quantum-sentinel [serve | simulate <file.apk>]";

fn run_server() -> Result<()> {
    let config = Config::from_env()?;
    let server = server::bind(&config)?;

    log::info!("Quantum Sentinel running at http://localhost:{}", config.port);
    log::info!("Serving static files from {}", config.public_dir.display());

    server::serve(&server, &config);
    Ok(())
}

fn run_simulation(file_name: &str) -> Result<()> {
    let clock = SystemClock::new();
    let mut simulator = ScanSimulator::from_entropy();

    let dashboard = run_session(&clock, &mut simulator, file_name, log_event)?;

    if let Some(report) = dashboard.report {
        for (category, value) in report.iter() {
            log::info!("{:<12} {:>3}%", category, value);
        }
    }
    if let Some(session) = simulator.session() {
        log::info!(
            "Session {} settled after {} ms",
            session.id,
            session.elapsed(simulator.now()).as_millis()
        );
    }
    log::info!("Dashboard: {}", serde_json::to_string(&dashboard)?);
    Ok(())
}

/// Message for a fatal error, or `None` when it was already shown to the
/// user (a rejected file is reported through its notification event).
fn failure_message(error: &SentinelError) -> Option<String> {
    match error {
        SentinelError::InvalidSubmission { .. } => None,
        other => Some(other.to_string()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] | ["serve"] => run_server(),
        ["simulate", file_name] => run_simulation(file_name),
        _ => {
            log::error!("{}", USAGE);
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        if let Some(message) = failure_message(&e) {
            log::error!("{}", message);
        }
        std::process::exit(1);
    }
}
