use crate::error::Result;
use crate::simulator::clock::Clock;
use crate::simulator::machine::{Dashboard, ScanEvent, ScanSimulator};
use rand::Rng;

// counter progress is logged once per this many ticks
const TICK_LOG_STRIDE: u32 = 10;

/// Plays one session against `clock`, sleeping until each timer is due and
/// handing every event to `on_event`. Returns the settled dashboard.
pub fn run_session<C, R, F>(
    clock: &C,
    simulator: &mut ScanSimulator<R>,
    file_name: &str,
    mut on_event: F,
) -> Result<Dashboard>
where
    C: Clock,
    R: Rng,
    F: FnMut(&ScanEvent),
{
    let submitted = simulator.submit(file_name).map(|_| ());
    for event in simulator.drain_events() {
        on_event(&event);
    }
    submitted?;

    let clock_base = clock.elapsed();
    let sim_base = simulator.now();

    while let Some(deadline) = simulator.next_deadline() {
        clock.sleep_until(clock_base + (deadline - sim_base));
        simulator.advance_to(deadline);
        for event in simulator.drain_events() {
            on_event(&event);
        }
    }

    Ok(simulator
        .session()
        .map(|s| s.dashboard.clone())
        .unwrap_or_default())
}

pub fn log_event(event: &ScanEvent) {
    match event {
        ScanEvent::Notified { message } => log::warn!("{}", message),
        ScanEvent::Superseded { session_id, state } => {
            log::info!("Session {} superseded while {:?}", session_id, state)
        }
        ScanEvent::StateChanged {
            session_id,
            from,
            to,
            at,
        } => log::info!(
            "[{:>5} ms] {} {:?} -> {:?}",
            at.as_millis(),
            session_id,
            from,
            to
        ),
        ScanEvent::CounterTicked { value, color, at } => {
            if value % TICK_LOG_STRIDE == 0 {
                log::info!("[{:>5} ms] threat level {}% ({})", at.as_millis(), value, color.hex());
            } else {
                log::debug!("[{:>5} ms] threat level {}%", at.as_millis(), value);
            }
        }
        ScanEvent::BarsRevealed { at } => {
            log::info!("[{:>5} ms] category bars revealed", at.as_millis())
        }
        ScanEvent::StatusFinalized { banner, at } => log::info!(
            "[{:>5} ms] {} ({})",
            at.as_millis(),
            banner.status.label(),
            banner.color.hex()
        ),
    }
}
