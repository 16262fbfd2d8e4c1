mod audio;
mod config;
mod error;
mod logging;
mod scheduler;
mod timer;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::audio::{CueSet, SystemPlayer};
use crate::config::Config;
use crate::scheduler::{Scheduler, SessionState};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init_logging();

    let player = Arc::new(SystemPlayer::detect());
    let scheduler = Scheduler::new(Config::new(), player, CueSet::beside_executable());
    install_interrupt_report(scheduler.subscribe());

    scheduler.run().await;
}

/// On Ctrl-C, report where the session stood and exit. Nothing is saved.
fn install_interrupt_report(status: watch::Receiver<SessionState>) {
    let result = ctrlc::set_handler(move || {
        report_interrupt(&status.borrow());
        std::process::exit(0);
    });
    if let Err(err) = result {
        warn!("could not install Ctrl-C handler: {err}");
    }
}

fn report_interrupt(state: &SessionState) {
    info!(
        "interrupted during {}, {:.2} minutes studied this cycle",
        state.phase,
        state.studied_minutes()
    );
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;
    use tracing::Level;

    use super::*;
    use crate::logging::capture::capture_logs;
    use crate::scheduler::Phase;

    #[test]
    fn interrupt_report_is_a_single_log_line() {
        let (logs, _guard) = capture_logs(Level::INFO);
        report_interrupt(&SessionState {
            phase: Phase::ShortBreak,
            study_started_at: Instant::now(),
            accumulated: Duration::from_secs(45 * 60),
        });

        let logged = logs.contents();
        assert_eq!(logged.lines().count(), 1);
        assert!(!logged.starts_with('\n'));
        assert!(logged.contains("INFO"));
        assert!(logged.contains(
            "interrupted during short break, 45.00 minutes studied this cycle"
        ));
    }
}
