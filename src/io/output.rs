//! Output formatting and logging utilities

use std::fmt;
use std::fs::File;
use std::time::SystemTime as StdSystemTime;

use ising_mc::ising::analysis::{critical_temperature, TwoByTwo};
use ising_mc::ising::RunOutcome;
use tracing::info;
use tracing_subscriber::{
    fmt::format::Writer, fmt::layer, fmt::time::FormatTime, layer::SubscriberExt,
    util::SubscriberInitExt, Registry,
};

/// Time formatter with seconds precision (HH:MM:SS, UTC)
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let total_seconds = StdSystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Setup output logging to file or stdout
pub fn setup_output(output_path: Option<&String>) {
    match output_path {
        Some(path) => match File::create(path) {
            Ok(log) => {
                let file_layer = layer()
                    .with_writer(log)
                    .with_timer(SecondPrecisionTimer)
                    .with_ansi(false);
                Registry::default().with(file_layer).init();
                info!("Output will be written to: {}", path);
            }
            Err(err) => eprintln!("Could not create output file {}: {}", path, err),
        },
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true);
            Registry::default().with(stdout_layer).init();
        }
    }
}

/// Log the final state of one run. No averaging happens here; the record
/// sequence is left to downstream analysis.
pub fn report_outcome(outcome: &RunOutcome) {
    let spec = &outcome.spec;
    let sites = outcome.lattice.num_sites() as f64;

    let Some(last) = outcome.last() else {
        info!("L={:4} T={:.4}: no cycles recorded", spec.size, spec.temperature);
        return;
    };

    info!(
        "L={:4} T={:.4} (T/Tc={:.3}) cycles={}: E/N={:+.4} |M|/N={:.4} accepted={} ({:.2}%)",
        spec.size,
        spec.temperature,
        spec.temperature / critical_temperature(),
        outcome.records.len(),
        last.energy as f64 / sites,
        last.abs_magnetization as f64 / sites,
        last.accepted,
        100.0 * outcome.acceptance_ratio(),
    );

    if spec.size == 2 {
        let exact = TwoByTwo::at(spec.temperature);
        info!(
            "  exact 2x2 reference: <E>/N={:+.6} <|M|>/N={:.6} C_v={:.6} chi={:.6}",
            exact.mean_energy,
            exact.mean_abs_magnetization,
            exact.specific_heat,
            exact.susceptibility
        );
    }
}
