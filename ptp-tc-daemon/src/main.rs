use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration as StdDuration;

use clap::Parser;
use ptp_core::clock::Clock;
use ptp_core::config::PortIndex;
use ptp_core::datastructures::messages::Message;
use ptp_core::network::{SystemClock, Transport, TransportKind};
use ptp_tc_daemon::config::Config;
use ptp_tc_daemon::transport::{LoopbackTransport, WallClock};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[clap(short, long)]
    config: PathBuf,

    /// Logging verbosity.
    #[clap(short, long, default_value = "info")]
    loglevel: tracing::Level,

    /// Interval between BMCA runs, in milliseconds.
    #[clap(long, default_value_t = 1000)]
    bmca_interval_ms: u64,

    /// Number of BMCA ticks to run before exiting; omit to run forever.
    #[clap(long)]
    ticks: Option<u64>,
}

fn main() {
    let args = Args::parse();
    ptp_tc_daemon::setup_logging(args.loglevel);

    let config = match Config::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let (instance, quality, clock_type, redundancy, comparator, port_configs) = config.build();
    let port_count = port_configs.len();
    let mut clock = Clock::new(instance, quality, clock_type, redundancy, comparator, port_configs);

    // This daemon has no real transport — there is nothing listening on a
    // socket to hand `dispatch_ingress` a received message.
    // The loopback transport and wall clock below exist so `run_bmca` and
    // the transparent-clock path are exercised the same way a production
    // daemon would drive them, against recorded sends instead of a wire.
    let mut transport = LoopbackTransport::new();
    let system_clock = WallClock::default();

    tracing::info!(ports = port_count, "ptp-tc-daemon starting");

    let mut tick = 0u64;
    loop {
        let now = system_clock.monotonic_now();
        clock.run_bmca(now);
        clock.prune_stale(now);

        // `run_bmca` itself never sends; this only drains whatever a real
        // ingress-driven `dispatch_ingress` call would have queued, keeping
        // the loopback transport's queue bounded across ticks.
        for (port, kind, _message) in transport.drain() {
            tracing::trace!(port = port.0, ?kind, "recorded loopback send");
        }

        tick += 1;
        if let Some(limit) = args.ticks {
            if tick >= limit {
                break;
            }
        }
        std::thread::sleep(StdDuration::from_millis(args.bmca_interval_ms));
    }
}
