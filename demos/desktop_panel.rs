//! Desktop replay of a touch session through the mock hardware.
//!
//! Runs the same controller the firmware runs, fed by a scripted sequence
//! of raw touch readings, and prints every datagram the mock link receives.
//! Useful for checking calibration and layout changes without a board.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example desktop_panel
//! ```
//!
//! # Configuration
//!
//! Edit the `Config::default()` call in `main()` to try other calibration
//! policies, presets or framing.

use cyd_remote::hal::{MockClock, MockDisplay, MockTouch, MockTransport};
use cyd_remote::traits::{Clock, PanelDisplay};
use cyd_remote::{
    CalibrationPolicy, Config, PanelCommand, PanelConfig, PanelController, TickOutcome,
    TouchConfig,
};

/// Scripted operator actions in raw sensor units.
enum Step {
    Tap(u16, u16, &'static str),
    Drag(&'static [(u16, u16)], &'static str),
    LinkDown(&'static str),
}

const SCRIPT: &[Step] = &[
    Step::Tap(400, 500, "Prop Start"),
    Step::Tap(3000, 1200, "Weight Stop"),
    Step::Tap(1900, 2500, "Lights (on)"),
    Step::Tap(1900, 2500, "Lights (off)"),
    Step::Drag(&[(400, 1900), (3000, 1900)], "Left, dragged onto Right"),
    Step::Tap(400, 3250, "10 RPM"),
    Step::Tap(3500, 3250, "60 RPM"),
    Step::LinkDown("Prop Stop while the radio is down"),
    Step::Tap(100, 100, "Corner outside the calibration"),
];

/// Loop interval, matching the firmware default
const TICK_MS: u64 = 5;

fn main() {
    println!("=================================");
    println!("  cyd-remote Desktop Panel");
    println!("=================================");
    println!();

    let config = Config::default()
        .with_touch(TouchConfig::default().with_policy(CalibrationPolicy::Adaptive))
        .with_panel(PanelConfig::default().with_rpm_presets(&[10, 30, 60]));

    let mut controller =
        match PanelController::from_config(MockTouch::new(), MockTransport::new(), &config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Invalid configuration: {}", e);
                return;
            }
        };
    let mut display = MockDisplay::new();
    let mut clock = MockClock::new();
    let _ = display.init();

    println!("Receiver: {}", config.link.peer);
    println!();

    for step in SCRIPT {
        let name = match step {
            Step::Tap(x, y, name) => {
                controller.sensor_mut().queue_tap(*x, *y);
                name
            }
            Step::Drag(points, name) => {
                controller.sensor_mut().queue_drag(points);
                name
            }
            Step::LinkDown(name) => {
                controller.dispatcher_mut().transport_mut().ready = false;
                controller.sensor_mut().queue_tap(3000, 500);
                name
            }
        };

        println!("> {}", name);
        while !controller.sensor().queue.is_empty() {
            clock.advance(TICK_MS);
            match controller.tick(clock.now_ms()) {
                TickOutcome::Idle => {}
                TickOutcome::Dispatched(cmd) => println!("  sent {:?}", cmd),
                TickOutcome::Failed(cmd, e) => println!("  {:?} failed: {}", cmd, e),
            }
            if controller.take_redraw() {
                let _ = display.render(&controller.view());
            }
        }
        if let Some(status) = &display.last_status {
            println!("  status: {}", status);
        }
        controller.dispatcher_mut().transport_mut().ready = true;
    }

    println!();
    println!("Datagrams on the air:");
    for payload in controller.dispatcher().transport().sent_payloads() {
        match PanelCommand::from_payload(payload) {
            Some(cmd) => println!("  {:<14} receiver sees {:?}", payload, cmd),
            None => println!("  {:<14} not understood by the receiver", payload),
        }
    }

    let stats = controller.dispatcher().stats();
    let bounds = controller.normalizer().bounds();
    println!();
    println!("Sent {}, failed {}", stats.sent, stats.failed);
    println!(
        "Calibration now x {}..{} y {}..{}",
        bounds.min_x(),
        bounds.max_x(),
        bounds.min_y(),
        bounds.max_y()
    );
    println!("Frames drawn: {}", display.render_count);
}
