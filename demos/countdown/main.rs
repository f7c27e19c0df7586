//! Countdown demo: type digits, press `s` to start, `q` to quit.
//!
//! Logs go to `countdown.log`; set `RUST_LOG=bubbletea_countdown=debug` to
//! see state transitions.

use bubbletea_countdown::countdown::{Model as Countdown, TimeUpMsg};
use bubbletea_rs::{quit, Cmd, KeyMsg, Model, Msg, Program};
use crossterm::event::{KeyCode, KeyModifiers};
use std::fs::File;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct App {
    countdown: Countdown,
    finished_runs: usize,
}

impl Model for App {
    fn init() -> (Self, Option<Cmd>) {
        let app = Self {
            countdown: Countdown::new(),
            finished_runs: 0,
        };
        (app, None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            let ctrl_c =
                key.key == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
            if ctrl_c || key.key == KeyCode::Char('q') || key.key == KeyCode::Esc {
                return Some(quit());
            }
        }

        if let Some(done) = msg.downcast_ref::<TimeUpMsg>() {
            if done.id == self.countdown.id() {
                self.finished_runs += 1;
                info!(runs = self.finished_runs, "countdown finished");
            }
            return None;
        }

        self.countdown.update(msg)
    }

    fn view(&self) -> String {
        format!(
            "\n  Countdown\n\n{}\n\n  finished runs: {} • q quit\n",
            self.countdown.view(),
            self.finished_runs
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log = File::create("countdown.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bubbletea_countdown=info")),
        )
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    let program = Program::<App>::builder()
        .alt_screen(true)
        .signal_handler(true)
        .build()?;
    program.run().await?;
    Ok(())
}
