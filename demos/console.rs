//! Console front end for the booking form
//!
//! Reads commands from stdin:
//!
//! ```text
//! sender.fullName=A Kumar
//! package.weight=2
//! submit
//! reset
//! show
//! quit
//! ```
//!
//! An optional first argument names a YAML configuration file.

use anyhow::Result;
use booking::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("booking=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => FormConfig::from_yaml_file(&path)?,
        None => FormConfig::default(),
    };

    let (form, bus) = BookingFormController::with_event_bus(config)?;

    // Toast stand-in: print every announcement
    let mut events = bus.subscribe();
    let notifier = tokio::spawn(async move {
        while let Ok(envelope) = events.recv().await {
            match &envelope.event {
                FormEvent::Submitted { record } => {
                    println!("✔ {}", envelope.event.notice());
                    println!("{}", serde_json::to_string_pretty(record).unwrap_or_default());
                }
                FormEvent::Rejected { errors } => {
                    println!("✘ {}", envelope.event.notice());
                    for (path, message) in errors.iter() {
                        println!("  {}: {}", path, message);
                    }
                }
                FormEvent::Reset => println!("(form reset)"),
            }
        }
    });

    println!("{}", render_text(&form.snapshot()?));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "submit" => {
                if form.submit()? == SubmitOutcome::Ignored {
                    println!("Already submitted, waiting for reset");
                }
            }
            "reset" => form.reset_form()?,
            "show" => println!("{}", render_text(&form.snapshot()?)),
            _ => match line.split_once('=') {
                Some((path, value)) => form.on_field_change(path.trim(), value)?,
                None => println!("Expected path=value, submit, reset, show or quit"),
            },
        }
    }

    form.shutdown()?;
    drop(form);
    drop(bus);
    notifier.await?;
    Ok(())
}
