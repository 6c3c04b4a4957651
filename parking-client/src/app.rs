//! Console front ends wiring api, pollers, dispatchers and the terminal surface.
use std::future::Future;
use std::io::Write;
use std::sync::Arc;

use parking_common::validate::normalize_slot_id;
use parking_common::{BookingForm, SlotForm};

use crate::api::{HttpParkingApi, ParkingApi};
use crate::config::ClientConfig;
use crate::console::{CommandType, Console, ParsedCommand};
use crate::dispatch::{AdminDispatcher, BookingDispatcher, BookingOutcome, Confirm};
use crate::poller::{AdminPoller, BookingPoller, PollingTask, StatusPoller};
use crate::surface::TerminalSurface;

pub const BOOKING_HELP: &str = "\
Commands:
  \\book <slot> <plate> <mobile> <hours>   reserve a slot and get the payment link
  \\refresh                                reload the slot grid
  \\help                                   show this help
  \\quit                                   leave";

pub const ADMIN_HELP: &str = "\
Commands:
  \\add <slot> <price>    add a slot
  \\remove <slot>         remove a free slot
  \\release <slot>        release an occupied slot
  \\refresh               reload the dashboard
  \\help                  show this help
  \\quit                  leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Handle one booking console command.
pub async fn handle_booking_command(
    cmd: &ParsedCommand,
    dispatcher: &BookingDispatcher,
    poller: &dyn StatusPoller,
) -> Result<Flow, &'static str> {
    match cmd.command_type {
        CommandType::Book => {
            let form = BookingForm {
                slot_id: cmd.arg(0).to_string(),
                vehicle_plate: cmd.arg(1).to_string(),
                mobile_number: cmd.arg(2).to_string(),
                duration_hours: cmd.arg(3).to_string(),
            };
            match dispatcher.submit(&form).await {
                BookingOutcome::Navigating(_) => Ok(Flow::Exit),
                _ => Ok(Flow::Continue),
            }
        }
        CommandType::Refresh => {
            poller.refresh().await;
            Ok(Flow::Continue)
        }
        CommandType::Quit => Ok(Flow::Exit),
        CommandType::Help => Err(BOOKING_HELP),
        _ => Err("Unknown command, type \\help for the list."),
    }
}

/// Handle one admin console command.
pub async fn handle_admin_command(
    cmd: &ParsedCommand,
    dispatcher: &AdminDispatcher,
    poller: &dyn StatusPoller,
    confirm: &mut dyn Confirm,
) -> Result<Flow, &'static str> {
    match cmd.command_type {
        CommandType::Add => {
            let form = SlotForm {
                slot_id: cmd.arg(0).to_string(),
                price: cmd.arg(1).to_string(),
            };
            dispatcher.create_slot(&form).await;
            Ok(Flow::Continue)
        }
        CommandType::Remove | CommandType::Release => {
            let slot_id = normalize_slot_id(cmd.arg(0));
            if slot_id.is_empty() {
                return Err("Which slot? Give the slot id after the command.");
            }
            if cmd.command_type == CommandType::Remove {
                dispatcher.remove_slot(&slot_id, confirm).await;
            } else {
                dispatcher.release_slot(&slot_id, confirm).await;
            }
            Ok(Flow::Continue)
        }
        CommandType::Refresh => {
            poller.refresh().await;
            Ok(Flow::Continue)
        }
        CommandType::Quit => Ok(Flow::Exit),
        CommandType::Help => Err(ADMIN_HELP),
        _ => Err("Unknown command, type \\help for the list."),
    }
}

/// Wait for the next console line, or `None` on end of input or shutdown.
async fn next_line<W, S>(console: &mut Console<W>, shutdown: S) -> anyhow::Result<Option<String>>
where
    W: Write,
    S: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        line = console.next_line() => Ok(line?),
        signal = shutdown => {
            if let Err(e) = signal {
                tracing::warn!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutdown signal received.");
            Ok(None)
        }
    }
}

/// Public booking console: slot grid every few seconds plus `\book`.
pub async fn run_booking(config: &ClientConfig) -> anyhow::Result<()> {
    let api: Arc<dyn ParkingApi> = Arc::new(HttpParkingApi::new(&config.api)?);
    let surface = Arc::new(TerminalSurface::stdout());
    let poller = Arc::new(BookingPoller::new(api.clone(), surface.clone(), config.poll.latest_wins));
    let dispatcher = BookingDispatcher::new(api, surface, poller.clone());

    let task = PollingTask::start(poller.clone(), config.poll.booking_interval());

    let mut console = Console::stdin()?;
    console.say(BOOKING_HELP);

    while let Some(line) = next_line(&mut console, tokio::signal::ctrl_c()).await? {
        let cmd = ParsedCommand::parse(&line);
        if cmd.raw_text.is_empty() {
            continue;
        }
        match handle_booking_command(&cmd, &dispatcher, poller.as_ref()).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(text) => console.say(text),
        }
    }

    task.stop();
    Ok(())
}

/// Admin console: dashboard every few seconds plus slot management.
pub async fn run_admin(config: &ClientConfig) -> anyhow::Result<()> {
    let api: Arc<dyn ParkingApi> = Arc::new(HttpParkingApi::new(&config.api)?);
    let surface = Arc::new(TerminalSurface::stdout());
    let poller = Arc::new(AdminPoller::new(api.clone(), surface.clone(), config.poll.latest_wins));
    let dispatcher = AdminDispatcher::new(api, surface, poller.clone());

    let task = PollingTask::start(poller.clone(), config.poll.admin_interval());

    let mut console = Console::stdin()?;
    console.say(ADMIN_HELP);

    while let Some(line) = next_line(&mut console, tokio::signal::ctrl_c()).await? {
        let cmd = ParsedCommand::parse(&line);
        if cmd.raw_text.is_empty() {
            continue;
        }
        match handle_admin_command(&cmd, &dispatcher, poller.as_ref(), &mut console).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(text) => console.say(text),
        }
    }

    task.stop();
    Ok(())
}
