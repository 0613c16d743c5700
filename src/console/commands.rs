//! Command handlers

use core::fmt::Write;

use super::parser::ParsedCommand;
use super::ConsoleError;
use crate::device::TorchControl;
use crate::fault::FaultState;
use crate::logging::LogStream;
use crate::morse::encode;
use crate::permission::{PermissionGate, PermissionStatus};
use crate::transmitter::Transmitter;

/// Everything a command handler may touch.
///
/// Handlers get their collaborators injected here instead of reaching
/// for globals, so the whole command set runs against mocks on host.
pub struct CommandContext<'c, 'a> {
    pub transmitter: &'c mut Transmitter<'a>,
    pub torch: &'c mut dyn TorchControl,
    pub permission: &'c mut dyn PermissionGate,
    pub fault: &'c FaultState,
    pub log: &'c LogStream,
    pub now_us: i64,
}

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    pub brief: &'static str,
    pub handler:
        fn(&ParsedCommand<'_>, &mut CommandContext<'_, '_>, &mut dyn Write) -> Result<(), ConsoleError>,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { name: "help", brief: "List commands", handler: cmd_help },
    CommandDescriptor { name: "send", brief: "Flash text as Morse", handler: cmd_send },
    CommandDescriptor { name: "stop", brief: "Cancel the transmission", handler: cmd_stop },
    CommandDescriptor { name: "status", brief: "Transmission and device state", handler: cmd_status },
    CommandDescriptor { name: "reboot", brief: "Restart system", handler: cmd_reboot },
];

/// Execute a parsed command
pub fn execute(
    cmd: &ParsedCommand<'_>,
    ctx: &mut CommandContext<'_, '_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if cmd.command.is_empty() {
        return Ok(()); // Empty line, do nothing
    }

    let handler = COMMANDS
        .iter()
        .find(|c| c.name == cmd.command)
        .ok_or(ConsoleError::UnknownCommand)?;

    (handler.handler)(cmd, ctx, out)
}

// --- Command Implementations ---

fn cmd_help(
    cmd: &ParsedCommand<'_>,
    _ctx: &mut CommandContext<'_, '_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if !cmd.rest_is_empty() {
        // Help for specific command
        if let Some(c) = COMMANDS.iter().find(|c| c.name == cmd.rest) {
            let _ = writeln!(out, "{}: {}", c.name, c.brief);
        } else {
            return Err(ConsoleError::UnknownCommand);
        }
    } else {
        // List all commands
        for c in COMMANDS {
            let _ = writeln!(out, "  {:<8} {}", c.name, c.brief);
        }
    }
    Ok(())
}

fn cmd_send(
    cmd: &ParsedCommand<'_>,
    ctx: &mut CommandContext<'_, '_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if cmd.rest_is_empty() {
        return Err(ConsoleError::MissingArg);
    }

    ctx.transmitter.submit(cmd.rest, ctx.torch, ctx.permission)?;
    let _ = writeln!(out, "sending: {}", encode(cmd.rest).as_str());
    Ok(())
}

fn cmd_stop(
    _cmd: &ParsedCommand<'_>,
    ctx: &mut CommandContext<'_, '_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if ctx.transmitter.is_sending() {
        ctx.transmitter.cancel(ctx.torch);
        let _ = writeln!(out, "stopped");
    } else {
        let _ = writeln!(out, "nothing in flight");
    }
    Ok(())
}

fn cmd_status(
    _cmd: &ParsedCommand<'_>,
    ctx: &mut CommandContext<'_, '_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    match ctx.transmitter.progress() {
        Some((done, total)) => {
            let _ = writeln!(out, "state: sending ({}/{} symbols)", done, total);
        }
        None => {
            let _ = writeln!(out, "state: idle");
        }
    }

    let permission = match ctx.permission.check() {
        PermissionStatus::Granted => "granted",
        PermissionStatus::Denied => "denied",
        PermissionStatus::Pending => "pending",
    };
    let _ = writeln!(out, "permission: {}", permission);
    let _ = writeln!(out, "faults: {}", ctx.fault.count());
    let _ = writeln!(out, "log drops: {}", ctx.log.dropped());
    Ok(())
}

fn cmd_reboot(
    cmd: &ParsedCommand<'_>,
    _ctx: &mut CommandContext<'_, '_>,
    _out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if cmd.rest != "confirm" {
        return Err(ConsoleError::RequiresConfirm);
    }

    #[cfg(all(not(test), any(target_arch = "xtensa", target_arch = "riscv32")))]
    unsafe {
        esp_idf_svc::sys::esp_restart();
    }

    Ok(())
}
