//! MorseTorch - Main entry point
//!
//! Firmware wiring:
//! 1. Bring up the UART0 console
//! 2. Claim the torch GPIO (signaling is refused if this fails)
//! 3. Cooperative loop: console bytes -> transmitter tick -> fault and
//!    log drain -> sleep one tick

#![no_std]
#![no_main]

use esp_idf_svc::sys as esp_idf_sys;

use core::fmt::Write;

use morse_torch::{
    console::{CommandContext, Console},
    device::{TorchControl, TorchError},
    fault::FaultState,
    hal::{GpioTorch, TorchConfig},
    log_error, log_info, log_warn,
    logging::{format_entry, LogStream},
    permission::{FixedPermission, PermissionStatus},
    scheduler::FlashTiming,
    transmitter::Transmitter,
};

static FAULT_STATE: FaultState = FaultState::new();
static LOG_STREAM: LogStream = LogStream::new();

/// UART0, the USB console on devkits.
const CONSOLE_UART: i32 = 0;

/// Torch output, either the real GPIO driver or a stand-in that keeps
/// reporting the acquisition failure.
enum TorchOutput {
    Gpio(GpioTorch),
    Missing(TorchError),
}

impl TorchControl for TorchOutput {
    fn activate(&mut self) -> Result<(), TorchError> {
        match self {
            TorchOutput::Gpio(torch) => torch.activate(),
            TorchOutput::Missing(err) => Err(*err),
        }
    }

    fn deactivate(&mut self) -> Result<(), TorchError> {
        match self {
            TorchOutput::Gpio(torch) => torch.deactivate(),
            TorchOutput::Missing(err) => Err(*err),
        }
    }
}

/// Console output through the UART driver.
struct SerialOut;

impl Write for SerialOut {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        unsafe {
            esp_idf_sys::uart_write_bytes(
                CONSOLE_UART,
                s.as_ptr() as *const core::ffi::c_void,
                s.len(),
            );
        }
        Ok(())
    }
}

#[no_mangle]
fn main() {
    // Initialize ESP-IDF
    esp_idf_sys::link_patches();

    init_console_uart();

    let mut out = SerialOut;
    let mut console = Console::new();
    console.print_banner(&mut out);

    let boot_us = timestamp_us();

    // Torch bring-up decides the permission answer: a board that could
    // not claim its torch pin behaves like a denied permission and the
    // failure is logged once, here.
    let (mut torch, granted) = match GpioTorch::new(TorchConfig::default()) {
        Ok(torch) => (TorchOutput::Gpio(torch), PermissionStatus::Granted),
        Err(err) => {
            log_error!(LOG_STREAM, boot_us, "torch bring-up failed: {}", err);
            (TorchOutput::Missing(err), PermissionStatus::Denied)
        }
    };
    let mut permission = FixedPermission(granted);

    let mut transmitter = Transmitter::new(FlashTiming::default(), &FAULT_STATE);
    log_info!(LOG_STREAM, boot_us, "ready");

    loop {
        let now_us = timestamp_us();

        // 1. Console input
        while let Some(byte) = poll_console_byte() {
            let mut ctx = CommandContext {
                transmitter: &mut transmitter,
                torch: &mut torch,
                permission: &mut permission,
                fault: &FAULT_STATE,
                log: &LOG_STREAM,
                now_us,
            };
            console.process_byte(byte, &mut ctx, &mut out);
        }

        // 2. Drive the in-flight transmission
        let was_sending = transmitter.is_sending();
        transmitter.tick(now_us, &mut torch);
        if was_sending && !transmitter.is_sending() {
            log_info!(LOG_STREAM, now_us, "transmission complete");
        }

        // 3. Report device faults
        if let Some(fault) = FAULT_STATE.take() {
            log_warn!(
                LOG_STREAM,
                now_us,
                "torch fault at symbol {}: {} (total {})",
                fault.data,
                fault.code.as_str(),
                fault.count
            );
        }

        // 4. Drain log ring to the console
        while let Some(entry) = LOG_STREAM.drain() {
            let mut buf = [0u8; 160];
            let len = format_entry(&entry, &mut buf);
            let _ = out.write_str(core::str::from_utf8(&buf[..len]).unwrap_or(""));
        }

        // 5. Sleep one tick (10ms on default tick rate)
        unsafe {
            esp_idf_sys::vTaskDelay(1);
        }
    }
}

// --- Platform helpers ---

fn timestamp_us() -> i64 {
    unsafe { esp_idf_sys::esp_timer_get_time() }
}

fn init_console_uart() {
    unsafe {
        esp_idf_sys::uart_driver_install(CONSOLE_UART, 256, 0, 0, core::ptr::null_mut(), 0);
    }
}

fn poll_console_byte() -> Option<u8> {
    let mut byte = 0u8;
    let read = unsafe {
        esp_idf_sys::uart_read_bytes(
            CONSOLE_UART,
            &mut byte as *mut u8 as *mut core::ffi::c_void,
            1,
            0,
        )
    };
    (read == 1).then_some(byte)
}
