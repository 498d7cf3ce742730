// C ABI for a native host UI. Strings cross the boundary as NUL-terminated
// UTF-8; every returned string must go back through `morse_free_string`.
use crate::config::EngineConfig;
use crate::core::types::ActuatorFault;
use crate::player::{Actuator, PlaybackEvent};
use crate::MorseEngine;
use log::{error, info};
use parking_lot::Mutex;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;

static ENGINE: Mutex<Option<MorseEngine>> = parking_lot::const_mutex(None);

/// Host light switch. Returns `true` on success.
pub type LightFn = extern "C" fn(on: bool) -> bool;

/// Playback callback: `kind` is 0 pulse on, 1 pulse off, 2 progress,
/// 3 completed, 4 cancelled, 5 failed; `index` is the signal position.
pub type EventFn = extern "C" fn(kind: i32, index: usize);

struct HostActuator {
    light: LightFn,
}

impl HostActuator {
    fn switch(&self, on: bool) -> Result<(), ActuatorFault> {
        if (self.light)(on) {
            Ok(())
        } else {
            Err(ActuatorFault::new(if on { "host could not turn light on" } else { "host could not turn light off" }))
        }
    }
}

impl Actuator for HostActuator {
    fn turn_on(&mut self) -> Result<(), ActuatorFault> {
        self.switch(true)
    }

    fn turn_off(&mut self) -> Result<(), ActuatorFault> {
        self.switch(false)
    }
}

fn event_code(event: &PlaybackEvent) -> (i32, usize) {
    match *event {
        PlaybackEvent::PulseOn { index, .. } => (0, index),
        PlaybackEvent::PulseOff { index, .. } => (1, index),
        PlaybackEvent::Progress { index } => (2, index),
        PlaybackEvent::Completed => (3, 0),
        PlaybackEvent::Cancelled => (4, 0),
        PlaybackEvent::Failed(_) => (5, 0),
    }
}

unsafe fn read_str<'a>(s: *const c_char) -> &'a str {
    if s.is_null() {
        return "";
    }
    CStr::from_ptr(s).to_str().unwrap_or("")
}

fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).map(CString::into_raw).unwrap_or(ptr::null_mut())
}

/// # Safety
/// `locale` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn morse_engine_init(locale: *const c_char, light: LightFn) {
    let locale = read_str(locale).to_string();
    let result = catch_unwind(|| {
        let mut engine = ENGINE.lock();
        if engine.is_some() {
            return;
        }
        let mut config = EngineConfig::default();
        if !locale.is_empty() {
            config.locale = locale;
        }
        *engine = Some(MorseEngine::new(&config, HostActuator { light }));
        info!("morse engine initialized");
    });
    if result.is_err() {
        error!("panic during morse engine initialization");
    }
}

#[no_mangle]
pub extern "C" fn morse_engine_destroy() {
    let engine = ENGINE.lock().take();
    if let Some(engine) = engine {
        // No host callback may fire once destroy returns.
        engine.stop();
        engine.wait();
    }
}

fn with_engine<T>(default: T, f: impl FnOnce(&mut MorseEngine) -> T) -> T {
    let result = catch_unwind(AssertUnwindSafe(|| ENGINE.lock().as_mut().map(f)));
    match result {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(_) => {
            error!("panic inside morse engine call");
            default
        }
    }
}

/// Returns JSON `{"input": ..., "output": ..., "rejected": [...]}`.
///
/// # Safety
/// `text` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn morse_encode(text: *const c_char) -> *mut c_char {
    let text = read_str(text);
    let json = with_engine(String::from("{}"), |engine| {
        conversion_json(&engine.text_to_morse(text))
    });
    into_c_string(json)
}

/// # Safety
/// `morse` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn morse_decode(morse: *const c_char) -> *mut c_char {
    let morse = read_str(morse);
    let json = with_engine(String::from("{}"), |engine| {
        conversion_json(&engine.morse_to_text(morse))
    });
    into_c_string(json)
}

fn conversion_json(conversion: &crate::Conversion) -> String {
    serde_json::json!({
        "input": conversion.input,
        "output": conversion.output,
        "rejected": conversion.rejected.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
    })
    .to_string()
}

/// Returns `true` if the locale has a table.
///
/// # Safety
/// `locale` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn morse_set_locale(locale: *const c_char) -> bool {
    let locale = read_str(locale);
    with_engine(false, |engine| {
        engine.set_locale(locale);
        engine.is_locale_supported()
    })
}

/// JSON array of installed locale identifiers.
#[no_mangle]
pub extern "C" fn morse_supported_locales() -> *mut c_char {
    let json = with_engine(String::from("[]"), |engine| {
        serde_json::to_string(&engine.supported_locales()).unwrap_or_else(|_| "[]".to_string())
    });
    into_c_string(json)
}

/// # Safety
/// `signal` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn morse_play(signal: *const c_char, on_event: EventFn) -> bool {
    let signal = read_str(signal);
    with_engine(false, |engine| {
        let observer = move |event: PlaybackEvent| {
            let (kind, index) = event_code(&event);
            on_event(kind, index);
        };
        match engine.play(signal, observer) {
            Ok(()) => true,
            Err(e) => {
                error!("could not start playback: {}", e);
                false
            }
        }
    })
}

#[no_mangle]
pub extern "C" fn morse_stop() {
    with_engine((), |engine| engine.stop());
}

/// # Safety
/// `s` must be null or a pointer returned by this library.
#[no_mangle]
pub unsafe extern "C" fn morse_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = CString::from_raw(s);
    }
}
