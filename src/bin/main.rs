use log::{debug, info, warn};
use morse_core::core::types::ActuatorFault;
use morse_core::player::{Actuator, PlaybackEvent};
use morse_core::{EngineConfig, MorseEngine};
use parking_lot::Mutex;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

// Line protocol for a host UI. Requests arrive on stdin, replies and
// playback events go to stdout; diagnostics go to stderr via env_logger.

const CONFIG_PATH: &str = "morse_config.json";

type Output = Arc<Mutex<io::Stdout>>;

fn emit(out: &Output, line: &str) {
    debug!("engine -> {:?}", line);
    let mut stdout = out.lock();
    let _ = writeln!(stdout, "{}", line);
    let _ = stdout.flush();
}

/// Tells the host to switch its light.
struct ProtocolActuator {
    out: Output,
}

impl Actuator for ProtocolActuator {
    fn turn_on(&mut self) -> Result<(), ActuatorFault> {
        emit(&self.out, "LIGHT ON");
        Ok(())
    }

    fn turn_off(&mut self) -> Result<(), ActuatorFault> {
        emit(&self.out, "LIGHT OFF");
        Ok(())
    }
}

fn event_line(event: &PlaybackEvent) -> String {
    match event {
        PlaybackEvent::PulseOn { index, at, duration } => {
            format!("PULSE_ON {} {} {}", index, at.as_millis(), duration.as_millis())
        }
        PlaybackEvent::PulseOff { index, at, duration } => {
            format!("PULSE_OFF {} {} {}", index, at.as_millis(), duration.as_millis())
        }
        PlaybackEvent::Progress { index } => format!("PROGRESS {}", index),
        PlaybackEvent::Completed => "DONE".to_string(),
        PlaybackEvent::Cancelled => "CANCELLED".to_string(),
        PlaybackEvent::Failed(fault) => format!("FAULT {}", fault.message),
    }
}

fn main() -> io::Result<()> {
    env_logger::init();
    info!("--- Morse engine starting ---");

    let config_path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(CONFIG_PATH));
    let config = EngineConfig::from_file_or_default(&config_path);
    let out: Output = Arc::new(Mutex::new(io::stdout()));
    let mut engine = MorseEngine::new(&config, ProtocolActuator { out: Arc::clone(&out) });

    // Last encoded signal; PLAY replays it.
    let mut current_morse = String::new();

    for line in io::stdin().lock().lines() {
        let input = line?;
        debug!("engine <- {:?}", input);
        let (command, argument) = match input.split_once(' ') {
            Some((command, argument)) => (command, argument),
            None => (input.as_str(), ""),
        };

        match command {
            "ENCODE" => {
                let conversion = engine.text_to_morse(argument);
                if !conversion.rejected.is_empty() {
                    let rejected: String = conversion.rejected.iter().collect();
                    emit(&out, &format!("REJECTED {}", rejected));
                }
                emit(&out, &format!("MORSE {}", conversion.output));
                current_morse = conversion.output;
            }
            "DECODE" => {
                let conversion = engine.morse_to_text(argument);
                if !conversion.rejected.is_empty() {
                    let rejected: String = conversion.rejected.iter().collect();
                    emit(&out, &format!("REJECTED {}", rejected));
                }
                emit(&out, &format!("TEXT {}", conversion.output));
            }
            "LOCALE" => {
                engine.set_locale(argument.trim());
                emit(&out, &format!("LOCALE {} {}", engine.locale(), engine.is_locale_supported()));
            }
            "LOCALES" => emit(&out, &format!("LOCALES {}", engine.supported_locales().join(" "))),
            "PLAY" => {
                let signal = if argument.is_empty() { current_morse.clone() } else { argument.to_string() };
                let events = Arc::clone(&out);
                if let Err(e) = engine.play(&signal, move |event: PlaybackEvent| emit(&events, &event_line(&event))) {
                    emit(&out, &format!("ERROR {}", e));
                }
            }
            "STOP" => engine.stop(),
            "EXIT" => {
                info!("received EXIT");
                engine.stop();
                engine.wait();
                break;
            }
            _ => {
                warn!("unknown command {:?}", command);
                emit(&out, &format!("ERROR unknown command {}", command));
            }
        }
    }

    info!("shutting down");
    Ok(())
}
