use crossterm::cursor::{MoveTo, RestorePosition, SavePosition};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use morse_core::core::types::ActuatorFault;
use morse_core::player::{total_duration, Actuator, ChannelObserver, PlaybackEvent};
use morse_core::{EngineConfig, MorseEngine, Timing};
use parking_lot::Mutex;
use std::io::{stdin, stdout, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

const CONFIG_PATH: &str = "morse_config.json";
const LAMP_ROW: u16 = 0;
const PROGRESS_ROW: u16 = 1;

/// Paints a lamp in the top-left corner of the terminal.
struct TerminalLamp;

impl TerminalLamp {
    fn paint(&self, color: Color, label: &str) -> Result<(), ActuatorFault> {
        let mut out = stdout();
        execute!(
            out,
            SavePosition,
            MoveTo(0, LAMP_ROW),
            SetBackgroundColor(color),
            Print(label),
            ResetColor,
            RestorePosition
        )
        .map_err(|e| ActuatorFault::new(e.to_string()))
    }
}

impl Actuator for TerminalLamp {
    fn turn_on(&mut self) -> Result<(), ActuatorFault> {
        self.paint(Color::Yellow, "  ON   ")
    }

    fn turn_off(&mut self) -> Result<(), ActuatorFault> {
        self.paint(Color::DarkGrey, "  OFF  ")
    }
}

// Owns the progress line; events arrive from the playback worker.
fn render_progress(signal: Arc<Mutex<String>>, events: Receiver<PlaybackEvent>) {
    for event in events {
        let signal = signal.lock().clone();
        let mut out = stdout();
        let _ = queue!(out, SavePosition, MoveTo(0, PROGRESS_ROW), Clear(ClearType::CurrentLine));
        match event {
            PlaybackEvent::Progress { index } => {
                let split = signal.char_indices().nth(index + 1).map_or(signal.len(), |(i, _)| i);
                let _ = queue!(
                    out,
                    SetForegroundColor(Color::Green),
                    Print(&signal[..split]),
                    ResetColor,
                    Print(&signal[split..])
                );
            }
            PlaybackEvent::Completed => {
                let _ = queue!(out, Print("done"));
            }
            PlaybackEvent::Cancelled => {
                let _ = queue!(out, Print("cancelled"));
            }
            PlaybackEvent::Failed(fault) => {
                let _ = queue!(out, SetForegroundColor(Color::Red), Print(fault.to_string()), ResetColor);
            }
            PlaybackEvent::PulseOn { .. } | PlaybackEvent::PulseOff { .. } => {
                let _ = queue!(out, Print(&signal));
            }
        }
        let _ = queue!(out, RestorePosition);
        let _ = out.flush();
    }
}

fn print_ui(engine: &MorseEngine, text: &str, morse: &str, rejected: &[char]) {
    let mut out = stdout();
    let _ = execute!(out, Clear(ClearType::All), MoveTo(0, 3));
    println!("MorseFlash Simulator");
    println!("---------------------------------------------------------------");
    println!("Type text to encode. ':d <morse>' decodes, ':p' plays, ':s' stops,");
    println!("':l <locale>' switches locale, ':w <wpm>' sets speed, 'exit' quits.\n");
    println!("Locale: {} (available: {})", engine.locale(), engine.supported_locales().join(", "));
    println!("Unit: {:?}", engine.timing().unit());
    println!("\nText:  [{}]", text);
    println!("Morse: [{}]", morse);
    if !morse.is_empty() {
        println!("Length: {:?}", total_duration(morse, engine.timing()));
    }
    if !rejected.is_empty() {
        let rejected: String = rejected.iter().collect();
        println!("Unavailable characters: {}", rejected);
    }
    print!("\n> ");
    let _ = out.flush();
}

fn main() {
    env_logger::init();
    let config = EngineConfig::from_file_or_default(Path::new(CONFIG_PATH));
    let mut engine = MorseEngine::new(&config, TerminalLamp);

    let playing = Arc::new(Mutex::new(String::new()));
    let (tx, rx) = mpsc::channel();
    let renderer = {
        let playing = Arc::clone(&playing);
        thread::spawn(move || render_progress(playing, rx))
    };

    let mut text = String::new();
    let mut morse = String::new();
    let mut rejected = Vec::new();

    loop {
        print_ui(&engine, &text, &morse, &rejected);

        let mut input = String::new();
        if stdin().read_line(&mut input).unwrap_or(0) == 0 {
            break;
        }
        let cmd = input.trim_end_matches(['\r', '\n']);

        match cmd {
            "exit" => break,
            ":p" => {
                *playing.lock() = morse.clone();
                if let Err(e) = engine.play(&morse, ChannelObserver(tx.clone())) {
                    eprintln!("[ERROR] could not start playback: {}", e);
                }
            }
            ":s" => engine.stop(),
            s if s.starts_with(":l ") => {
                engine.set_locale(s[3..].trim());
                let conversion = engine.text_to_morse(&text);
                morse = conversion.output;
                rejected = conversion.rejected;
            }
            s if s.starts_with(":w ") => {
                if let Ok(wpm) = s[3..].trim().parse::<u32>() {
                    engine.set_timing(Timing::from_wpm(wpm));
                }
            }
            s if s.starts_with(":d ") => {
                let conversion = engine.morse_to_text(&s[3..]);
                text = conversion.output;
                morse = conversion.input;
                rejected = conversion.rejected;
            }
            s => {
                // Every line replaces the whole buffer, like a text field update.
                let conversion = engine.text_to_morse(s);
                text = conversion.input;
                morse = conversion.output;
                rejected = conversion.rejected;
            }
        }
    }

    engine.stop();
    engine.wait();
    drop(engine);
    drop(tx);
    let _ = renderer.join();
    println!("\nBye.");
}
