use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::{error, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_vm::Interpreter;

use crate::display::Display;
use crate::keymap::keymap;

/// Drives the interpreter: feeds it key events, paces cycles by `delay_ms`,
/// and redraws whenever a cycle changed the frame buffer. Runs until the
/// window is closed, Escape is pressed, or the interpreter faults.
pub fn run(scale: u32, delay_ms: u64, rom: PathBuf) {
    let mut vm = Interpreter::new();

    let file = match File::open(&rom) {
        Ok(file) => file,
        Err(e) => {
            error!("unable to open {}: {}", rom.display(), e);
            return;
        }
    };
    let mut reader = BufReader::new(file);
    match vm.load_rom(&mut reader) {
        Ok(()) => info!("loaded ROM {}", rom.display()),
        Err(e) => {
            error!("unable to load {}: {}", rom.display(), e);
            return;
        }
    }

    let sdl: sdl2::Sdl = sdl2::init().unwrap();
    let mut display = Display::new(&sdl, scale);
    let mut events = sdl.event_pump().unwrap();

    let cycle_time = Duration::from_millis(delay_ms);
    let mut last_cycle = Instant::now();

    'event: loop {
        // Key state is written between steps, never during one
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        vm.key_press(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        vm.key_release(kc);
                    }
                }
                _ => continue,
            }
        }

        if let Err(fault) = vm.step() {
            error!("halting: {}", fault);
            break;
        }

        if let Some(frame) = vm.frame() {
            display.render(frame);
        }

        // Pace cycles so the per-cycle timers tick near 60Hz
        let elapsed = last_cycle.elapsed();
        if cycle_time > elapsed {
            std::thread::sleep(cycle_time - elapsed);
        }
        last_cycle = Instant::now();
    }
}
