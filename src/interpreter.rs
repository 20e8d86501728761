use std::io::Read;

use log::trace;

use crate::constants::{MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START};
use crate::error::{Fault, RomError};
use crate::instruction;
use crate::state::{FrameBuffer, State};

/// # Interpreter
/// The CHIP-8 virtual machine.
///
/// Owns all CPU-visible state plus the keypad written by the input layer.
/// The driver loop is expected to:
/// - write key state between cycles via `key_press` / `key_release`
/// - advance the machine one instruction at a time with `step`
/// - read `frame` after a cycle and redraw when it returns `Some`
///
/// Execution is synchronous; `step` runs one full fetch/decode/execute cycle
/// and returns. The only wait semantics (the key-wait instruction) are a
/// cooperative retry via program counter rollback, so the driver just keeps
/// calling `step` with fresh key state.
pub struct Interpreter {
    state: State,
    pressed_keys: [bool; 16],
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            state: State::new(),
            pressed_keys: [false; 16],
        }
    }

    /// Copies a ROM into memory at the program start offset.
    ///
    /// A ROM that wouldn't fit below the 4K boundary is rejected before any
    /// byte is written.
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), RomError> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        if rom.len() > MAX_ROM_SIZE {
            return Err(RomError::TooLarge { size: rom.len() });
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(&rom);
        Ok(())
    }

    /// Returns the frame buffer if the last cycle changed it.
    pub fn frame(&self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Whether the sound timer is running; the frontend would beep here.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn key_press(&mut self, key: u8) {
        self.pressed_keys[key as usize] = true;
    }

    pub fn key_release(&mut self, key: u8) {
        self.pressed_keys[key as usize] = false;
    }

    /// Executes exactly one instruction cycle:
    /// 1. fetch the two bytes at the program counter
    /// 2. advance the program counter past them
    /// 3. decode, surfacing unknown opcodes as faults
    /// 4. execute
    /// 5. decrement each timer that is nonzero
    ///
    /// A fault aborts the cycle; effects up to the fault point stay in place.
    pub fn step(&mut self) -> Result<(), Fault> {
        let op = self.fetch()?;
        trace!(
            "{:04X} pc {:04X} i {:04X} sp {} v {:02X?}",
            op,
            self.state.pc,
            self.state.i,
            self.state.sp,
            self.state.v
        );

        self.state.draw_flag = false;
        // advance before execution so jumps can overwrite pc with an
        // absolute target
        self.state.pc += 2;

        let operation = instruction::decode(op)?;
        self.state = operation(op, &self.state, &self.pressed_keys)?;

        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }
        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
        }
        Ok(())
    }

    /// Combines the two bytes at the program counter, big-endian.
    fn fetch(&self) -> Result<u16, Fault> {
        let pc = self.state.pc as usize;
        if pc + 1 >= MEMORY_SIZE {
            return Err(Fault::MemoryOutOfBounds {
                address: self.state.pc,
            });
        }
        Ok(u16::from(self.state.memory[pc]) << 8 | u16::from(self.state.memory[pc + 1]))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
