use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_SPRITES, FONT_START, MEMORY_SIZE, PROGRAM_START,
    STACK_DEPTH,
};

/// The display contents, indexed as `[y][x]` with 1 for a lit pixel.
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// A snapshot of all CPU-visible state.
///
/// ## Registers
/// - (v) 16 8-bit registers V0..VF; VF doubles as the carry/borrow/collision
///   flag output of the arithmetic, shift, and draw instructions
/// - (i) a 16-bit index register pointing into memory
/// - (pc) a 16-bit program counter
/// - (sp) the number of return addresses currently on the call stack
///
/// ## Timers
/// - 2 independent 8-bit countdown timers (delay & sound), decremented once
///   per cycle while nonzero
///
/// ## Memory
/// - a 16-slot call stack holding return addresses only
/// - 4096 bytes of addressable memory; 0x000-0x1FF is interpreter-reserved
///   and holds the font sprites, programs load at 0x200
/// - a 64x32 frame buffer of binary pixels
///
/// `draw_flag` is set by the two instructions that touch the frame buffer so
/// that a display only redraws when something changed.
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
}

impl State {
    pub fn new() -> Self {
        // The reserved region holds the font sprite sheet at 0x050
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        memory[font..font + FONT_SPRITES.len()].copy_from_slice(&FONT_SPRITES);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
