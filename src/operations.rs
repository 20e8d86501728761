use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_GLYPH_SIZE, FONT_START, MEMORY_SIZE};
use crate::error::Fault;
use crate::opcode::Opcode;
use crate::state::State;

/// Every instruction is a pure transition from one [State] to the next.
///
/// The program counter has already been advanced past the instruction before
/// it executes, so a jump overwrites `pc` with its absolute target, a skip
/// adds another 2, and everything else leaves `pc` alone.
pub type Operation = fn(op: u16, state: &State, pressed_keys: &[bool; 16]) -> Result<State, Fault>;

/// `00E0` all pixels off
pub fn cls(_op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    Ok(State {
        frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        draw_flag: true,
        ..*state
    })
}

/// `00EE` PC = STACK.pop()
pub fn ret(_op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    if state.sp == 0 {
        return Err(Fault::StackUnderflow);
    }
    let sp = state.sp - 1;
    Ok(State {
        pc: state.stack[sp as usize],
        sp,
        ..*state
    })
}

/// `1nnn` PC = nnn
pub fn jump(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    Ok(State {
        pc: op.nnn(),
        ..*state
    })
}

/// `2nnn` STACK.push(PC); PC = nnn
pub fn call(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    if state.sp as usize == state.stack.len() {
        return Err(Fault::StackOverflow);
    }
    let mut stack = state.stack;
    // pc was already advanced, so it is the return address
    stack[state.sp as usize] = state.pc;
    Ok(State {
        pc: op.nnn(),
        sp: state.sp + 1,
        stack,
        ..*state
    })
}

/// `3xkk` if Vx == kk then skip
pub fn skip_eq(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let pc = if state.v[op.x() as usize] == op.kk() {
        state.pc + 2
    } else {
        state.pc
    };
    Ok(State { pc, ..*state })
}

/// `4xkk` if Vx != kk then skip
pub fn skip_ne(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let pc = if state.v[op.x() as usize] != op.kk() {
        state.pc + 2
    } else {
        state.pc
    };
    Ok(State { pc, ..*state })
}

/// `5xy0` if Vx == Vy then skip
pub fn skip_reg_eq(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let pc = if state.v[op.x() as usize] == state.v[op.y() as usize] {
        state.pc + 2
    } else {
        state.pc
    };
    Ok(State { pc, ..*state })
}

/// `9xy0` if Vx != Vy then skip
pub fn skip_reg_ne(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let pc = if state.v[op.x() as usize] != state.v[op.y() as usize] {
        state.pc + 2
    } else {
        state.pc
    };
    Ok(State { pc, ..*state })
}

/// `6xkk` Vx = kk
pub fn set(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let mut v = state.v;
    v[op.x() as usize] = op.kk();
    Ok(State { v, ..*state })
}

/// `7xkk` Vx += kk, wrapping, no flag
pub fn add_byte(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let mut v = state.v;
    v[op.x() as usize] = v[op.x() as usize].wrapping_add(op.kk());
    Ok(State { v, ..*state })
}

/// `8xy0` Vx = Vy
pub fn copy(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let mut v = state.v;
    v[op.x() as usize] = v[op.y() as usize];
    Ok(State { v, ..*state })
}

/// `8xy1` Vx |= Vy
pub fn or(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let mut v = state.v;
    v[op.x() as usize] |= v[op.y() as usize];
    Ok(State { v, ..*state })
}

/// `8xy2` Vx &= Vy
pub fn and(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let mut v = state.v;
    v[op.x() as usize] &= v[op.y() as usize];
    Ok(State { v, ..*state })
}

/// `8xy3` Vx ^= Vy
pub fn xor(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let mut v = state.v;
    v[op.x() as usize] ^= v[op.y() as usize];
    Ok(State { v, ..*state })
}

/// `8xy4` Vx += Vy; VF = carry
pub fn add_reg(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let (res, carry) = state.v[op.x() as usize].overflowing_add(state.v[op.y() as usize]);
    let mut v = state.v;
    v[0xF] = u8::from(carry);
    v[op.x() as usize] = res;
    Ok(State { v, ..*state })
}

/// `8xy5` Vx -= Vy; VF = !borrow
pub fn sub_reg(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let (res, borrow) = state.v[op.x() as usize].overflowing_sub(state.v[op.y() as usize]);
    let mut v = state.v;
    v[0xF] = u8::from(!borrow);
    v[op.x() as usize] = res;
    Ok(State { v, ..*state })
}

/// `8xy6` Vx >>= 1; VF = the bit shifted out
pub fn shift_right(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let mut v = state.v;
    v[0xF] = v[op.x() as usize] & 0x1;
    v[op.x() as usize] >>= 1;
    Ok(State { v, ..*state })
}

/// `8xy7` Vx = Vy - Vx; VF = !borrow
pub fn sub_from(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let (res, borrow) = state.v[op.y() as usize].overflowing_sub(state.v[op.x() as usize]);
    let mut v = state.v;
    v[0xF] = u8::from(!borrow);
    v[op.x() as usize] = res;
    Ok(State { v, ..*state })
}

/// `8xyE` Vx <<= 1; VF = the bit shifted out
pub fn shift_left(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let mut v = state.v;
    v[0xF] = v[op.x() as usize] >> 7;
    v[op.x() as usize] <<= 1;
    Ok(State { v, ..*state })
}

/// `Annn` I = nnn
pub fn set_index(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    Ok(State {
        i: op.nnn(),
        ..*state
    })
}

/// `Bnnn` PC = V0 + nnn
pub fn jump_offset(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    Ok(State {
        pc: u16::from(state.v[0x0]) + op.nnn(),
        ..*state
    })
}

/// `Cxkk` Vx = random byte & kk
pub fn random(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let mut v = state.v;
    v[op.x() as usize] = rand::random::<u8>() & op.kk();
    Ok(State { v, ..*state })
}

/// `Dxyn` XOR an 8xN sprite from memory[I..] onto the frame at (Vx, Vy)
///
/// The start position wraps modulo the screen size; pixels that extend past
/// the right or bottom edge are clipped. VF reports whether any drawn pixel
/// landed on one that was already lit.
pub fn draw(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let start = state.i as usize;
    let end = start + op.n() as usize;
    if end > MEMORY_SIZE {
        return Err(Fault::MemoryOutOfBounds {
            address: end as u16 - 1,
        });
    }

    let origin_x = state.v[op.x() as usize] as usize % DISPLAY_WIDTH;
    let origin_y = state.v[op.y() as usize] as usize % DISPLAY_HEIGHT;

    let mut v = state.v;
    let mut frame_buffer = state.frame_buffer;
    v[0xF] = 0;

    for (row, &sprite_byte) in state.memory[start..end].iter().enumerate() {
        let y = origin_y + row;
        if y >= DISPLAY_HEIGHT {
            break;
        }
        for bit in 0..8 {
            let x = origin_x + bit;
            if x >= DISPLAY_WIDTH {
                break;
            }
            let pixel = (sprite_byte >> (7 - bit)) & 1;
            v[0xF] |= pixel & frame_buffer[y][x];
            frame_buffer[y][x] ^= pixel;
        }
    }

    Ok(State {
        v,
        frame_buffer,
        draw_flag: true,
        ..*state
    })
}

/// `Ex9E` if key Vx is down then skip
pub fn skip_pressed(op: u16, state: &State, pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    // only the low nibble selects a key
    let key = state.v[op.x() as usize] as usize & 0xF;
    let pc = if pressed_keys[key] {
        state.pc + 2
    } else {
        state.pc
    };
    Ok(State { pc, ..*state })
}

/// `ExA1` if key Vx is up then skip
pub fn skip_released(op: u16, state: &State, pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let key = state.v[op.x() as usize] as usize & 0xF;
    let pc = if pressed_keys[key] {
        state.pc
    } else {
        state.pc + 2
    };
    Ok(State { pc, ..*state })
}

/// `Fx07` Vx = DT
pub fn read_delay(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let mut v = state.v;
    v[op.x() as usize] = state.delay_timer;
    Ok(State { v, ..*state })
}

/// `Fx0A` wait for a key press
///
/// The lowest pressed key lands in Vx. With no key down, the program counter
/// rolls back so the same instruction re-executes next cycle; the wait is a
/// cooperative retry, not a separate mode.
pub fn wait_key(op: u16, state: &State, pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    match pressed_keys.iter().position(|&down| down) {
        Some(key) => {
            let mut v = state.v;
            v[op.x() as usize] = key as u8;
            Ok(State { v, ..*state })
        }
        None => Ok(State {
            pc: state.pc - 2,
            ..*state
        }),
    }
}

/// `Fx15` DT = Vx
pub fn set_delay(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    Ok(State {
        delay_timer: state.v[op.x() as usize],
        ..*state
    })
}

/// `Fx18` ST = Vx
pub fn set_sound(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    Ok(State {
        sound_timer: state.v[op.x() as usize],
        ..*state
    })
}

/// `Fx1E` I += Vx, faulting if I would leave addressable memory
pub fn add_index(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let i = state.i + u16::from(state.v[op.x() as usize]);
    if i as usize >= MEMORY_SIZE {
        return Err(Fault::MemoryOutOfBounds { address: i });
    }
    Ok(State { i, ..*state })
}

/// `Fx29` I = address of the font glyph for digit Vx
pub fn font_address(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    Ok(State {
        i: FONT_START + FONT_GLYPH_SIZE * u16::from(state.v[op.x() as usize]),
        ..*state
    })
}

/// `Fx33` memory[I..I+3] = the decimal digits of Vx
pub fn store_bcd(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let start = state.i as usize;
    if start + 3 > MEMORY_SIZE {
        return Err(Fault::MemoryOutOfBounds {
            address: state.i + 2,
        });
    }
    let value = state.v[op.x() as usize];
    let mut memory = state.memory;
    memory[start] = value / 100;
    memory[start + 1] = value / 10 % 10;
    memory[start + 2] = value % 10;
    Ok(State { memory, ..*state })
}

/// `Fx55` memory[I..=I+x] = V0..=Vx; I is left unchanged
pub fn store_regs(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let start = state.i as usize;
    let end = start + op.x() as usize + 1;
    if end > MEMORY_SIZE {
        return Err(Fault::MemoryOutOfBounds {
            address: end as u16 - 1,
        });
    }
    let mut memory = state.memory;
    memory[start..end].copy_from_slice(&state.v[..=op.x() as usize]);
    Ok(State { memory, ..*state })
}

/// `Fx65` V0..=Vx = memory[I..=I+x]; I is left unchanged
pub fn load_regs(op: u16, state: &State, _pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let start = state.i as usize;
    let end = start + op.x() as usize + 1;
    if end > MEMORY_SIZE {
        return Err(Fault::MemoryOutOfBounds {
            address: end as u16 - 1,
        });
    }
    let mut v = state.v;
    v[..=op.x() as usize].copy_from_slice(&state.memory[start..end]);
    Ok(State { v, ..*state })
}
