use crate::error::Fault;
use crate::opcode::Opcode;
use crate::operations::*;

/// Selects the operation for an opcode.
///
/// Dispatch is on the top nibble; families 0x0, 0x8, and 0xE refine on the
/// bottom nibble and family 0xF on the bottom byte. Anything that doesn't
/// match is a decode failure surfaced to the caller.
pub fn decode(op: u16) -> Result<Operation, Fault> {
    match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => Ok(cls),
        (0x0, 0x0, 0xE, 0xE) => Ok(ret),
        (0x1, ..) => Ok(jump),
        (0x2, ..) => Ok(call),
        (0x3, ..) => Ok(skip_eq),
        (0x4, ..) => Ok(skip_ne),
        (0x5, .., 0x0) => Ok(skip_reg_eq),
        (0x6, ..) => Ok(set),
        (0x7, ..) => Ok(add_byte),
        (0x8, .., 0x0) => Ok(copy),
        (0x8, .., 0x1) => Ok(or),
        (0x8, .., 0x2) => Ok(and),
        (0x8, .., 0x3) => Ok(xor),
        (0x8, .., 0x4) => Ok(add_reg),
        (0x8, .., 0x5) => Ok(sub_reg),
        (0x8, .., 0x6) => Ok(shift_right),
        (0x8, .., 0x7) => Ok(sub_from),
        (0x8, .., 0xE) => Ok(shift_left),
        (0x9, .., 0x0) => Ok(skip_reg_ne),
        (0xA, ..) => Ok(set_index),
        (0xB, ..) => Ok(jump_offset),
        (0xC, ..) => Ok(random),
        (0xD, ..) => Ok(draw),
        (0xE, .., 0x9, 0xE) => Ok(skip_pressed),
        (0xE, .., 0xA, 0x1) => Ok(skip_released),
        (0xF, .., 0x0, 0x7) => Ok(read_delay),
        (0xF, .., 0x0, 0xA) => Ok(wait_key),
        (0xF, .., 0x1, 0x5) => Ok(set_delay),
        (0xF, .., 0x1, 0x8) => Ok(set_sound),
        (0xF, .., 0x1, 0xE) => Ok(add_index),
        (0xF, .., 0x2, 0x9) => Ok(font_address),
        (0xF, .., 0x3, 0x3) => Ok(store_bcd),
        (0xF, .., 0x5, 0x5) => Ok(store_regs),
        (0xF, .., 0x6, 0x5) => Ok(load_regs),
        _ => Err(Fault::UnknownOpcode { opcode: op }),
    }
}
