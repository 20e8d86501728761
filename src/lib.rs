pub use crate::error::{Fault, RomError};
pub use crate::interpreter::Interpreter;
pub use crate::state::FrameBuffer;

pub mod constants;
mod error;
mod instruction;
mod interpreter;
mod opcode;
mod operations;
mod state;
