//! Intel 8080 CPU core.
//!
//! The crate is organised the way the processor is: a [`Registers`] file, a
//! [`Flags`] unit, an opcode [`decode`] table and the [`Cpu8080`] execution
//! engine that drives them against anything implementing [`Bus8080`].
//!
//! ```
//! use retro8080_cpu::{Cpu8080, CpuState, Memory};
//!
//! let mut memory = Memory::new();
//! // MVI A,42h ; HLT
//! memory.load_bytes(&[0x3e, 0x42, 0x76]).unwrap();
//!
//! let mut cpu = Cpu8080::new(memory);
//! assert_eq!(cpu.run().unwrap(), CpuState::Halted);
//! assert_eq!(cpu.registers().a(), 0x42);
//! assert_eq!(cpu.cycles(), 7 + 7);
//! ```

pub mod bus;
pub mod cpu;
pub mod decode;
pub mod error;
pub mod flags;
pub mod memory;
pub mod regs;

pub use bus::Bus8080;
pub use cpu::{Cpu8080, CpuConfig, CpuState, UndocumentedOpcodes};
pub use decode::{AluOp, Condition, Instruction};
pub use error::{CpuError, RomError};
pub use flags::{FlagKind, Flags, Operands};
pub use memory::{Memory, MEMORY_SIZE};
pub use regs::Registers;
