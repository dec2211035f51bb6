mod exec;
mod helpers;

use std::sync::atomic::{AtomicBool, Ordering};

use typed_builder::TypedBuilder;

use crate::bus::Bus8080;
use crate::decode::{Instruction, DOCUMENTED, WITH_ALIASES};
use crate::error::CpuError;
use crate::flags::Flags;
use crate::regs::Registers;

/// How the twelve opcodes without a documented meaning are decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UndocumentedOpcodes {
    /// Fetching one is a fatal `UnimplementedOpcode` error.
    #[default]
    Fault,
    /// Execute them as the NOP/JMP/RET/CALL they alias on real silicon.
    /// CP/M exerciser ROMs rely on this.
    Alias,
}

/// Power-on configuration of the CPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TypedBuilder)]
pub struct CpuConfig {
    #[builder(default)]
    pub initial_pc: u16,
    #[builder(default)]
    pub initial_sp: u16,
    #[builder(default)]
    pub undocumented: UndocumentedOpcodes,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Execution state of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuState {
    Running,
    /// Stopped by `HLT` or by an external stop request.
    Halted,
    /// A fatal condition was raised; see [`Cpu8080::fault`].
    Errored,
}

/// Intel 8080 execution engine.
///
/// The CPU owns its bus so that any implementation of [`Bus8080`] (the
/// arcade memory, a logging test double, ...) can be plugged in.
pub struct Cpu8080<B: Bus8080> {
    regs: Registers,
    bus: B,
    cycles: u64,
    halted: bool,
    fault: Option<CpuError>,
    interrupts_enabled: bool,
    config: CpuConfig,
    table: &'static [Instruction; 256],
}

impl<B: Bus8080> Cpu8080<B> {
    /// Create a CPU in reset state with the default configuration.
    pub fn new(bus: B) -> Self {
        Self::with_config(bus, CpuConfig::default())
    }

    pub fn with_config(bus: B, config: CpuConfig) -> Self {
        let table = match config.undocumented {
            UndocumentedOpcodes::Fault => &DOCUMENTED,
            UndocumentedOpcodes::Alias => &WITH_ALIASES,
        };
        Self {
            regs: Registers::new(config.initial_pc, config.initial_sp),
            bus,
            cycles: 0,
            halted: false,
            fault: None,
            interrupts_enabled: false,
            config,
            table,
        }
    }

    /// Reset all registers to their configured power-on values.
    ///
    /// Bus contents are left alone.
    pub fn reset(&mut self) {
        self.regs = Registers::new(self.config.initial_pc, self.config.initial_sp);
        self.cycles = 0;
        self.halted = false;
        self.fault = None;
        self.interrupts_enabled = false;
    }

    pub fn state(&self) -> CpuState {
        if self.fault.is_some() {
            CpuState::Errored
        } else if self.halted {
            CpuState::Halted
        } else {
            CpuState::Running
        }
    }

    /// The error that moved the engine to `Errored`, if any.
    pub fn fault(&self) -> Option<&CpuError> {
        self.fault.as_ref()
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.regs
    }

    pub fn flags(&self) -> Flags {
        self.regs.flags()
    }

    pub fn pc(&self) -> u16 {
        self.regs.pc()
    }

    pub fn sp(&self) -> u16 {
        self.regs.sp()
    }

    /// Total clock cycles executed since power-on or the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.interrupts_enabled
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn into_bus(self) -> B {
        self.bus
    }

    /// Stop at the current instruction boundary.
    ///
    /// Has no effect once the engine has errored.
    pub fn request_stop(&mut self) {
        if self.fault.is_none() {
            log::debug!(
                "Stop requested at PC {:04X} after {} cycles",
                self.regs.pc(),
                self.cycles
            );
            self.halted = true;
        }
    }

    /// Execute a single instruction and return the resulting state.
    ///
    /// A halted engine does nothing. An errored engine returns its fault
    /// again without touching any state.
    pub fn step(&mut self) -> Result<CpuState, CpuError> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }
        if self.halted {
            return Ok(CpuState::Halted);
        }

        let pc = self.regs.pc();
        let opcode = self.fetch_byte();
        let instruction = self.table[opcode as usize];

        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "{pc:04X}: {opcode:02X} {instruction} A={:02X} F={:02X} BC={:04X} DE={:04X} HL={:04X} SP={:04X} CYC={}",
                self.regs.a(),
                self.regs.flags().bits(),
                self.regs.bc(),
                self.regs.de(),
                self.regs.hl(),
                self.regs.sp(),
                self.cycles
            );
        }

        match self.execute(instruction, opcode, pc) {
            Ok(cycles) => {
                self.cycles += u64::from(cycles);
                Ok(self.state())
            }
            Err(err) => {
                log::error!("CPU fault: {err}");
                self.fault = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Step until the engine leaves `Running`.
    pub fn run(&mut self) -> Result<CpuState, CpuError> {
        self.run_until(&AtomicBool::new(false))
    }

    /// Step until the engine leaves `Running` or `stop` is raised.
    ///
    /// `stop` is only checked between instructions.
    pub fn run_until(&mut self, stop: &AtomicBool) -> Result<CpuState, CpuError> {
        loop {
            if stop.load(Ordering::Relaxed) {
                self.request_stop();
            }
            match self.step()? {
                CpuState::Running => {}
                state => return Ok(state),
            }
        }
    }

    /// Deliver a maskable interrupt.
    ///
    /// When interrupts are enabled this behaves like `RST rst`: interrupts
    /// are disabled, PC is pushed, execution continues at `8 * rst` and a
    /// halted CPU resumes. Returns whether the interrupt was accepted.
    pub fn interrupt(&mut self, rst: u8) -> bool {
        if !self.interrupts_enabled || self.fault.is_some() {
            return false;
        }
        self.interrupts_enabled = false;
        self.halted = false;
        let pc = self.regs.pc();
        self.push_word(pc);
        self.regs.set_pc(u16::from(rst & 0x07) << 3);
        self.cycles += 11;
        true
    }
}
