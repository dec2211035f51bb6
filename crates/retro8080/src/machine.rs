use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use retro8080_cpu::{Cpu8080, CpuConfig, CpuState, Memory};
use typed_builder::TypedBuilder;

/// Everything needed to bring up a machine.
#[derive(Clone, Debug, TypedBuilder)]
pub struct MachineConfig {
    /// ROM image loaded at 0x0000.
    #[builder(setter(into))]
    pub rom_path: PathBuf,
    #[builder(default)]
    pub cpu: CpuConfig,
    /// Stop once the CPU has run at least this many cycles.
    #[builder(default)]
    pub max_cycles: Option<u64>,
}

/// Outcome of [`Machine::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub state: CpuState,
    /// Total cycles since power-on.
    pub cycles: u64,
    /// Instructions executed by this call.
    pub instructions: u64,
}

/// The CPU wired to the arcade board's mirrored memory.
pub struct Machine {
    cpu: Cpu8080<Memory>,
    max_cycles: Option<u64>,
}

impl Machine {
    /// Load the configured ROM and power the CPU on.
    pub fn new(config: MachineConfig) -> Result<Self> {
        let mut memory = Memory::new();
        memory
            .load_rom(&config.rom_path)
            .with_context(|| format!("Failed to load ROM '{}'", config.rom_path.display()))?;
        Ok(Self::with_memory(memory, config.cpu, config.max_cycles))
    }

    /// Build a machine around memory that has already been populated.
    pub fn with_memory(memory: Memory, cpu: CpuConfig, max_cycles: Option<u64>) -> Self {
        Self {
            cpu: Cpu8080::with_config(memory, cpu),
            max_cycles,
        }
    }

    pub fn cpu(&self) -> &Cpu8080<Memory> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu8080<Memory> {
        &mut self.cpu
    }

    fn budget_exhausted(&self) -> bool {
        self.max_cycles
            .is_some_and(|budget| self.cpu.cycles() >= budget)
    }

    /// Run until the CPU halts, faults, `stop` is raised or the cycle budget
    /// runs out. The last two leave the CPU halted at an instruction
    /// boundary.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<RunSummary> {
        log::info!(
            "Starting CPU at PC {:04X} (SP {:04X})",
            self.cpu.pc(),
            self.cpu.sp()
        );

        let mut instructions = 0u64;
        let state = loop {
            if stop.load(Ordering::Relaxed) || self.budget_exhausted() {
                self.cpu.request_stop();
            }

            let before = self.cpu.cycles();
            let state = self.cpu.step().with_context(|| {
                format!(
                    "CPU stopped after {} instructions ({} cycles)",
                    instructions,
                    self.cpu.cycles()
                )
            })?;
            if self.cpu.cycles() != before {
                instructions += 1;
            }

            if state != CpuState::Running {
                break state;
            }
        };

        let summary = RunSummary {
            state,
            cycles: self.cpu.cycles(),
            instructions,
        };
        log::info!(
            "CPU {:?} at PC {:04X}: {} instructions, {} cycles",
            summary.state,
            self.cpu.pc(),
            summary.instructions,
            summary.cycles
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro8080_cpu::CpuError;

    fn machine_with(program: &[u8], max_cycles: Option<u64>) -> Machine {
        let mut memory = Memory::new();
        memory.load_bytes(program).unwrap();
        Machine::with_memory(memory, CpuConfig::default(), max_cycles)
    }

    #[test]
    fn runs_to_hlt() {
        // MVI A,42h ; HLT
        let mut machine = machine_with(&[0x3e, 0x42, 0x76], None);
        let summary = machine.run(&AtomicBool::new(false)).unwrap();

        assert_eq!(
            summary,
            RunSummary {
                state: CpuState::Halted,
                cycles: 14,
                instructions: 2,
            }
        );
        assert_eq!(machine.cpu().registers().a(), 0x42);
    }

    #[test]
    fn cycle_budget_stops_at_instruction_boundary() {
        // loop: JMP loop
        let mut machine = machine_with(&[0xc3, 0x00, 0x00], Some(95));
        let summary = machine.run(&AtomicBool::new(false)).unwrap();

        assert_eq!(summary.state, CpuState::Halted);
        assert_eq!(summary.cycles, 100);
        assert_eq!(summary.instructions, 10);
        assert_eq!(machine.cpu().pc(), 0x0000);
    }

    #[test]
    fn stop_flag_is_honoured_before_the_first_instruction() {
        let mut machine = machine_with(&[0x00], None);
        let summary = machine.run(&AtomicBool::new(true)).unwrap();

        assert_eq!(summary.state, CpuState::Halted);
        assert_eq!(summary.cycles, 0);
        assert_eq!(summary.instructions, 0);
    }

    #[test]
    fn fault_is_reported_with_context() {
        // NOP ; (CBh)
        let mut machine = machine_with(&[0x00, 0xcb], None);
        let err = machine.run(&AtomicBool::new(false)).unwrap_err();

        assert!(err.to_string().contains("after 1 instructions"), "{err}");
        assert_eq!(
            err.downcast_ref::<CpuError>(),
            Some(&CpuError::UnimplementedOpcode {
                opcode: 0xcb,
                pc: 0x0001,
                cycles: 4,
            })
        );
        assert_eq!(machine.cpu().state(), CpuState::Errored);
    }

    #[test]
    fn new_loads_rom_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "retro8080-machine-{}.rom",
            std::process::id()
        ));
        std::fs::write(&path, [0x06, 0x07, 0x76]).unwrap();

        let config = MachineConfig::builder().rom_path(path.clone()).build();
        let mut machine = Machine::new(config).unwrap();
        std::fs::remove_file(&path).unwrap();

        let summary = machine.run(&AtomicBool::new(false)).unwrap();
        assert_eq!(summary.state, CpuState::Halted);
        assert_eq!(machine.cpu().registers().b(), 0x07);
    }

    #[test]
    fn new_reports_missing_rom() {
        let config = MachineConfig::builder()
            .rom_path("/nonexistent/retro8080/invaders.rom")
            .build();
        let err = Machine::new(config).err().unwrap();
        assert!(err.to_string().contains("Failed to load ROM"), "{err}");
    }

    #[test]
    fn new_rejects_oversized_rom() {
        let path = std::env::temp_dir().join(format!(
            "retro8080-oversized-{}.rom",
            std::process::id()
        ));
        std::fs::write(&path, vec![0u8; 0x4001]).unwrap();

        let config = MachineConfig::builder().rom_path(path.clone()).build();
        let result = Machine::new(config);
        std::fs::remove_file(&path).unwrap();

        let err = result.err().unwrap();
        assert!(format!("{err:#}").contains("memory holds only"), "{err:#}");
    }
}
