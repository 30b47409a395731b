use log::{debug, trace};

use crate::symbols::scope::Resolved;

use super::instruction::{Address, Instruction, Op, Program};

/// Data-memory slots 0..=2 hold machine control registers.
pub const GLOBAL_RESERVED: usize = 3;

/// Append-only code buffer with a stack of pending jump targets.
///
/// Forward jumps go to a label opened before the jump is emitted; the
/// label is placed, as a `Nop` carrying it, once the target is reached.
/// Open labels nest exactly like the constructs that opened them.
#[derive(Debug, Default)]
pub struct Emitter {
    program: Program,
    open_labels: Vec<String>,
    label_seed: usize,
}

impl Emitter {
    pub fn new() -> Self {
        Emitter::default()
    }

    /// Appends `op`, returning its address.
    pub fn emit(&mut self, op: Op) -> usize {
        trace!("{:>4}  {}", self.program.len(), op);
        self.program.push(Instruction::new(op));
        self.program.len() - 1
    }

    pub fn emit_labelled(&mut self, label: String, op: Op) -> usize {
        trace!("{:>4}  {}: {}", self.program.len(), label, op);
        self.program.push(Instruction::labelled(label, op));
        self.program.len() - 1
    }

    /// Address the next instruction will get.
    pub fn position(&self) -> usize {
        self.program.len()
    }

    pub fn new_label(&mut self) -> String {
        let label = format!("L${}", self.label_seed);
        self.label_seed += 1;
        debug!("allocated label {}", label);
        label
    }

    /// Allocates a label and pushes it as pending.
    pub fn open_label(&mut self) -> String {
        let label = self.new_label();
        self.open_labels.push(label.clone());
        label
    }

    pub fn peek_label(&self) -> Option<&str> {
        self.open_labels.last().map(String::as_str)
    }

    /// Takes the innermost pending label without landing it.
    pub fn pop_label(&mut self) -> Option<String> {
        self.open_labels.pop()
    }

    /// Removes and returns everything emitted from `start` on.
    pub fn take_from(&mut self, start: usize) -> Vec<Instruction> {
        let taken = self.copy_range(start, self.program.len());
        self.program.truncate(start);
        taken
    }

    /// Lands the innermost pending label at the current position.
    pub fn close_label(&mut self) -> Option<usize> {
        let label = self.open_labels.pop()?;
        Some(self.land(label))
    }

    /// Emits a `Nop` carrying `label`.
    pub fn land(&mut self, label: String) -> usize {
        self.emit_labelled(label, Op::Nop)
    }

    pub fn pending_labels(&self) -> usize {
        self.open_labels.len()
    }

    /// Replaces the instruction at `index`, e.g. a frame size placeholder.
    pub fn patch(&mut self, index: usize, instruction: Instruction) {
        debug!("patched {} to {}", index, instruction);
        if let Some(slot) = self.program.get_mut(index) {
            *slot = instruction;
        }
    }

    /// A copy of the instructions emitted in `start..end`.
    pub fn copy_range(&self, start: usize, end: usize) -> Vec<Instruction> {
        self.program
            .instructions()
            .get(start..end)
            .map(|slice| slice.to_vec())
            .unwrap_or_default()
    }

    /// Re-emits previously copied instructions.
    pub fn replay(&mut self, instructions: &[Instruction]) {
        for instruction in instructions.iter() {
            trace!("{:>4}  {} (replayed)", self.program.len(), instruction);
            self.program.push(instruction.clone());
        }
    }

    /// Pushes the value of a storage symbol.
    pub fn load(&mut self, target: &Resolved, level_difference: usize) -> usize {
        let op = match storage_address(target) {
            Storage::Global(address) => Op::LoadG(address),
            Storage::Frame(offset) => Op::Load(level_difference, offset),
        };
        self.emit(op)
    }

    /// Pops the top of stack into a storage symbol.
    pub fn store(&mut self, target: &Resolved, level_difference: usize) -> usize {
        let op = match storage_address(target) {
            Storage::Global(address) => Op::StoG(address),
            Storage::Frame(offset) => Op::Sto(level_difference, offset),
        };
        self.emit(op)
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Prepends `header` to the generated body.
    pub fn finish(self, header: Vec<Instruction>) -> Program {
        let mut out = Program::new();
        out.extend(header);
        out.extend(self.program.instructions().iter().cloned());
        out
    }
}

enum Storage {
    Global(Address),
    Frame(usize),
}

fn storage_address(target: &Resolved) -> Storage {
    let symbol = &target.symbol;
    let offset = symbol.offset.unwrap_or_default();

    if target.external {
        Storage::Global(Address::Name(symbol.name.clone()))
    } else if symbol.is_global() {
        Storage::Global(Address::Offset(offset + GLOBAL_RESERVED))
    } else {
        Storage::Frame(offset)
    }
}
