use std::fmt::Display;

use crate::symbols::symbol::Type;

/// Operand of `LoadG` / `StoG`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// Absolute data-memory slot, reserved registers already skipped.
    Offset(usize),
    /// Resolved by the linker.
    Name(String),
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Address::Offset(offset) => write!(f, "{}", offset),
            Address::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Header directives, placed ahead of the generated body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Names(usize),
    Var(Type, String),
    Proc(String),
    ExternalVar(Type, String),
    ExternalProc(String),
    ExternalConst(Type, String),
}

impl Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Directive::Names(count) => write!(f, ".names {}", count),
            Directive::Var(ty, name) => write!(f, ".var {} {}", ty.tag(), name),
            Directive::Proc(name) => write!(f, ".proc {}", name),
            Directive::ExternalVar(ty, name) => write!(f, ".external var {} {}", ty.tag(), name),
            Directive::ExternalProc(name) => write!(f, ".external proc {}", name),
            Directive::ExternalConst(ty, name) => {
                write!(f, ".external const {} {}", ty.tag(), name)
            }
        }
    }
}

/// One stack machine operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Const(i64),
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    Equ,
    Lss,
    Gtr,
    Neq,
    Leq,
    Geq,
    /// Level difference, frame offset.
    Load(usize, usize),
    LoadG(Address),
    Sto(usize, usize),
    StoG(Address),
    Enter(usize),
    Leave,
    Ret,
    Call(usize, String),
    Jmp(String),
    FJmp(String),
    Read,
    Write,
    Nop,
    Directive(Directive),
}

impl Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Const(n) => write!(f, "Const {}", n),
            Op::Add => write!(f, "Add"),
            Op::Sub => write!(f, "Sub"),
            Op::Mul => write!(f, "Mul"),
            Op::Div => write!(f, "Div"),
            Op::Neg => write!(f, "Neg"),
            Op::Equ => write!(f, "Equ"),
            Op::Lss => write!(f, "Lss"),
            Op::Gtr => write!(f, "Gtr"),
            Op::Neq => write!(f, "Neq"),
            Op::Leq => write!(f, "Leq"),
            Op::Geq => write!(f, "Geq"),
            Op::Load(level, offset) => write!(f, "Load {} {}", level, offset),
            Op::LoadG(address) => write!(f, "LoadG {}", address),
            Op::Sto(level, offset) => write!(f, "Sto {} {}", level, offset),
            Op::StoG(address) => write!(f, "StoG {}", address),
            Op::Enter(size) => write!(f, "Enter {}", size),
            Op::Leave => write!(f, "Leave"),
            Op::Ret => write!(f, "Ret"),
            Op::Call(level, label) => write!(f, "Call {} {}", level, label),
            Op::Jmp(label) => write!(f, "Jmp {}", label),
            Op::FJmp(label) => write!(f, "FJmp {}", label),
            Op::Read => write!(f, "Read"),
            Op::Write => write!(f, "Write"),
            Op::Nop => write!(f, "Nop"),
            Op::Directive(directive) => write!(f, "{}", directive),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub label: Option<String>,
    pub op: Op,
}

impl Instruction {
    pub fn new(op: Op) -> Self {
        Instruction { label: None, op }
    }

    pub fn labelled(label: String, op: Op) -> Self {
        Instruction {
            label: Some(label),
            op,
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}: {}", label, self.op),
            None => write!(f, "{}", self.op),
        }
    }
}

/// An ordered instruction list. An instruction's index is its address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn extend(&mut self, instructions: impl IntoIterator<Item = Instruction>) {
        self.instructions.extend(instructions);
    }

    pub fn truncate(&mut self, len: usize) {
        self.instructions.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Instruction> {
        self.instructions.get_mut(index)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }

    /// The listing text, one instruction per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for instruction in self.instructions.iter() {
            out.push_str(&instruction.to_string());
            out.push('\n');
        }
        out
    }
}
