//! Symbolic stack-machine code and the label combinators used by the translator.

mod instruction;


pub use instruction::*;

use std::collections::BTreeMap;
use tracing::debug;

/// Hands out unique labels, numbered from 0 for each compile.
#[derive(Debug, Default)]
pub struct LabelAllocator {
    count: usize,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_label(&mut self) -> Label {
        let label = Label(self.count);
        self.count += 1;
        debug!(label = label.0, "allocated label");
        label
    }

    /// Number of labels handed out so far.
    pub fn allocated(&self) -> usize {
        self.count
    }
}

/// Append-only instruction sink owned by the translator.
#[derive(Debug, Default)]
pub struct CodeBuffer {
    instructions: Vec<Instruction>,
    labels: LabelAllocator,
}

impl CodeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn new_label(&mut self) -> Label {
        self.labels.next_label()
    }

    /// Emits `label:` at the current position.
    pub fn place(&mut self, label: Label) {
        self.emit(Instruction::Label(label));
    }

    pub fn jump(&mut self, kind: JumpKind, label: Label) {
        self.emit(Instruction::Jump(kind, label));
    }

    /// Conditional forward jump to a fresh label, taken when the condition just
    /// evaluated is false.
    pub fn make_test(&mut self) -> Label {
        let label = self.new_label();
        self.jump(JumpKind::ForwardIfFalse, label);
        label
    }

    /// Jumps over the else branch and anchors `prev`, where the failed test lands.
    pub fn make_else(&mut self, prev: Label) -> Label {
        let label = self.new_label();
        self.jump(JumpKind::Forward, label);
        self.place(prev);
        label
    }

    /// Places a fresh label to jump back to.
    pub fn make_loop_top(&mut self) -> Label {
        let label = self.new_label();
        self.place(label);
        label
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn finish(self) -> Listing {
        Listing {
            instructions: self.instructions,
        }
    }
}

/// Finished instruction listing of one compile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub instructions: Vec<Instruction>,
}

impl Listing {
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Labels some jump refers to that are never placed.
    pub fn undefined_labels(&self) -> Vec<Label> {
        let defined = self.definitions();
        let mut missing: Vec<Label> = self
            .iter()
            .filter_map(Instruction::target)
            .filter(|label| !defined.contains_key(label))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    /// Labels placed more than once.
    pub fn duplicate_labels(&self) -> Vec<Label> {
        self.definitions()
            .into_iter()
            .filter_map(|(label, count)| (count > 1).then_some(label))
            .collect()
    }

    fn definitions(&self) -> BTreeMap<Label, usize> {
        let mut defined = BTreeMap::new();
        for instruction in self.iter() {
            if let Instruction::Label(label) = instruction {
                *defined.entry(*label).or_insert(0) += 1;
            }
        }
        defined
    }
}

impl<'a> IntoIterator for &'a Listing {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
