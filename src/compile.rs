use std::collections::HashMap;

use crate::{Atom, Expr, Term};

/// One step of a postfix boolean program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Instr {
    Const(bool),
    /// Push the truth value of atom `i`, taken from bit `i` of the row.
    Atom(usize),
    Not,
    And,
    Or,
    Implies,
}

/// A condition lowered to a postfix program over indexed atoms.
///
/// Atoms are numbered in order of first occurrence; comparisons between
/// two literals that can be decided statically are folded into constants.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Formula {
    pub(crate) program: Vec<Instr>,
    pub(crate) atoms: Vec<Atom>,
}

enum Work<'e> {
    Visit(&'e Expr),
    Emit(Instr),
}

impl Formula {
    pub(crate) fn compile(expr: &Expr) -> Formula {
        let mut program = Vec::new();
        let mut atoms = Interner::default();
        let mut work = vec![Work::Visit(expr)];

        while let Some(item) = work.pop() {
            let node = match item {
                Work::Emit(instr) => {
                    program.push(instr);
                    continue;
                }
                Work::Visit(node) => node,
            };
            match node {
                Expr::Literal(value) => program.push(Instr::Const(value.is_truthy())),
                Expr::Variable(name) => {
                    let idx = atoms.intern(Atom::Truthy(name.clone()));
                    program.push(Instr::Atom(idx));
                }
                Expr::Compare { op, left, right } => {
                    if let (Term::Literal(l), Term::Literal(r)) = (left, right) {
                        if let Some(result) = l.compare(*op, r) {
                            program.push(Instr::Const(result));
                            continue;
                        }
                    }
                    let atom = Atom::Comparison {
                        op: *op,
                        left: left.clone(),
                        right: right.clone(),
                    };
                    let idx = atoms.intern(atom);
                    program.push(Instr::Atom(idx));
                }
                Expr::Not(inner) => {
                    work.push(Work::Emit(Instr::Not));
                    work.push(Work::Visit(inner));
                }
                Expr::And(args) => push_chain(&mut work, args, Instr::And),
                Expr::Or(args) => push_chain(&mut work, args, Instr::Or),
                Expr::Implies(a, b) => {
                    // Popped in reverse: a, then b, then the operator.
                    work.push(Work::Emit(Instr::Implies));
                    work.push(Work::Visit(b));
                    work.push(Work::Visit(a));
                }
            }
        }

        Formula {
            program,
            atoms: atoms.atoms,
        }
    }

    /// Evaluate under the assignment encoded in `row`. `stack` is scratch
    /// space reused across rows.
    pub(crate) fn eval(&self, row: u64, stack: &mut Vec<bool>) -> bool {
        stack.clear();
        for instr in &self.program {
            let value = match *instr {
                Instr::Const(b) => b,
                Instr::Atom(i) => (row >> i) & 1 == 1,
                Instr::Not => !stack.pop().unwrap_or(false),
                Instr::And | Instr::Or | Instr::Implies => {
                    let right = stack.pop().unwrap_or(false);
                    let left = stack.pop().unwrap_or(false);
                    match instr {
                        Instr::And => left && right,
                        Instr::Or => left || right,
                        _ => !left || right,
                    }
                }
            };
            stack.push(value);
        }
        stack.pop().unwrap_or(false)
    }
}

/// Schedule `args[0] args[1] op args[2] op ...` so an n-ary chain lowers to
/// binary instructions without nesting the tree.
fn push_chain<'e>(work: &mut Vec<Work<'e>>, args: &'e [Expr], instr: Instr) {
    let Some((first, rest)) = args.split_first() else {
        // Identity of the connective.
        work.push(Work::Emit(Instr::Const(instr == Instr::And)));
        return;
    };
    for arg in rest.iter().rev() {
        work.push(Work::Emit(instr));
        work.push(Work::Visit(arg));
    }
    work.push(Work::Visit(first));
}

#[derive(Default)]
struct Interner {
    index: HashMap<Atom, usize>,
    atoms: Vec<Atom>,
}

impl Interner {
    fn intern(&mut self, atom: Atom) -> usize {
        if let Some(&idx) = self.index.get(&atom) {
            return idx;
        }
        let idx = self.atoms.len();
        self.atoms.push(atom.clone());
        self.index.insert(atom, idx);
        idx
    }
}

/// Distinct atomic propositions of `expr`, in order of first occurrence.
///
/// Statically decidable literal-to-literal comparisons and bare literals
/// are not atoms: their truth value is fixed.
#[must_use]
pub fn extract_atoms(expr: &Expr) -> Vec<Atom> {
    Formula::compile(expr).atoms
}
