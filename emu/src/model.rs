use arch::inst::Inst;
use arch::{Word, MEM_SIZE};

use crate::error::Error;
use crate::input::Input;

pub type Memory = [Word; MEM_SIZE];

#[derive(Debug)]
pub struct State {
    pc: usize,
    acc: Word,
    mem: Memory,
    input: Input,
    output: Vec<Word>,
    halted: bool,
}

// Memory access
impl State {
    pub fn get(&self, addr: impl Into<usize>) -> Word {
        self.mem[addr.into()]
    }

    pub fn set(&mut self, addr: impl Into<usize>, val: Word) {
        self.mem[addr.into()] = val;
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn acc(&self) -> Word {
        self.acc
    }

    pub fn mem(&self) -> &Memory {
        &self.mem
    }

    pub fn output(&self) -> &[Word] {
        &self.output
    }

    pub fn into_output(self) -> Vec<Word> {
        self.output
    }

    fn inc_pc(&mut self) {
        self.pc += 1;
    }

    fn set_pc(&mut self, addr: u8) {
        self.pc = addr as usize;
    }
}

impl State {
    pub fn new(mem: Memory, input: Input) -> Self {
        State {
            pc: 0,
            acc: 0,
            mem,
            input,
            output: vec![],
            halted: false,
        }
    }

    /// Halted, or `pc` ran off the end of memory.
    pub fn is_terminated(&self) -> bool {
        self.halted || self.pc >= MEM_SIZE
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Fetch, decode and execute one instruction. Returns the address and
    /// word that were fetched.
    pub fn exec(&mut self) -> Result<(usize, Word), Error> {
        let addr = self.pc;
        let word = self.mem[addr];
        let inst =
            Inst::decode(word).map_err(|_| Error::InvalidInstruction { addr, word })?;

        match inst {
            Inst::HLT => self.halted = true,
            Inst::ADD(a) => self.calc(addr, Word::checked_add, a)?,
            Inst::SUB(a) => self.calc(addr, Word::checked_sub, a)?,
            Inst::STA(a) => {
                self.set(a, self.acc);
                self.inc_pc();
            }
            Inst::LDA(a) => self.calc(addr, |_, v| Some(v), a)?,
            Inst::BRA(a) => self.branch(true, a),
            Inst::BRZ(a) => self.branch(self.acc == 0, a),
            Inst::BRP(a) => self.branch(self.acc >= 0, a),
            Inst::INP => {
                self.acc = self.input.next()?;
                self.inc_pc();
            }
            Inst::OUT => {
                self.output.push(self.acc);
                self.inc_pc();
            }
            Inst::NOP(_) => self.inc_pc(),
        }
        Ok((addr, word))
    }

    fn calc(
        &mut self,
        at: usize,
        f: impl Fn(Word, Word) -> Option<Word>,
        addr: u8,
    ) -> Result<(), Error> {
        self.acc = f(self.acc, self.get(addr)).ok_or(Error::Overflow { addr: at })?;
        self.inc_pc();
        Ok(())
    }

    fn branch(&mut self, taken: bool, addr: u8) {
        if taken {
            self.set_pc(addr);
        } else {
            self.inc_pc();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(program: &[Word], input: &[Word]) -> State {
        let mut mem = [0; MEM_SIZE];
        mem[..program.len()].copy_from_slice(program);
        State::new(mem, Input::batch(input.iter().copied()))
    }

    fn step(state: &mut State, n: usize) {
        for _ in 0..n {
            state.exec().unwrap();
        }
    }

    #[test]
    fn hlt_stops_in_place() {
        let mut s = state(&[0], &[]);
        assert_eq!(s.exec().unwrap(), (0, 0));
        assert!(s.is_halted());
        assert!(s.is_terminated());
        assert_eq!(s.pc(), 0);
    }

    #[test]
    fn arithmetic() {
        // LDA 5; ADD 6; SUB 7; STA 8
        let mut s = state(&[505, 106, 207, 308, 0, 10, 20, 35], &[]);
        step(&mut s, 4);
        assert_eq!(s.acc(), -5);
        assert_eq!(s.get(8usize), -5);
        assert_eq!(s.pc(), 4);
    }

    #[test]
    fn bra_sets_pc() {
        let mut s = state(&[642], &[]);
        step(&mut s, 1);
        assert_eq!(s.pc(), 42);
    }

    #[test]
    fn brz_only_on_zero() {
        for (acc, pc) in [(0, 9), (1, 2), (-1, 2)] {
            let mut s = state(&[901, 709], &[acc]);
            step(&mut s, 2);
            assert_eq!(s.pc(), pc, "acc = {acc}");
        }
    }

    #[test]
    fn brp_on_zero_and_positive() {
        for (acc, pc) in [(0, 9), (5, 9), (-1, 2)] {
            let mut s = state(&[901, 809], &[acc]);
            step(&mut s, 2);
            assert_eq!(s.pc(), pc, "acc = {acc}");
        }
    }

    #[test]
    fn io() {
        let mut s = state(&[901, 902, 901, 902], &[8, -3]);
        step(&mut s, 4);
        assert_eq!(s.output(), &[8, -3]);
    }

    #[test]
    fn starved_input() {
        let mut s = state(&[901], &[]);
        assert!(matches!(s.exec(), Err(Error::InputStarved)));
    }

    #[test]
    fn invalid_instruction() {
        for word in [400, 499, -7, 1000] {
            let mut s = state(&[902, word], &[]);
            step(&mut s, 1);
            match s.exec() {
                Err(Error::InvalidInstruction { addr, word: w }) => {
                    assert_eq!((addr, w), (1, word));
                }
                other => panic!("{word}: {other:?}"),
            }
        }
    }

    #[test]
    fn overflow_is_fatal() {
        // LDA 3; ADD 4; HLT; MAX; 1
        let mut s = state(&[503, 104, 0, Word::MAX, 1], &[]);
        step(&mut s, 1);
        assert!(matches!(s.exec(), Err(Error::Overflow { addr: 1 })));
        assert_eq!(s.acc(), Word::MAX);

        // LDA 3; SUB 4; HLT; MIN; 1
        let mut s = state(&[503, 204, 0, Word::MIN, 1], &[]);
        step(&mut s, 1);
        assert!(matches!(s.exec(), Err(Error::Overflow { addr: 1 })));
    }

    #[test]
    fn large_values_keep_their_sign() {
        // LDA 4; ADD 5; BRP 9; HLT; i64::MAX; 1
        let big = Word::from(i64::MAX);
        let mut s = state(&[504, 105, 809, 0, big, 1], &[]);
        step(&mut s, 3);
        assert_eq!(s.acc(), big + 1);
        assert_eq!(s.pc(), 9);
    }

    #[test]
    fn other_io_words_do_nothing() {
        let mut s = state(&[900, 903, 999, 902], &[]);
        step(&mut s, 4);
        assert_eq!(s.pc(), 4);
        assert_eq!(s.acc(), 0);
        assert_eq!(s.output(), &[0]);
    }

    #[test]
    fn falls_off_the_end() {
        let mut s = state(&[], &[]);
        s.set(99usize, 902);
        s.set_pc(99);
        step(&mut s, 1);
        assert_eq!(s.pc(), 100);
        assert!(s.is_terminated());
        assert!(!s.is_halted());
    }
}
