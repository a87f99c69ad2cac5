use arch::inst::Inst;
use arch::Word;
use color_print::{ceprintln, cformat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Error;
use crate::model::State;

use super::Hook;

/// Prints registers, and selected memory cells when execution passes
/// configured addresses.
#[derive(Debug)]
pub struct Dump {
    file: Option<String>,
    all: bool,
    list: List,
}

/// Address of the executed instruction to what should be printed there.
#[derive(Debug, Default, Serialize, Deserialize)]
struct List(HashMap<usize, Config>);

#[derive(Debug, Default, Serialize, Deserialize)]
struct Config {
    #[serde(default)]
    mem: Vec<usize>,
}

impl Dump {
    pub fn arg(file: Option<String>, all: bool) -> Result<Self, Error> {
        match file {
            Some(fname) => {
                let text = std::fs::read_to_string(&fname)
                    .map_err(|e| Error::FileOpen(fname.clone(), e))?;
                let mut dump = Self::from_yaml(&text, all)
                    .map_err(|e| Error::DumpConfig(fname.clone(), e))?;
                dump.file = Some(fname);
                Ok(dump)
            }
            None => Ok(Self {
                file,
                all,
                list: List::default(),
            }),
        }
    }

    pub fn from_yaml(text: &str, all: bool) -> Result<Self, serde_yaml::Error> {
        let list: List = serde_yaml::from_str(text)?;
        Ok(Self {
            file: None,
            all,
            list,
        })
    }

    fn get(&self, addr: usize) -> Option<&Config> {
        self.list.0.get(&addr)
    }

    /// Lines printed for one step.
    pub fn render(&self, time: u64, addr: usize, word: Word, state: &State) -> Vec<String> {
        let mut lines = vec![];
        match self.get(addr) {
            Some(cfg) => {
                lines.push(self.reg(time, addr, word, state));
                lines.extend(self.cells(state, &cfg.mem));
            }
            None if self.all => lines.push(self.reg(time, addr, word, state)),
            None => {}
        }
        lines
    }

    fn reg(&self, time: u64, addr: usize, word: Word, state: &State) -> String {
        let inst = match Inst::decode(word) {
            Ok(inst) => inst.cformat(),
            Err(_) => cformat!("<r,s>???</>   "),
        };
        cformat!(
            " [{:0>4}] <green>{:0>2}</>: {:>5} {} | pc: {:0>2} | acc: {:>5} |",
            time,
            addr,
            word,
            inst,
            state.pc(),
            state.acc()
        )
    }

    fn cells(&self, state: &State, addrs: &[usize]) -> Vec<String> {
        addrs
            .iter()
            .map(|&addr| match state.mem().get(addr) {
                Some(val) => format!("        | {:0>2} : {:>5} |", addr, val),
                None => cformat!("        | <r>{:0>2} : out of memory</> |", addr),
            })
            .collect()
    }
}

impl Hook for Dump {
    fn init(&mut self, _state: &mut State) {
        if self.all {
            ceprintln!(" * Dump all");
        }
        if let Some(fname) = &self.file {
            ceprintln!(" * Dump[{}] {:?}", self.list.0.len(), fname);
        }
    }

    fn exec(&mut self, time: u64, addr: usize, word: Word, state: &mut State) {
        for line in self.render(time, addr, word, state) {
            eprintln!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Input;

    fn state() -> State {
        let mut mem = [0; arch::MEM_SIZE];
        mem[0] = 901;
        mem[1] = 399;
        State::new(mem, Input::batch([5]))
    }

    #[test]
    fn silent_by_default() {
        let dump = Dump::arg(None, false).unwrap();
        let mut s = state();
        let (addr, word) = s.exec().unwrap();
        assert!(dump.render(0, addr, word, &s).is_empty());
    }

    #[test]
    fn all_prints_every_step() {
        let dump = Dump::arg(None, true).unwrap();
        let mut s = state();
        let (addr, word) = s.exec().unwrap();
        let lines = dump.render(0, addr, word, &s);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("901"));
    }

    #[test]
    fn configured_cells() {
        let dump = Dump::from_yaml("1:\n  mem: [99, 150]\n", false).unwrap();
        let mut s = state();
        let (addr, word) = s.exec().unwrap();
        assert!(dump.render(0, addr, word, &s).is_empty());

        let (addr, word) = s.exec().unwrap();
        let lines = dump.render(1, addr, word, &s);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "        | 99 :     5 |");
        assert!(lines[2].contains("out of memory"));
    }

    #[test]
    fn bad_config() {
        assert!(Dump::from_yaml("1: [oops", false).is_err());
    }
}
