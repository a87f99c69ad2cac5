//! LMC emulator: a 100-cell memory, one accumulator and blocking `INP`.

pub mod error;
pub mod hooks;
pub mod input;
pub mod model;

use std::num::IntErrorKind;

use arch::{Word, MEM_SIZE};

use error::Error;
use hooks::Hook;
use input::Input;
use model::{Memory, State};

/// Parse machine code, one integer per line, into zero-padded memory.
/// Blank lines are skipped.
pub fn load(text: &str) -> Result<Memory, Error> {
    let words = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx, line.trim()))
        .filter(|(_, raw)| !raw.is_empty())
        .map(|(idx, raw)| {
            raw.parse::<Word>().map_err(|e| {
                let (line, raw) = (idx + 1, raw.to_string());
                match e.kind() {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                        Error::WordTooLarge { line, raw }
                    }
                    _ => Error::ParseWord { line, raw },
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if words.len() > MEM_SIZE {
        return Err(Error::ProgramTooLarge(words.len()));
    }
    let mut mem = [0; MEM_SIZE];
    mem[..words.len()].copy_from_slice(&words);
    Ok(mem)
}

/// Step `state` until it terminates, fails, or `tmax` steps have run.
pub fn run(state: &mut State, hooks: &mut [Box<dyn Hook>], tmax: Option<u64>) -> Result<(), Error> {
    for hook in hooks.iter_mut() {
        hook.init(state);
    }
    for time in 0..tmax.unwrap_or(u64::MAX) {
        if state.is_terminated() {
            break;
        }
        let (addr, word) = state.exec()?;
        for hook in hooks.iter_mut() {
            hook.exec(time, addr, word, state);
        }
    }
    Ok(())
}

/// Run `mem` to completion without hooks.
pub fn simulate(mem: Memory, input: Input) -> Result<State, Error> {
    let mut state = State::new(mem, input);
    run(&mut state, &mut [], None)?;
    Ok(state)
}
