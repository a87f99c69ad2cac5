pub mod dump;

use arch::Word;

use crate::model::State;

/// Side effects run around the main loop.
pub trait Hook {
    fn init(&mut self, state: &mut State);
    /// Called after every executed instruction with the address and word
    /// that were fetched.
    fn exec(&mut self, time: u64, addr: usize, word: Word, state: &mut State);
}
