/// Identifies one mount of the auth view or one activation of a todo session.
///
/// Timers and remote completions carry the generation they were issued under;
/// the reducer drops them once that mount or session is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Generation(pub u64);

#[derive(Debug, Default)]
pub struct GenerationSeq {
    next: u64,
}

impl GenerationSeq {
    pub fn next_id(&mut self) -> Generation {
        let id = Generation(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}
