use crate::GameStatus;

/// Gets told when a game ends, exactly once per game.
pub trait StatusObserver {
    fn on_status_change(&mut self, status: GameStatus);
}

impl<F> StatusObserver for F
where
    F: FnMut(GameStatus),
{
    fn on_status_change(&mut self, status: GameStatus) {
        self(status)
    }
}
