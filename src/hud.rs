//! Text heads-up display.
//!
//! [`Hud`] is a [`PresentationSink`] that keeps the latest score and move
//! count and queues one human-readable line per notification. Numbers are
//! grouped in thousands with `.` (so `12345` reads `12.345`).

use crate::sink::PresentationSink;

/// Format `value` with `.` as the thousands separator.
pub fn format_count(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[derive(Clone, Debug, Default)]
pub struct Hud {
    score: u32,
    moves_remaining: u32,
    game_over: bool,
    pending: Vec<String>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// `score <n>    moves <n>` with grouped digits.
    pub fn status_line(&self) -> String {
        format!(
            "score {}    moves {}",
            format_count(self.score),
            format_count(self.moves_remaining)
        )
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Take the lines queued since the last call.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }
}

impl PresentationSink for Hud {
    fn game_started(&mut self, score: u32, moves_remaining: u32) {
        self.score = score;
        self.moves_remaining = moves_remaining;
        self.game_over = false;
        self.pending.push(format!("new game: {}", self.status_line()));
    }

    fn move_made(&mut self, score: u32, moves_remaining: u32) {
        let gained = score.saturating_sub(self.score);
        self.score = score;
        self.moves_remaining = moves_remaining;
        self.pending
            .push(format!("+{}: {}", format_count(gained), self.status_line()));
    }

    fn game_over(&mut self, score: u32) {
        self.game_over = true;
        self.pending
            .push(format!("game over: final score {}", format_count(score)));
    }
}
