//! Line-oriented console protocol.
//!
//! The console is the input source for a [`Session`]: it reads one command
//! per line and answers in the GTP style, `=[id] message` on success or
//! `?[id] message` on failure, each response followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name` - Return the program name
//! - `version` - Return the program version
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `select <row> <col>` - Select a cell (row 0 is the bottom row)
//! - `showboard` - Print the grid, top row first
//! - `status` - Print score and remaining moves
//! - `restart` - Start a new game once the current one is over
//! - `quit` - Exit
//!
//! ## Example
//!
//! ```ignore
//! use colorfall::console::Console;
//! let mut console = Console::new(session);
//! console.run()?;
//! ```

use std::io::{self, BufRead, Write};

use crate::hud::Hud;
use crate::palette::ColorSource;
use crate::session::{MoveOutcome, Session};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "known_command",
    "list_commands",
    "name",
    "quit",
    "restart",
    "select",
    "showboard",
    "status",
    "version",
];

pub struct Console<C> {
    session: Session<C, Hud>,
}

impl<C: ColorSource> Console<C> {
    /// Wrap a session; it is started if it has not been already.
    pub fn new(mut session: Session<C, Hud>) -> Self {
        session.start();
        session.sink_mut().drain();
        Self { session }
    }

    pub fn session(&self) -> &Session<C, Hud> {
        &self.session
    }

    /// Run the command loop on stdin/stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let (success, message) = self.execute(&command, &parts[1..]);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    fn board(&self) -> String {
        self.session.grid().to_string().trim_end().to_string()
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "showboard" => (true, format!("\n{}", self.board())),

            "status" => {
                let mut status = self.session.sink().status_line();
                if self.session.is_over() {
                    status.push_str("    game over");
                }
                (true, status)
            }

            "restart" => {
                if !self.session.restart() {
                    return (true, "ignored: game is still in progress".to_string());
                }
                let lines = self.session.sink_mut().drain();
                (true, format!("{}\n{}", lines.join("\n"), self.board()))
            }

            "select" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let (Ok(row), Ok(col)) = (args[0].parse::<usize>(), args[1].parse::<usize>())
                else {
                    return (false, "invalid coordinate".to_string());
                };
                match self.session.on_cell_selected(row, col) {
                    Ok(MoveOutcome::Ignored) => {
                        if self.session.is_over() {
                            (true, "ignored: game is over, use restart".to_string())
                        } else {
                            (true, "ignored".to_string())
                        }
                    }
                    Ok(MoveOutcome::Resolved(_)) => {
                        let lines = self.session.sink_mut().drain();
                        (true, format!("{}\n{}", lines.join("\n"), self.board()))
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::grid::{ColorId, Grid};

    fn console(rows: &[Vec<ColorId>], moves: u32) -> Console<impl FnMut() -> ColorId + use<>> {
        let config = SessionConfig {
            initial_moves: moves,
            ..SessionConfig::default()
        }
        .instant();
        let session = Session::from_grid(config, Grid::from_rows(rows), || -> ColorId { 0 })
            .unwrap()
            .with_sink(Hud::new());
        Console::new(session)
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = Console::<fn() -> ColorId>::parse_id("123 status");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "status");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = Console::<fn() -> ColorId>::parse_id("status");
        assert_eq!(id, None);
        assert_eq!(cmd, "status");
    }

    #[test]
    fn test_known_command() {
        let mut console = console(&[vec![1]], 1);
        assert_eq!(console.execute("known_command", &["select"]), (true, "true".to_string()));
        assert_eq!(console.execute("known_command", &["genmove"]), (true, "false".to_string()));
        assert!(!console.execute("known_command", &[]).0);
    }

    #[test]
    fn test_select_reports_score() {
        let mut console = console(&[vec![1, 1], vec![2, 3]], 5);
        let (success, response) = console.execute("select", &["0", "0"]);
        assert!(success);
        assert!(response.starts_with("+2: score 2    moves 4"), "got {response}");
        assert_eq!(console.session().score(), 2);
    }

    #[test]
    fn test_select_rejects_bad_input() {
        let mut console = console(&[vec![1, 1]], 5);
        assert_eq!(
            console.execute("select", &["a", "0"]),
            (false, "invalid coordinate".to_string())
        );
        assert_eq!(
            console.execute("select", &["4", "0"]),
            (false, "cell (4, 0) is outside the 1x2 grid".to_string())
        );
        assert!(!console.execute("select", &["0"]).0);
    }

    #[test]
    fn test_select_after_game_over() {
        let mut console = console(&[vec![1, 2]], 1);
        let (_, response) = console.execute("select", &["0", "1"]);
        assert!(response.contains("game over"), "got {response}");
        let (success, response) = console.execute("select", &["0", "0"]);
        assert!(success);
        assert!(response.starts_with("ignored"));

        let (_, status) = console.execute("status", &[]);
        assert_eq!(status, "score 1    moves 0    game over");
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut console = console(&[vec![1, 2]], 2);
        console.execute("select", &["0", "0"]);
        let (success, response) = console.execute("restart", &[]);
        assert!(success);
        assert_eq!(response, "ignored: game is still in progress");
        assert_eq!(console.session().score(), 1);
        assert_eq!(console.session().moves_remaining(), 1);

        console.execute("select", &["0", "1"]);
        let (success, response) = console.execute("restart", &[]);
        assert!(success);
        assert!(response.starts_with("new game: score 0    moves 2"), "got {response}");
        assert_eq!(console.session().moves_remaining(), 2);
    }

    #[test]
    fn test_run_loop() {
        let mut console = console(&[vec![1, 2], vec![3, 4]], 3);
        let input = b"# comment\n\n7 showboard\nbogus\nquit\nstatus\n";
        let mut output = Vec::new();
        console.run_with(&input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "=7 \n3 4\n1 2\n\n? unknown command: bogus\n\n= \n\n"
        );
    }
}
