use std::fmt;
use std::io::{self, BufRead, Write};

/// The eleven menu actions, numbered 0 through 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Exit,
    List,
    Add,
    Delete,
    Update,
    Stats,
    Random,
    Search,
    SortByRating,
    Histogram,
    Website,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::Exit,
        Action::List,
        Action::Add,
        Action::Delete,
        Action::Update,
        Action::Stats,
        Action::Random,
        Action::Search,
        Action::SortByRating,
        Action::Histogram,
        Action::Website,
    ];

    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|a| *a == self)
            .unwrap_or_default()
    }

    pub fn from_number(n: usize) -> Option<Self> {
        Self::ALL.get(n).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Exit => "Exit",
            Action::List => "List movies",
            Action::Add => "Add movie",
            Action::Delete => "Delete movie",
            Action::Update => "Update movie",
            Action::Stats => "Stats",
            Action::Random => "Random movie",
            Action::Search => "Search movie",
            Action::SortByRating => "Movies sorted by rating",
            Action::Histogram => "Create rating histogram",
            Action::Website => "Generate website",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceError {
    NotANumber,
    OutOfRange,
}

impl fmt::Display for ChoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = Action::ALL.len() - 1;
        match self {
            ChoiceError::NotANumber => {
                write!(f, "Invalid input. Please enter a number between 0 and {}.", last)
            }
            ChoiceError::OutOfRange => {
                write!(f, "Invalid choice. Please enter a number between 0 and {}.", last)
            }
        }
    }
}

pub fn parse_choice(input: &str) -> Result<Action, ChoiceError> {
    let n: i64 = input.trim().parse().map_err(|_| ChoiceError::NotANumber)?;
    usize::try_from(n)
        .ok()
        .and_then(Action::from_number)
        .ok_or(ChoiceError::OutOfRange)
}

pub fn menu_text() -> String {
    let mut out = String::from("\nMenu:\n");
    for action in Action::ALL {
        out.push_str(&format!("{}. {}\n", action.number(), action.label()));
    }
    out
}

/// Line-oriented console input. End of input reads as empty lines, and the
/// menu then chooses [`Action::Exit`].
pub struct Prompter<R, W> {
    input: R,
    output: W,
    eof: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            eof: false,
        }
    }

    /// True once stdin has been exhausted.
    pub fn at_eof(&self) -> bool {
        self.eof
    }

    /// Prints `message` and reads one line, without its line ending.
    pub fn prompt(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.eof = true;
            writeln!(self.output)?;
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    /// Shows the menu and re-prompts until a valid action is entered.
    pub fn choose(&mut self) -> io::Result<Action> {
        write!(self.output, "{}", menu_text())?;
        loop {
            let line = self.prompt("Enter choice (0-10): ")?;
            if self.eof {
                return Ok(Action::Exit);
            }
            match parse_choice(&line) {
                Ok(action) => return Ok(action),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_every_menu_number() {
        for (n, action) in Action::ALL.iter().enumerate() {
            assert_eq!(parse_choice(&n.to_string()), Ok(*action));
            assert_eq!(action.number(), n);
        }
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(parse_choice(" 7 \n"), Ok(Action::Search));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_choice("eleven"), Err(ChoiceError::NotANumber));
        assert_eq!(parse_choice("3.5"), Err(ChoiceError::NotANumber));
        assert_eq!(parse_choice(""), Err(ChoiceError::NotANumber));
        assert_eq!(parse_choice("11"), Err(ChoiceError::OutOfRange));
        assert_eq!(parse_choice("-1"), Err(ChoiceError::OutOfRange));
    }

    #[test]
    fn choose_reprompts_until_valid() {
        let input = Cursor::new("abc\n42\n8\n");
        let mut out = Vec::new();
        let action = Prompter::new(input, &mut out).choose().unwrap();

        assert_eq!(action, Action::SortByRating);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("0. Exit"));
        assert!(printed.contains("10. Generate website"));
        assert!(printed.contains("Invalid input. Please enter a number between 0 and 10."));
        assert!(printed.contains("Invalid choice. Please enter a number between 0 and 10."));
        assert_eq!(printed.matches("Enter choice (0-10): ").count(), 3);
    }

    #[test]
    fn end_of_input_exits() {
        let mut prompter = Prompter::new(Cursor::new("nope\n"), Vec::new());
        assert_eq!(prompter.choose().unwrap(), Action::Exit);
        assert!(prompter.at_eof());
    }

    #[test]
    fn prompt_strips_line_endings() {
        let mut prompter = Prompter::new(Cursor::new("The Matrix\r\nnext\n"), Vec::new());
        assert_eq!(prompter.prompt("> ").unwrap(), "The Matrix");
        assert_eq!(prompter.prompt("> ").unwrap(), "next");
    }
}
