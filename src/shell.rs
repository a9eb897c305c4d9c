use std::io::{self, BufRead, Write};
use std::str::FromStr;

use log::debug;

use crate::accounting::ledger::Ledger;

const MENU: &str = "\n=== Expense Tracker ===\n\
                    1. Add Transaction\n\
                    2. Load Transactions from File\n\
                    3. Save Transactions to File\n\
                    4. View Monthly Summary\n\
                    5. Exit";

enum Flow {
    Continue,
    Exit,
}

/// Menu driven front end over a [`Ledger`]. Reads answers line by line from
/// `input` and prints everything to `output`. End of input ends the session.
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Shell { input, output }
    }

    pub fn run(&mut self, ledger: &mut Ledger) -> io::Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let choice = match self.prompt("Choose an option: ")? {
                Some(choice) => choice,
                None => return Ok(()),
            };

            let flow = match choice.parse::<u32>() {
                Ok(1) => self.add_transaction(ledger)?,
                Ok(2) => self.load_from_file(ledger)?,
                Ok(3) => self.save_to_file(ledger)?,
                Ok(4) => self.view_monthly_summary(ledger)?,
                Ok(5) => {
                    writeln!(self.output, "Goodbye!")?;
                    Flow::Exit
                },
                Ok(_) => {
                    writeln!(self.output, "Invalid option.")?;
                    Flow::Continue
                },
                Err(_) => {
                    writeln!(self.output, "Please enter a number between 1 and 5.")?;
                    Flow::Continue
                },
            };

            if let Flow::Exit = flow {
                return Ok(());
            }
        }
    }

    /// Loads `path` into the ledger and reports the outcome. Failures are
    /// printed, they never end the session.
    pub fn load_path(&mut self, ledger: &mut Ledger, path: &str) -> io::Result<()> {
        match ledger.load(path) {
            Ok(report) => {
                for skipped in report.skipped() {
                    writeln!(self.output, "Skipping invalid line {}: {}", skipped.line, skipped.content)?;
                }
                writeln!(self.output, "{} transactions loaded.", report.loaded())
            },
            Err(err) => writeln!(self.output, "Error loading file: {}", err),
        }
    }

    fn add_transaction(&mut self, ledger: &mut Ledger) -> io::Result<Flow> {
        let Some(kind) = self.prompt("Is this income or expense? ")? else {
            return Ok(Flow::Exit);
        };
        let Some(category) = self.prompt("Enter category (e.g., salary/business/food/rent/travel): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = self.prompt("Enter amount: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(date) = self.prompt("Enter date (dd-MM-yyyy): ")? else {
            return Ok(Flow::Exit);
        };

        match ledger.add(&kind, &category, &amount, &date) {
            Ok(()) => writeln!(self.output, "Transaction added.")?,
            Err(err) => writeln!(self.output, "Transaction not added: {}", err)?,
        }

        Ok(Flow::Continue)
    }

    fn load_from_file(&mut self, ledger: &mut Ledger) -> io::Result<Flow> {
        let Some(path) = self.prompt("Enter filename to load (e.g., data.csv): ")? else {
            return Ok(Flow::Exit);
        };

        self.load_path(ledger, &path)?;

        Ok(Flow::Continue)
    }

    fn save_to_file(&mut self, ledger: &Ledger) -> io::Result<Flow> {
        let Some(path) = self.prompt("Enter filename to save (e.g., data.csv): ")? else {
            return Ok(Flow::Exit);
        };

        match ledger.save(&path) {
            Ok(count) => writeln!(self.output, "{} transactions saved to file.", count)?,
            Err(err) => writeln!(self.output, "Error saving file: {}", err)?,
        }

        Ok(Flow::Continue)
    }

    fn view_monthly_summary(&mut self, ledger: &Ledger) -> io::Result<Flow> {
        let Some(year) = self.prompt_number::<i32>("Enter year (e.g., 2025): ")? else {
            return Ok(Flow::Exit);
        };

        let month = loop {
            let Some(month) = self.prompt_number::<u32>("Enter month number (1-12): ")? else {
                return Ok(Flow::Exit);
            };
            if (1..=12).contains(&month) {
                break month;
            }
            writeln!(self.output, "Month must be between 1 and 12.")?;
        };

        writeln!(self.output)?;
        writeln!(self.output, "{}", ledger.summarize(year, month))?;

        Ok(Flow::Continue)
    }

    /// Prints `message` and reads one trimmed line, `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("input closed");
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    fn prompt_number<T: FromStr>(&mut self, message: &str) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.prompt(message)? else {
                return Ok(None);
            };
            match answer.parse::<T>() {
                Ok(number) => return Ok(Some(number)),
                Err(_) => writeln!(self.output, "'{}' is not a valid number.", answer)?,
            }
        }
    }
}
