//! Operator console on stdin/stdout

use std::io::{self, BufRead, StdinLock, Write};

use scalecart_domain::device::{OperatorConsole, OperatorNotice, Trigger};
use scalecart_types::Error;

const TRIGGER_PROMPT: &str = "[r] register item  [q] checkout  [x] shut down > ";

/// Map one input line to a trigger
pub fn parse_trigger(line: &str) -> Option<Trigger> {
    match line.trim().to_ascii_lowercase().as_str() {
        "r" => Some(Trigger::Register),
        "q" => Some(Trigger::Checkout),
        "x" => Some(Trigger::Shutdown),
        _ => None,
    }
}

pub struct StdinOperator<R> {
    input: R,
    currency: String,
}

impl StdinOperator<StdinLock<'static>> {
    pub fn stdin(currency: &str) -> Self {
        Self::new(io::stdin().lock(), currency)
    }
}

impl<R: BufRead> StdinOperator<R> {
    pub fn new(input: R, currency: &str) -> Self {
        Self {
            input,
            currency: currency.to_string(),
        }
    }

    /// `None` at end of input
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, Error> {
        print!("{}", prompt);
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn require_line(&mut self, prompt: &str) -> Result<String, Error> {
        self.read_line(prompt)?.ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "operator input closed").into()
        })
    }
}

impl<R: BufRead> OperatorConsole for StdinOperator<R> {
    /// End of input shuts the kiosk down
    fn next_trigger(&mut self) -> Result<Trigger, Error> {
        loop {
            match self.read_line(TRIGGER_PROMPT)? {
                None => return Ok(Trigger::Shutdown),
                Some(line) => match parse_trigger(&line) {
                    Some(trigger) => return Ok(trigger),
                    None if line.is_empty() => {}
                    None => println!("Unknown command '{}'", line),
                },
            }
        }
    }

    fn await_reference_weight(&mut self) -> Result<(), Error> {
        self.require_line("Place the reference weight on the scale and press Enter ")?;
        Ok(())
    }

    fn known_weight_grams(&mut self) -> Result<f64, Error> {
        loop {
            let line = self.require_line("Enter the known weight in grams: ")?;
            match line.parse::<f64>() {
                Ok(grams) => return Ok(grams),
                Err(_) => println!("Not a number: '{}'", line),
            }
        }
    }

    fn notify(&mut self, notice: OperatorNotice) {
        match notice {
            OperatorNotice::Calibrated { ratio } => {
                println!("Calibration complete (ratio {:.4})", ratio);
                println!("Place an item on the scale");
            }
            OperatorNotice::Registered { item_name, weight } => {
                println!("Registered {} ({} g)", item_name, weight);
            }
            OperatorNotice::Rejected { reason } => println!("Rejected: {}", reason),
            OperatorNotice::CheckoutReady { total, lines } => {
                println!("Checkout: {} line(s), total {} {:.2}", lines, self.currency, total);
            }
            OperatorNotice::HandoffFailed { reason } => {
                println!("Checkout front-end failed: {}. The receipt was kept.", reason);
            }
            OperatorNotice::NextCustomer => println!("\nReady for the next customer"),
        }
    }
}
