//! Line-based prompts for the city and the unit system.

use std::io::{self, BufRead, Write};

use weather_core::Units;

/// Map the answer to the unit menu onto a unit system. Only `2` selects
/// Fahrenheit; anything else, including an empty line, is Celsius.
pub fn unit_choice(answer: &str) -> Units {
    match answer.trim() {
        "2" => Units::Imperial,
        _ => Units::Metric,
    }
}

#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed while prompting"));
        }
        Ok(line.trim().to_string())
    }

    /// Ask until a non-empty city name is given.
    pub fn city(&mut self) -> io::Result<String> {
        loop {
            let city = self.ask("Enter city name: ")?;
            if !city.is_empty() {
                return Ok(city);
            }
            writeln!(self.output, "City name cannot be empty.")?;
        }
    }

    pub fn units(&mut self) -> io::Result<Units> {
        writeln!(self.output, "Temperature unit options:")?;
        writeln!(self.output, " [1] Celsius")?;
        writeln!(self.output, " [2] Fahrenheit")?;

        let answer = self.ask("Choose (1 or 2) [default 1]: ")?;
        Ok(unit_choice(&answer))
    }
}
