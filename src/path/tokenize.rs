//! Byte-cursor scanner for SVG path data.
//!
//! Recognizes command letters and numbers, skips separators and any byte
//! it does not understand, then groups numbers behind the command that
//! precedes them.

/// Letters that start a path command, supported or not.
const COMMAND_LETTERS: &[u8] = b"MmCcSsLlZzHhVvQqTtAa";

/// A single lexical token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Command(u8),
    Number(f64),
}

/// A command letter with every number that followed it.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandGroup {
    pub letter: u8,
    pub args: Vec<f64>,
}

/// Iterator over the tokens of a path string.
pub struct Tokenizer<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            bytes: data.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn digits_from(&self, start: usize) -> usize {
        self.bytes[start.min(self.bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    }

    /// Length of the number starting at the cursor, or `None`.
    ///
    /// Grammar: `[+-]? (digits ('.' digits?)? | '.' digits) ([eE] [+-]? digits)?`
    fn number_len(&self) -> Option<usize> {
        let mut len = 0;
        if matches!(self.peek(0), Some(b'+' | b'-')) {
            len += 1;
        }

        let int_digits = self.digits_from(self.pos + len);
        len += int_digits;
        if int_digits > 0 {
            if self.peek(len) == Some(b'.') {
                len += 1;
                len += self.digits_from(self.pos + len);
            }
        } else {
            if self.peek(len) != Some(b'.') {
                return None;
            }
            let frac_digits = self.digits_from(self.pos + len + 1);
            if frac_digits == 0 {
                return None;
            }
            len += 1 + frac_digits;
        }

        // The exponent only belongs to the number when digits follow it.
        if matches!(self.peek(len), Some(b'e' | b'E')) {
            let mut exp_len = 1;
            if matches!(self.peek(len + exp_len), Some(b'+' | b'-')) {
                exp_len += 1;
            }
            let exp_digits = self.digits_from(self.pos + len + exp_len);
            if exp_digits > 0 {
                len += exp_len + exp_digits;
            }
        }
        Some(len)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while let Some(b) = self.peek(0) {
            if matches!(b, b' ' | b',' | b'\t' | b'\n' | b'\r') {
                self.pos += 1;
                continue;
            }
            if COMMAND_LETTERS.contains(&b) {
                self.pos += 1;
                return Some(Token::Command(b));
            }
            if let Some(len) = self.number_len() {
                let text = &self.bytes[self.pos..self.pos + len];
                self.pos += len;
                // The scanned slice is pure ASCII matching the float grammar.
                let value = std::str::from_utf8(text)
                    .ok()
                    .and_then(|s| s.parse::<f64>().ok());
                if let Some(value) = value {
                    return Some(Token::Number(value));
                }
                continue;
            }
            self.pos += 1;
        }
        None
    }
}

/// Split path data into command groups. Numbers before the first command
/// are dropped.
pub fn command_groups(data: &str) -> Vec<CommandGroup> {
    let mut groups: Vec<CommandGroup> = Vec::new();
    for token in Tokenizer::new(data) {
        match token {
            Token::Command(letter) => groups.push(CommandGroup {
                letter,
                args: Vec::new(),
            }),
            Token::Number(value) => {
                if let Some(group) = groups.last_mut() {
                    group.args.push(value);
                }
            }
        }
    }
    groups
}
