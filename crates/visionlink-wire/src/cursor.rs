/// A bounds-checked cursor over an immutable byte slice.
///
/// Tokenizes ASCII decimal integers the way `strtol` does — leading
/// whitespace skipped, optional sign, digits consumed greedily — but the
/// position can never advance past the end of the slice, and a field that
/// fails to parse leaves the cursor at the field start.
#[derive(Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset into the slice.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// True when all input has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Advance past any ASCII whitespace.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Consume `literal` if it appears at the current position.
    pub fn expect(&mut self, literal: &[u8]) -> bool {
        if self.buf[self.pos.min(self.buf.len())..].starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Parse a signed base-10 integer, skipping leading whitespace.
    ///
    /// Returns `None` (cursor restored) if no digits follow the optional
    /// sign or the value does not fit in an `i32`.
    pub fn read_i32(&mut self) -> Option<i32> {
        self.skip_whitespace();
        let start = self.pos;
        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        match self.read_digits() {
            Some(magnitude) => {
                let value = if negative { -magnitude } else { magnitude };
                match i32::try_from(value) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        self.pos = start;
                        None
                    }
                }
            }
            None => {
                self.pos = start;
                None
            }
        }
    }

    /// Parse an unsigned base-10 integer, skipping leading whitespace.
    pub fn read_u32(&mut self) -> Option<u32> {
        self.skip_whitespace();
        let start = self.pos;
        match self.read_digits().and_then(|v| u32::try_from(v).ok()) {
            Some(value) => Some(value),
            None => {
                self.pos = start;
                None
            }
        }
    }

    /// Consume a run of ASCII digits. `None` if the run is empty or the
    /// accumulated value overflows an `i64` (a 128-byte line cannot carry a
    /// legitimate value anywhere near that).
    fn read_digits(&mut self) -> Option<i64> {
        let mut value: i64 = 0;
        let mut digits = 0usize;
        while let Some(b @ b'0'..=b'9') = self.peek() {
            value = value.checked_mul(10)?.checked_add(i64::from(b - b'0'))?;
            self.pos += 1;
            digits += 1;
        }
        if digits == 0 {
            None
        } else {
            Some(value)
        }
    }
}
