/// Uppercase the first letter of every word and lowercase the rest.
/// Word boundaries are any non-alphanumeric character.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphanumeric() || c == '_' {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Reveals a name one character per tick.
#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    // End byte offset of each char.
    ends: Vec<usize>,
    shown: usize,
}

impl Typewriter {
    /// Trims and title-cases `name`; nothing is visible yet.
    pub fn new(name: &str) -> Self {
        let text = title_case(name.trim());
        let ends = text
            .char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .collect();
        Self {
            text,
            ends,
            shown: 0,
        }
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }

    pub fn visible(&self) -> &str {
        match self.shown {
            0 => "",
            n => &self.text[..self.ends[n - 1]],
        }
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.ends.len()
    }

    /// Reveal one more character. Returns whether characters remain.
    pub fn tick(&mut self) -> bool {
        if !self.is_done() {
            self.shown += 1;
        }
        !self.is_done()
    }
}
