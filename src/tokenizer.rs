//! Splits class-list strings into tokens without losing a single byte.
//!
//! The tokenizer is the fidelity layer of the pipeline: every rule works on
//! `ClassToken`s and relies on the guarantee that the original literal can be
//! reconstructed exactly from them. Whitespace runs are attached to the token
//! that follows them; whitespace at the very end of the string is kept on the
//! list itself.

/// A single class name together with the whitespace that precedes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassToken {
    /// Whitespace between the previous token (or string start) and this name
    pub leading: String,
    /// The class name itself, never empty and never containing whitespace
    pub name: String,
    /// Byte offset of the name within the literal content
    pub start: usize,
    /// Byte offset one past the end of the name
    pub end: usize,
}

/// The parsed form of one class-list literal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassList {
    pub tokens: Vec<ClassToken>,
    /// Whitespace after the last class name (the whole string if it holds no
    /// classes at all)
    pub trailing: String,
}

impl ClassList {
    /// Reassemble the exact original literal content.
    pub fn reconstruct(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            out.push_str(&token.leading);
            out.push_str(&token.name);
        }
        out.push_str(&self.trailing);
        out
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.name.as_str())
    }
}

/// Split a class-list string into tokens.
///
/// Pure function: tokenizing the same input twice yields identical results.
/// Empty and whitespace-only inputs yield an empty token list with the input
/// preserved as trailing whitespace.
pub fn tokenize(raw: &str) -> ClassList {
    let mut tokens = Vec::new();
    let mut pending_ws = String::new();
    let mut i = 0usize;

    while i < raw.len() {
        let ch = raw[i..].chars().next().unwrap();
        if ch.is_whitespace() {
            pending_ws.push(ch);
            i += ch.len_utf8();
            continue;
        }

        // Start of a class name: scan to the next whitespace
        let name_start = i;
        while i < raw.len() {
            let c = raw[i..].chars().next().unwrap();
            if c.is_whitespace() {
                break;
            }
            i += c.len_utf8();
        }
        tokens.push(ClassToken {
            leading: std::mem::take(&mut pending_ws),
            name: raw[name_start..i].to_string(),
            start: name_start,
            end: i,
        });
    }

    ClassList {
        tokens,
        trailing: pending_ws,
    }
}
