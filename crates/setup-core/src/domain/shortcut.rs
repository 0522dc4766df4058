//! Shortcut token sequences.
//!
//! A shortcut is stored as an ordered token list, e.g.
//! `["ctrl", "alt", "cmd", "C"]`, and edited as the comma-joined text
//! `ctrl,alt,cmd,C`.  Splitting does not trim: whatever the user typed between
//! commas becomes a token, so join-then-split is the identity for any token
//! list whose tokens contain no comma.
//!
//! The "modifiers first, then one key" convention is not enforced.
//! [`check_order`] only reports deviations so callers can log them.

use thiserror::Error;

/// Separator between tokens in the editable text form.
pub const TOKEN_SEPARATOR: char = ',';

/// Joins shortcut tokens into their editable text form.
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut text = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            text.push(TOKEN_SEPARATOR);
        }
        text.push_str(token.as_ref());
    }
    text
}

/// Splits editable text back into tokens.  Always yields at least one token.
pub fn split_tokens(text: &str) -> Vec<String> {
    text.split(TOKEN_SEPARATOR).map(str::to_string).collect()
}

/// A modifier key understood by the automation host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Ctrl,
    Alt,
    Cmd,
    Shift,
    Fn,
}

impl Modifier {
    /// Recognizes a modifier token, accepting the host's aliases.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "ctrl" | "control" | "⌃" => Some(Modifier::Ctrl),
            "alt" | "option" | "opt" | "⌥" => Some(Modifier::Alt),
            "cmd" | "command" | "⌘" => Some(Modifier::Cmd),
            "shift" | "⇧" => Some(Modifier::Shift),
            "fn" => Some(Modifier::Fn),
            _ => None,
        }
    }
}

/// How a token sequence deviates from "modifiers, then exactly one key".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderIssue {
    /// The only token is empty text.
    #[error("shortcut is empty")]
    Empty,
    /// Every token is a modifier.
    #[error("shortcut has modifiers but no key")]
    NoKey,
    /// A non-modifier token appears before the last position.
    #[error("key '{token}' is followed by further tokens")]
    KeyBeforeEnd { token: String },
}

/// Checks the conventional token order.
pub fn check_order<S: AsRef<str>>(tokens: &[S]) -> Result<(), OrderIssue> {
    let Some((last, leading)) = tokens.split_last() else {
        return Err(OrderIssue::Empty);
    };
    if tokens.len() == 1 && last.as_ref().is_empty() {
        return Err(OrderIssue::Empty);
    }
    if let Some(key) = leading
        .iter()
        .find(|t| Modifier::from_token(t.as_ref()).is_none())
    {
        return Err(OrderIssue::KeyBeforeEnd {
            token: key.as_ref().to_string(),
        });
    }
    if Modifier::from_token(last.as_ref()).is_some() {
        return Err(OrderIssue::NoKey);
    }
    Ok(())
}
