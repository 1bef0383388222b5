//! Message interpreter.
//!
//! Turns one Internet Message Format document (headers `From`, `To`,
//! `Subject` plus a plain-text body) into an addressed [`Envelope`].
//! This is a pure transform: deterministic, side-effect free, and
//! referentially transparent for identical input text.
//!
//! The `To` header carries a comma-separated list of entries of the
//! form `local[/tag]@domain`, each optionally wrapped in angle
//! brackets. The optional `/tag` segment is stripped from the stored
//! address and carried verbatim as the target's kind; it is not
//! restricted to a known vocabulary.

use crate::error::FormatError;

/// The one kind tag with dedicated handling: targets tagged
/// `groupchat` are joined (by nickname) before anything is sent to
/// them. Every other tag is passed through to the transport unchanged.
pub const GROUPCHAT_KIND: &str = "groupchat";

/// One resolved delivery destination from a `To` address entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Destination address as `local@domain`, with any `/tag` segment
    /// removed from the local part.
    pub address: String,

    /// Verbatim text found after the first `/` in the local part of
    /// the original entry. `None` when the entry carried no tag.
    pub kind: Option<String>,
}

/// An interpreted message, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Raw `From` header value. Used verbatim as the nickname when
    /// joining group conversations.
    pub sender_display: String,

    /// Rendered text to deliver: the subject line prefixed to the
    /// message content. Opaque beyond that concatenation.
    pub body: String,

    /// Delivery targets in declaration order. Never reordered or
    /// deduplicated.
    pub recipients: Vec<Target>,
}

/// Interpret a raw message into an [`Envelope`].
///
/// Leading whitespace is stripped before parsing. The header section
/// ends at the first empty line; folded continuation lines (leading
/// whitespace) are appended to the preceding field. Header names are
/// matched case-insensitively. Everything after the empty line is the
/// message content, kept verbatim.
///
/// # Errors
///
/// - [`FormatError::MalformedHeader`] when a header-section line is
///   neither a field nor a continuation
/// - [`FormatError::MissingRecipients`] when the `To` header is absent
///   or lists no entries
/// - [`FormatError::MalformedAddress`] when an entry does not split
///   into a local-part and a domain
pub fn interpret(raw: &str) -> Result<Envelope, FormatError> {
    let text = raw.trim_start();
    let (headers, content) = split_message(text)?;

    let to = header_value(&headers, "to").ok_or(FormatError::MissingRecipients)?;
    let recipients = parse_address_list(to)?;
    if recipients.is_empty() {
        return Err(FormatError::MissingRecipients);
    }

    let sender_display = header_value(&headers, "from").unwrap_or_default().to_string();
    let subject = header_value(&headers, "subject").unwrap_or_default();
    let body = format!("*Subject*: {subject}\n{content}");

    Ok(Envelope { sender_display, body, recipients })
}

/// Split the message into parsed header fields and verbatim content.
///
/// Returns header fields as `(lowercased name, unfolded value)` pairs
/// in input order, and the content slice starting right after the
/// blank separator line.
fn split_message(text: &str) -> Result<(Vec<(String, String)>, &str), FormatError> {
    let mut headers: Vec<(String, String)> = Vec::new();
    let mut offset = 0;
    let mut content_start = text.len();

    for line in text.split_inclusive('\n') {
        let stripped = line.trim_end_matches(['\r', '\n']);

        if stripped.is_empty() {
            content_start = offset + line.len();
            break;
        }

        if stripped.starts_with([' ', '\t']) {
            // Folded continuation of the previous field
            let Some((_, value)) = headers.last_mut() else {
                return Err(FormatError::MalformedHeader { line: stripped.to_string() });
            };
            value.push(' ');
            value.push_str(stripped.trim_start());
        } else if let Some((name, value)) = stripped.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        } else {
            return Err(FormatError::MalformedHeader { line: stripped.to_string() });
        }

        offset += line.len();
    }

    Ok((headers, &text[content_start..]))
}

/// Look up a header field by lowercased name. First occurrence wins.
fn header_value<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
}

/// Parse a comma-separated address list into targets, preserving
/// declaration order. Empty entries (stray commas) are skipped.
fn parse_address_list(value: &str) -> Result<Vec<Target>, FormatError> {
    let mut targets = Vec::new();

    for entry in value.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        targets.push(parse_address(entry)?);
    }

    Ok(targets)
}

/// Parse one address entry of the form `local[/tag]@domain`, with an
/// optional display name and angle brackets around the address.
fn parse_address(entry: &str) -> Result<Target, FormatError> {
    let malformed = || FormatError::MalformedAddress { entry: entry.to_string() };

    let addr = match entry.find('<') {
        Some(start) => {
            let rest = &entry[start + 1..];
            let end = rest.find('>').ok_or_else(malformed)?;
            &rest[..end]
        },
        None => entry,
    };

    let (local_full, domain) = addr.rsplit_once('@').ok_or_else(malformed)?;
    if domain.is_empty() {
        return Err(malformed());
    }

    let (local, kind) = match local_full.split_once('/') {
        Some((local, tag)) => (local, Some(tag.to_string())),
        None => (local_full, None),
    };
    if local.is_empty() {
        return Err(malformed());
    }

    Ok(Target { address: format!("{local}@{domain}"), kind })
}
