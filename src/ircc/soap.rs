//! SOAP envelope construction and fault extraction.
//!
//! # Design Decisions
//! - The envelope is a fixed template; the key code is the only variable part
//!   and is inserted verbatim (the device parser is lenient, no XML escaping)
//! - Faults are pulled out with a narrow line-based text match instead of an
//!   XML parser: the device always puts `<errorCode>` at the end of one line and
//!   `<errorDescription>` on the next
//! - Tag matching is case-sensitive

use crate::ircc::keycode::KeyCode;
use crate::ircc::types::SoapFault;

/// Everything before the key code.
pub const ENVELOPE_HEAD: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
    "<s:Envelope\n",
    "    xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\"\n",
    "    s:encodingStyle=\"http://schemas.xmlsoap.org/soap/encoding/\">\n",
    "    <s:Body>\n",
    "        <u:X_SendIRCC xmlns:u=\"urn:schemas-sony-com:service:IRCC:1\">\n",
    "            <IRCCCode>",
);

/// Everything after the key code.
pub const ENVELOPE_TAIL: &str = concat!(
    "</IRCCCode>\n",
    "        </u:X_SendIRCC>\n",
    "    </s:Body>\n",
    "</s:Envelope>",
);

const CODE_OPEN: &str = "<errorCode>";
const CODE_CLOSE: &str = "</errorCode>";
const DESC_OPEN: &str = "<errorDescription>";
const DESC_CLOSE: &str = "</errorDescription>";

/// Build the `X_SendIRCC` request body for a key code.
pub fn envelope(key: &KeyCode) -> String {
    let key = key.as_str();
    let mut body = String::with_capacity(ENVELOPE_HEAD.len() + key.len() + ENVELOPE_TAIL.len());
    body.push_str(ENVELOPE_HEAD);
    body.push_str(key);
    body.push_str(ENVELOPE_TAIL);
    body
}

/// Find the first `<errorCode>` line directly followed by an
/// `<errorDescription>` line.
///
/// Lines are split on `\n` only, so a `\r\n` body never matches. Both captures
/// must be non-empty.
pub fn extract_fault(body: &str) -> Option<SoapFault> {
    let lines: Vec<&str> = body.split('\n').collect();
    lines.windows(2).find_map(|pair| {
        let code = trailing_code(pair[0])?;
        let description = enclosed_description(pair[1])?;
        Some(SoapFault {
            code: code.to_string(),
            description: description.to_string(),
        })
    })
}

/// The code of a line that ends in `</errorCode>`.
fn trailing_code(line: &str) -> Option<&str> {
    let rest = line.strip_suffix(CODE_CLOSE)?;
    rest.rmatch_indices(CODE_OPEN)
        .map(|(i, _)| &rest[i + CODE_OPEN.len()..])
        .find(|code| !code.is_empty())
}

/// The text between the last usable `<errorDescription>` and the last
/// `</errorDescription>` after it.
fn enclosed_description(line: &str) -> Option<&str> {
    let end = line.rfind(DESC_CLOSE)?;
    line.rmatch_indices(DESC_OPEN).find_map(|(i, _)| {
        let start = i + DESC_OPEN.len();
        (end > start).then(|| &line[start..end])
    })
}
