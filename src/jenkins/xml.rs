//! Credential-store XML response traversal.

use xml::reader::{EventReader, XmlEvent};

use crate::error::SetupError;

/// Extracts the credential identifier from a credential-store XML document.
///
/// The store reports each stored credential as a child element of
/// `<credentials>` whose *tag name* is the identifier; the element carries no
/// useful text content. This walks to the first child element of the first
/// `<credentials>` element and returns its local name.
///
/// Returns `None` when the document parses but contains no credential entry.
///
/// # Errors
///
/// Returns [`SetupError::Parse`] when the document is not well-formed XML.
pub(crate) fn first_credential_tag(document: &str) -> Result<Option<String>, SetupError> {
    let reader = EventReader::new(document.as_bytes());
    let mut inside_credentials = false;

    for event in reader {
        match event.map_err(|error| SetupError::Parse {
            message: error.to_string(),
        })? {
            XmlEvent::StartElement { name, .. } => {
                if inside_credentials {
                    return Ok(Some(name.local_name));
                }
                if name.local_name == "credentials" {
                    inside_credentials = true;
                }
            }
            XmlEvent::EndElement { name } if name.local_name == "credentials" => {
                return Ok(None);
            }
            _ => {}
        }
    }

    Ok(None)
}

#[cfg(test)]
#[path = "xml_tests.rs"]
mod tests;
