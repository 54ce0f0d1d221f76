use crate::errors::{Error, Result};
use crate::network::NetworkBuilder;

/// Parse a structure description into edges on `builder`.
///
/// The format is line-oriented: each non-blank, non-`#` line reads
/// `Parent -> Child`, with surrounding whitespace trimmed from both
/// names. Anything else is a format error carrying the 1-based line
/// number.
pub fn parse_structure(text: &str, builder: &mut NetworkBuilder) -> Result<()> {
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((parent, child)) = line.split_once("->") else {
            return Err(Error::Format {
                line: index + 1,
                message: format!("expected 'Parent -> Child', found '{}'", line),
            });
        };
        let parent = parent.trim();
        let child = child.trim();
        if parent.is_empty() || child.is_empty() {
            return Err(Error::Format {
                line: index + 1,
                message: format!("edge with an empty endpoint: '{}'", line),
            });
        }
        builder.add_edge(parent, child);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_edges_and_skips_comments() {
        let mut builder = NetworkBuilder::new();
        let text = "# weather model\n\nRain -> Umbrella\n  Rain ->  Traffic \n";
        parse_structure(text, &mut builder).unwrap();
    }

    #[test]
    fn test_line_without_arrow_is_a_format_error() {
        let mut builder = NetworkBuilder::new();
        let err = parse_structure("Rain Umbrella", &mut builder).unwrap_err();
        assert!(matches!(err, Error::Format { line: 1, .. }));
    }

    #[test]
    fn test_empty_endpoint_is_a_format_error() {
        let mut builder = NetworkBuilder::new();
        let err = parse_structure("Rain -> ", &mut builder).unwrap_err();
        assert!(matches!(err, Error::Format { line: 1, .. }));
    }
}
