use crate::errors::{Error, Result};
use crate::network::NetworkBuilder;
use std::collections::HashMap;

/// Parse a CPT description into domains, edges, and CPT rows on `builder`.
///
/// Per-node blocks read:
///
/// ```text
/// NODE <name>
/// VALUES <v1> <v2> ...
/// [PARENTS <p1> <p2> ...]
/// TABLE
/// <row>*
/// ENDNODE
/// ```
///
/// A row gives one probability per value, preceded by one value per parent
/// (in `PARENTS` order) when the node has parents. `PARENTS` lines also
/// register the edges, so a CPT file alone can define a whole network.
/// Blank lines and `#` comments are ignored; format errors carry the
/// offending 1-based line number.
pub fn parse_cpts(text: &str, builder: &mut NetworkBuilder) -> Result<()> {
    let total_lines = text.lines().count();
    // Comment filtering keeps original line numbers for error reports.
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(index, raw)| (index + 1, raw.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect();

    let mut index = 0;
    while index < lines.len() {
        index = parse_node_block(&lines, index, total_lines, builder)?;
    }
    Ok(())
}

fn parse_node_block(
    lines: &[(usize, &str)],
    start: usize,
    total_lines: usize,
    builder: &mut NetworkBuilder,
) -> Result<usize> {
    let mut index = start;

    let (line_no, line) = lines[index];
    let name = match line.split_once(char::is_whitespace) {
        Some(("NODE", rest)) if !rest.trim().is_empty() => rest.trim().to_string(),
        _ => {
            return Err(Error::Format {
                line: line_no,
                message: format!("expected 'NODE <name>', found '{}'", line),
            });
        }
    };
    index += 1;

    let (line_no, line) = expect_line(lines, index, total_lines, &name, "VALUES")?;
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("VALUES") {
        return Err(Error::Format {
            line: line_no,
            message: format!("expected 'VALUES' after NODE {}, found '{}'", name, line),
        });
    }
    let values: Vec<String> = tokens.map(str::to_string).collect();
    builder.set_domain(&name, values.clone());
    index += 1;

    let mut parents: Vec<String> = Vec::new();
    if let Some((_, line)) = lines.get(index) {
        let mut tokens = line.split_whitespace();
        if tokens.next() == Some("PARENTS") {
            parents = tokens.map(str::to_string).collect();
            for parent in &parents {
                builder.add_edge(parent, &name);
            }
            index += 1;
        }
    }

    let (line_no, line) = expect_line(lines, index, total_lines, &name, "TABLE")?;
    if line != "TABLE" {
        return Err(Error::Format {
            line: line_no,
            message: format!("expected 'TABLE' for NODE {}, found '{}'", name, line),
        });
    }
    index += 1;

    while let Some(&(line_no, line)) = lines.get(index) {
        if line == "ENDNODE" {
            return Ok(index + 1);
        }
        parse_row(line_no, line, &name, &parents, &values, builder)?;
        index += 1;
    }
    Err(Error::Format {
        line: total_lines,
        message: format!("expected 'ENDNODE' for NODE {}, found end of file", name),
    })
}

fn parse_row(
    line_no: usize,
    line: &str,
    name: &str,
    parents: &[String],
    values: &[String],
    builder: &mut NetworkBuilder,
) -> Result<()> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != parents.len() + values.len() {
        return Err(Error::Format {
            line: line_no,
            message: format!(
                "table row for node {} must have {} parent value(s) and {} probability(ies), found {} token(s): '{}'",
                name,
                parents.len(),
                values.len(),
                tokens.len(),
                line
            ),
        });
    }

    let parent_values: Vec<String> = tokens[..parents.len()]
        .iter()
        .map(|t| t.to_string())
        .collect();
    let mut row: HashMap<String, f64> = HashMap::with_capacity(values.len());
    for (value, token) in values.iter().zip(&tokens[parents.len()..]) {
        let prob: f64 = token.parse().map_err(|_| Error::Format {
            line: line_no,
            message: format!("'{}' is not a probability", token),
        })?;
        row.insert(value.clone(), prob);
    }
    builder.set_cpt_row(name, parent_values, row)
}

fn expect_line<'a>(
    lines: &[(usize, &'a str)],
    index: usize,
    total_lines: usize,
    name: &str,
    keyword: &str,
) -> Result<(usize, &'a str)> {
    lines.get(index).copied().ok_or_else(|| Error::Format {
        line: total_lines,
        message: format!("expected '{}' for NODE {}, found end of file", keyword, name),
    })
}
