//! Console rendering of network structure, CPT tables, and query results.

use crate::errors::Result;
use crate::inference::Distribution;
use crate::network::{Network, Node};
use colored::Colorize;
use std::collections::HashMap;

fn join_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

/// Format an evidence map as `var=value` pairs for headers and prompts.
pub fn format_evidence(evidence: &HashMap<String, String>) -> String {
    if evidence.is_empty() {
        return "no evidence".to_string();
    }
    let mut pairs: Vec<String> = evidence
        .iter()
        .map(|(var, value)| format!("{}={}", var, value))
        .collect();
    pairs.sort();
    pairs.join(", ")
}

/// Print the network's roots and, in topological order, each node with its
/// parents, children, and domain.
pub fn print_structure(network: &Network) -> Result<()> {
    println!("\n{}", "=".repeat(50));
    println!("{}", "NETWORK STRUCTURE".bold());
    println!("{}", "=".repeat(50));

    let roots = network.roots();
    let roots = if roots.is_empty() {
        "none".to_string()
    } else {
        roots.join(", ")
    };
    println!("Root nodes: {}\n", roots.cyan());

    for name in network.topological_order()? {
        let node = network.node(&name)?;
        println!("NODE: {}", name.bold());
        println!("  Parents:  {}", join_or_none(&node.parents));
        println!("  Children: {}", join_or_none(network.children_of(&name)));
        println!("  Values:   {}", node.values.join(", "));
        println!();
    }
    println!("{}", "=".repeat(50));
    Ok(())
}

/// Print every node's CPT in topological order: priors as `P(X=v)` lines
/// for roots, a header/rows table for parented nodes.
pub fn print_cpts(network: &Network) -> Result<()> {
    println!("\n{}", "=".repeat(50));
    println!("{}", "CONDITIONAL PROBABILITY TABLES".bold());
    println!("{}", "=".repeat(50));

    for name in network.topological_order()? {
        let node = network.node(&name)?;
        println!("\n--- Node: {} ---", name.bold());
        println!("Values: {}", node.values.join(", "));

        if node.is_root() {
            println!("Probabilities:");
            if let Some(row) = node.cpt.get(&Vec::new()) {
                for value in &node.values {
                    let prob = row.get(value).copied().unwrap_or(0.0);
                    println!("  P({}={}) = {:.4}", name, value, prob);
                }
            }
        } else {
            println!("Parents: {}", node.parents.join(", "));
            println!();
            let parent_header = node.parents.join(" | ");
            let value_header = node.values.join(" | ");
            println!("{} || {}", parent_header, value_header);
            println!("{}", "-".repeat(parent_header.len() + value_header.len() + 4));

            // Rows in the deterministic order validation enumerates them.
            for key in parent_value_rows(network, node)? {
                if let Some(row) = node.cpt.get(&key) {
                    let probs = node
                        .values
                        .iter()
                        .map(|v| format!("{:.4}", row.get(v).copied().unwrap_or(0.0)))
                        .collect::<Vec<_>>()
                        .join(" | ");
                    println!("{} || {}", key.join(" | "), probs);
                }
            }
        }
    }
    println!("\n{}", "=".repeat(50));
    Ok(())
}

fn parent_value_rows(network: &Network, node: &Node) -> Result<Vec<Vec<String>>> {
    let mut rows: Vec<Vec<String>> = vec![Vec::new()];
    for parent_name in &node.parents {
        let parent = network.node(parent_name)?;
        let mut extended = Vec::with_capacity(rows.len() * parent.values.len());
        for row in &rows {
            for value in &parent.values {
                let mut next = row.clone();
                next.push(value.clone());
                extended.push(next);
            }
        }
        rows = extended;
    }
    Ok(rows)
}

/// Print a posterior distribution with its most likely value highlighted.
pub fn print_result(query: &str, evidence: &HashMap<String, String>, distribution: &Distribution) {
    println!("\n{}", "=".repeat(60));
    println!("{}", "INFERENCE RESULT".bold());
    println!("{}", "=".repeat(60));
    println!("Posterior for {} given {}:", query.bold(), format_evidence(evidence));
    println!("{}", "-".repeat(60));
    for (value, prob) in distribution.iter() {
        println!("  P({}={} | evidence) = {:.6}", query, value, prob);
    }
    if let Some((value, prob)) = distribution.most_likely() {
        println!("{}", "-".repeat(60));
        println!(
            "Most likely: {} with probability {:.6}",
            format!("{}={}", query, value).green().bold(),
            prob
        );
    }
    println!("{}", "=".repeat(60));
}
