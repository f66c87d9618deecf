//! Find command implementation
//!
//! Prints the blocks a query matches without changing anything.

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use blockedit_core::file::load_file;
use blockedit_core::{Block, Document, Error, find_all_blocks, find_block};

use super::resolve;
use crate::cli::QueryArgs;
use crate::error::Result;

/// Run the find command
pub fn run_find(cwd: &Path, file: &Path, query: &QueryArgs, all: bool, json: bool) -> Result<()> {
    let path = resolve(cwd, file);
    let doc = load_file(&path)?;
    let query = query.to_query()?;

    let blocks = if all {
        find_all_blocks(&doc, &query)
    } else {
        find_block(&doc, &query).into_iter().collect()
    };
    if blocks.is_empty() {
        return Err(Error::not_found(query.describe()).into());
    }

    if json {
        let json_output = json!({
            "file": path.as_str(),
            "blocks": blocks.iter().map(|b| block_json(&doc, *b)).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&json_output)?);
    } else {
        for block in &blocks {
            print_block(&doc, *block);
        }
    }
    Ok(())
}

fn block_json(doc: &Document, block: Block) -> serde_json::Value {
    let lines: Vec<&str> = doc
        .slice(block)
        .unwrap_or_default()
        .iter()
        .map(|line| line.text())
        .collect();
    json!({
        "start_line": block.start + 1,
        "end_line": block.end,
        "lines": lines,
    })
}

fn print_block(doc: &Document, block: Block) {
    println!("{}", block.to_string().cyan().bold());
    for (offset, line) in doc.slice(block).unwrap_or_default().iter().enumerate() {
        let number = format!("{:>5}", block.start + offset + 1);
        println!("{} | {}", number.dimmed(), line.text());
    }
}
