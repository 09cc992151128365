//! `knot` CLI — format, validate, and convert Knot documents.
//!
//! ## Usage
//!
//! ```sh
//! # Rewrite a document in canonical form (stdin → stdout)
//! echo 'server port=8080' | knot fmt
//!
//! # Format from file to file
//! knot fmt -i config.knot -o config.knot
//!
//! # Convert a document to pretty-printed JSON
//! knot json -i config.knot
//!
//! # Validate without producing output
//! knot check -i config.knot
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use knot_core::{Decimal, Document, Literal, NodeId, Number};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "knot", version, about = "Knot document CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a document in canonical form
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Convert a document to pretty-printed JSON
    Json {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Parse a document, reporting the first error
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fmt { input, output } => {
            let text = read_input(input.as_deref())?;
            let doc = knot_core::parse(&text).context("Failed to parse document")?;
            write_output(output.as_deref(), &doc.to_text())?;
        }
        Commands::Json { input, output } => {
            let text = read_input(input.as_deref())?;
            let doc = knot_core::parse(&text).context("Failed to parse document")?;
            let pretty = serde_json::to_string_pretty(&document_json(&doc))?;
            write_output(output.as_deref(), &format!("{pretty}\n"))?;
        }
        Commands::Check { input } => {
            let text = read_input(input.as_deref())?;
            let doc = knot_core::parse(&text).context("Invalid document")?;
            println!(
                "OK: {} top-level node(s)",
                doc.node(doc.root()).children().len()
            );
        }
    }

    Ok(())
}

/// A document as JSON: the array of top-level nodes.
fn document_json(doc: &Document) -> serde_json::Value {
    doc.node(doc.root())
        .children()
        .iter()
        .map(|&id| node_json(doc, id))
        .collect::<Vec<_>>()
        .into()
}

/// `{name, type?, values?, properties?, children?}`, omitting empty parts.
fn node_json(doc: &Document, id: NodeId) -> serde_json::Value {
    let node = doc.node(id);
    let mut object = serde_json::Map::new();
    object.insert("name".into(), node.name().into());
    if let Some(hint) = node.type_hint() {
        object.insert("type".into(), hint.into());
    }
    if !node.values().is_empty() {
        object.insert(
            "values".into(),
            node.values().iter().map(value_json).collect::<Vec<_>>().into(),
        );
    }
    if !node.properties().is_empty() {
        let properties: serde_json::Map<String, serde_json::Value> = node
            .properties()
            .iter()
            .map(|(key, value)| (key.clone(), value_json(value)))
            .collect();
        object.insert("properties".into(), properties.into());
    }
    if !node.children().is_empty() {
        object.insert(
            "children".into(),
            node.children()
                .iter()
                .map(|&child| node_json(doc, child))
                .collect::<Vec<_>>()
                .into(),
        );
    }
    serde_json::Value::Object(object)
}

/// A plain literal, or `{type, value}` when the value carries an annotation.
fn value_json(value: &knot_core::Value) -> serde_json::Value {
    let literal = literal_json(&value.literal);
    match &value.type_hint {
        Some(hint) => serde_json::json!({ "type": hint, "value": literal }),
        None => literal,
    }
}

fn literal_json(literal: &Literal) -> serde_json::Value {
    match literal {
        Literal::Null => serde_json::Value::Null,
        Literal::Bool(flag) => (*flag).into(),
        Literal::String(text) => text.clone().into(),
        Literal::Number(number) => number_json(number),
    }
}

/// Integers that fit stay integers; everything else becomes a float.
fn number_json(number: &Number) -> serde_json::Value {
    match number {
        Number::Decimal(decimal) if decimal.fraction_digits == 0 && decimal.exponent.is_none() => {
            match i64::try_from(decimal.integral) {
                Ok(magnitude) if decimal.negative => (-magnitude).into(),
                Ok(magnitude) => magnitude.into(),
                Err(_) => float_json(decimal_to_f64(decimal)),
            }
        }
        Number::Decimal(decimal) => float_json(decimal_to_f64(decimal)),
        Number::Based(based) => match u64::try_from(based.magnitude) {
            Ok(magnitude) => magnitude.into(),
            Err(_) => float_json(based.magnitude as f64),
        },
    }
}

fn decimal_to_f64(decimal: &Decimal) -> f64 {
    let mut result = decimal.integral as f64;
    if decimal.fraction_digits > 0 {
        result += decimal.fraction as f64 / 10f64.powi(decimal.fraction_digits as i32);
    }
    if let Some(exponent) = &decimal.exponent {
        let magnitude = exponent.magnitude as f64;
        result *= 10f64.powf(if exponent.negative { -magnitude } else { magnitude });
    }
    if decimal.negative {
        -result
    } else {
        result
    }
}

/// Non-finite results (exponent overflow) have no JSON spelling; emit null.
fn float_json(value: f64) -> serde_json::Value {
    serde_json::Number::from_f64(value)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
